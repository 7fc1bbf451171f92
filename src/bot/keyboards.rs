//! Reply keyboards, the inline statistics keyboard and the labels that map
//! button presses back to actions.

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup,
};

/// A button on one of the reply keyboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Dictionary,
    PasswordGenerator,
    PersonalNotes,
    AddNote,
    ViewNotes,
    ClearNotes,
    CheckPing,
    Chat,
    Wikipedia,
    Statistics,
    Back,
}

impl MenuAction {
    pub const ALL: [MenuAction; 11] = [
        MenuAction::Dictionary,
        MenuAction::PasswordGenerator,
        MenuAction::PersonalNotes,
        MenuAction::AddNote,
        MenuAction::ViewNotes,
        MenuAction::ClearNotes,
        MenuAction::CheckPing,
        MenuAction::Chat,
        MenuAction::Wikipedia,
        MenuAction::Statistics,
        MenuAction::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Dictionary => "Dicionário",
            MenuAction::PasswordGenerator => "Gerador de Senhas",
            MenuAction::PersonalNotes => "Notas Pessoais",
            MenuAction::AddNote => "Adicionar Nota",
            MenuAction::ViewNotes => "Ver Notas",
            MenuAction::ClearNotes => "Limpar Notas",
            MenuAction::CheckPing => "Verificar Ping",
            MenuAction::Chat => "Conversar",
            MenuAction::Wikipedia => "Wikipedia",
            MenuAction::Statistics => "Estatísticas",
            MenuAction::Back => "Voltar",
        }
    }

    /// Exact label match; free text that merely contains a label is not a press.
    pub fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.label() == text)
    }
}

/// Callback data carried by the inline statistics buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsCallback {
    UserStats,
    BotStats,
    AdminStats,
    Back,
}

impl StatsCallback {
    pub fn data(self) -> &'static str {
        match self {
            StatsCallback::UserStats => "user_stats",
            StatsCallback::BotStats => "bot_stats",
            StatsCallback::AdminStats => "admin_stats",
            StatsCallback::Back => "back",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatsCallback::UserStats => "Minhas Estatísticas",
            StatsCallback::BotStats => "Estatísticas do Bot",
            StatsCallback::AdminStats => "Estatísticas do Admin",
            StatsCallback::Back => "Voltar",
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "user_stats" => Some(StatsCallback::UserStats),
            "bot_stats" => Some(StatsCallback::BotStats),
            "admin_stats" => Some(StatsCallback::AdminStats),
            "back" => Some(StatsCallback::Back),
            _ => None,
        }
    }
}

/// Keyboard attached to an outgoing reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave whatever keyboard the user already has.
    None,
    MainMenu,
    NotesMenu,
    StatsMenu,
}

impl Keyboard {
    pub fn markup(self) -> Option<ReplyMarkup> {
        match self {
            Keyboard::None => None,
            Keyboard::MainMenu => Some(ReplyMarkup::Keyboard(main_menu())),
            Keyboard::NotesMenu => Some(ReplyMarkup::Keyboard(notes_menu())),
            Keyboard::StatsMenu => Some(ReplyMarkup::InlineKeyboard(stats_menu())),
        }
    }
}

pub const MAIN_MENU_LAYOUT: [&[MenuAction]; 4] = [
    &[MenuAction::Dictionary, MenuAction::PasswordGenerator],
    &[MenuAction::PersonalNotes, MenuAction::CheckPing],
    &[MenuAction::Chat, MenuAction::Wikipedia],
    &[MenuAction::Statistics],
];

pub const NOTES_MENU_LAYOUT: [&[MenuAction]; 2] = [
    &[MenuAction::AddNote, MenuAction::ViewNotes],
    &[MenuAction::ClearNotes, MenuAction::Back],
];

pub const STATS_MENU_LAYOUT: [StatsCallback; 4] = [
    StatsCallback::UserStats,
    StatsCallback::BotStats,
    StatsCallback::AdminStats,
    StatsCallback::Back,
];

fn reply_keyboard(layout: &[&[MenuAction]]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = layout
        .iter()
        .map(|row| row.iter().map(|action| KeyboardButton::new(action.label())).collect())
        .collect();

    KeyboardMarkup::new(rows).resize_keyboard(true)
}

pub fn main_menu() -> KeyboardMarkup {
    reply_keyboard(&MAIN_MENU_LAYOUT)
}

pub fn notes_menu() -> KeyboardMarkup {
    reply_keyboard(&NOTES_MENU_LAYOUT)
}

/// One inline button per row.
pub fn stats_menu() -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = STATS_MENU_LAYOUT
        .iter()
        .map(|callback| vec![InlineKeyboardButton::callback(callback.label(), callback.data())])
        .collect();

    InlineKeyboardMarkup::new(rows)
}
