//! Platform-independent core of the bot: consumes a user's text or button
//! press, drives the conversation state and produces the reply.

use anyhow::Result;
use chrono::{DateTime, Utc};
use crate::bot::keyboards::{Keyboard, MenuAction, StatsCallback};
use crate::bot::state::{route, ConversationState, ConversationStore, Step};
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::{
    chat::echo_reply,
    dictionary::lookup_placeholder,
    notes::{
        format_notes, AddNoteOutcome, NoteService, NOTES_CLEARED_MESSAGE, NOTE_SAVED_MESSAGE,
        NOTE_TOO_LONG_MESSAGE,
    },
    password::generate_password,
    ping::PingChecker,
    stats::{StatsService, NO_STATS_MESSAGE},
    wikipedia::{lookup_error_message, WikipediaClient},
};
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_validation_error,
};
use crate::utils::validation::validate_ping_address;

pub const WELCOME_MESSAGE: &str = "Bem-vindo! Escolha uma opção:";
pub const DEACTIVATED_MESSAGE: &str = "Bot desativado. Use /start para reiniciar.";
pub const BACK_MESSAGE: &str = "Voltando ao menu principal:";
pub const UNRECOGNIZED_MESSAGE: &str = "Comando não reconhecido. Por favor, use o menu.";
pub const CHOOSE_OPTION_MESSAGE: &str = "Escolha uma opção:";
pub const STATS_MENU_MESSAGE: &str = "Escolha uma opção de estatísticas:";
pub const STORAGE_ERROR_MESSAGE: &str =
    "Ocorreu um erro ao acessar os dados. Tente novamente mais tarde.";

/// Text plus the keyboard to attach to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    pub fn with_main_menu(text: impl Into<String>) -> Self {
        Self::new(text, Keyboard::MainMenu)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Keyboard::None)
    }
}

/// Result of an inline statistics button: the new text for the message that
/// carried the button, and whether the main menu must be sent afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackReply {
    pub text: String,
    pub show_main_menu: bool,
}

#[derive(Clone)]
pub struct Assistant {
    states: ConversationStore,
    stats: StatsService,
    notes: NoteService,
    pinger: PingChecker,
    wikipedia: WikipediaClient,
}

impl Assistant {
    pub fn new(db: DatabaseManager, config: &Config, started_at: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            states: ConversationStore::new(),
            stats: StatsService::new(db.clone(), config.admin_id, started_at),
            notes: NoteService::new(db),
            pinger: PingChecker::new(config.ping_timeout),
            wikipedia: WikipediaClient::new(&config.wiki_lang)?,
        })
    }

    /// Replaces the ping runner, e.g. to point at a different binary.
    pub fn with_pinger(mut self, pinger: PingChecker) -> Self {
        self.pinger = pinger;
        self
    }

    pub fn with_wikipedia(mut self, wikipedia: WikipediaClient) -> Self {
        self.wikipedia = wikipedia;
        self
    }

    pub fn states(&self) -> &ConversationStore {
        &self.states
    }

    pub fn stats(&self) -> &StatsService {
        &self.stats
    }

    pub fn notes(&self) -> &NoteService {
        &self.notes
    }

    /// `/start`: clears any pending flow, counts the message and shows the menu.
    pub async fn start(&self, user_id: u64) -> Reply {
        log_command_start("/start", user_id, None);
        self.states.reset(user_id).await;

        if let Err(e) = self.stats.record_activity(user_id).await {
            log_command_error("/start", user_id, &e.to_string());
            return Reply::with_main_menu(STORAGE_ERROR_MESSAGE);
        }

        Reply::with_main_menu(WELCOME_MESSAGE)
    }

    /// `/off`: clears any pending flow.
    pub async fn off(&self, user_id: u64) -> Reply {
        log_command_start("/off", user_id, None);
        self.states.reset(user_id).await;
        Reply::plain(DEACTIVATED_MESSAGE)
    }

    /// Any slash command other than `/start` and `/off`.
    pub fn unknown_command(command: &str) -> Reply {
        tracing::debug!("Unknown command {}", command);
        Reply::with_main_menu(UNRECOGNIZED_MESSAGE)
    }

    /// Handles a free-text message. Activity is recorded first; if that
    /// fails the message is not processed and the user's flow is cleared.
    pub async fn handle_text(&self, user_id: u64, text: &str) -> Reply {
        if let Err(e) = self.stats.record_activity(user_id).await {
            log_command_error("record_activity", user_id, &e.to_string());
            self.states.reset(user_id).await;
            return Reply::with_main_menu(STORAGE_ERROR_MESSAGE);
        }

        let state = self.states.get(user_id).await;
        tracing::debug!("User {} in state {} sent text", user_id, state.name());

        match route(state, text) {
            Step::Back => {
                self.states.reset(user_id).await;
                Reply::with_main_menu(BACK_MESSAGE)
            }
            Step::Consume(state) => self.complete(user_id, state, text).await,
            Step::Menu(action) => self.open(user_id, action).await,
            Step::Unrecognized => Reply::with_main_menu(UNRECOGNIZED_MESSAGE),
        }
    }

    /// Handles a press on the inline statistics keyboard; `None` for data
    /// this bot never produced.
    pub async fn handle_callback(&self, user_id: u64, data: &str) -> Option<CallbackReply> {
        let callback = StatsCallback::parse(data)?;
        log_command_start(callback.data(), user_id, None);

        let text = match callback {
            StatsCallback::Back => {
                return Some(CallbackReply {
                    text: BACK_MESSAGE.to_string(),
                    show_main_menu: true,
                });
            }
            StatsCallback::UserStats => self
                .stats
                .user_summary(user_id)
                .await
                .map(|summary| summary.to_message()),
            StatsCallback::BotStats => self.stats.global_summary().await.map(|summary| {
                summary.map_or_else(|| NO_STATS_MESSAGE.to_string(), |s| s.to_message())
            }),
            StatsCallback::AdminStats => self
                .stats
                .admin_summary(user_id)
                .await
                .map(|summary| summary.to_message()),
        };

        let text = text.unwrap_or_else(|e| {
            log_command_error(callback.data(), user_id, &e.to_string());
            STORAGE_ERROR_MESSAGE.to_string()
        });

        Some(CallbackReply {
            text,
            show_main_menu: false,
        })
    }

    async fn open(&self, user_id: u64, action: MenuAction) -> Reply {
        log_command_start(action.label(), user_id, None);

        match action {
            MenuAction::Dictionary => {
                self.prompt(
                    user_id,
                    ConversationState::AwaitingWord,
                    "Digite a palavra que deseja buscar no dicionário:",
                )
                .await
            }
            MenuAction::PasswordGenerator => {
                Reply::with_main_menu(format!("Sua senha gerada: {}", generate_password()))
            }
            MenuAction::PersonalNotes => Reply::new(CHOOSE_OPTION_MESSAGE, Keyboard::NotesMenu),
            MenuAction::AddNote => {
                self.prompt(
                    user_id,
                    ConversationState::AwaitingNote,
                    "Digite sua nota (máximo 500 caracteres):",
                )
                .await
            }
            MenuAction::ViewNotes => match self.notes.list_notes(user_id).await {
                Ok(notes) => Reply::with_main_menu(format_notes(&notes)),
                Err(e) => self.storage_failure("view_notes", user_id, &e).await,
            },
            MenuAction::ClearNotes => match self.notes.clear_notes(user_id).await {
                Ok(deleted) => {
                    let details = format!("{deleted} removed");
                    log_command_success("clear_notes", user_id, Some(&details));
                    Reply::with_main_menu(NOTES_CLEARED_MESSAGE)
                }
                Err(e) => self.storage_failure("clear_notes", user_id, &e).await,
            },
            MenuAction::CheckPing => {
                self.prompt(
                    user_id,
                    ConversationState::AwaitingAddress,
                    "Digite o endereço para verificar o ping:",
                )
                .await
            }
            MenuAction::Chat => {
                self.prompt(
                    user_id,
                    ConversationState::Chatting,
                    "Olá! Sobre o que você gostaria de conversar?",
                )
                .await
            }
            MenuAction::Wikipedia => {
                self.prompt(
                    user_id,
                    ConversationState::AwaitingWiki,
                    "Digite o termo que deseja buscar na Wikipedia:",
                )
                .await
            }
            MenuAction::Statistics => Reply::new(STATS_MENU_MESSAGE, Keyboard::StatsMenu),
            MenuAction::Back => {
                self.states.reset(user_id).await;
                Reply::with_main_menu(BACK_MESSAGE)
            }
        }
    }

    async fn prompt(&self, user_id: u64, state: ConversationState, text: &str) -> Reply {
        self.states.set(user_id, state).await;
        Reply::plain(text)
    }

    /// Consumes the input a pending state was waiting for.
    async fn complete(&self, user_id: u64, state: ConversationState, text: &str) -> Reply {
        match state {
            ConversationState::Idle => Reply::with_main_menu(UNRECOGNIZED_MESSAGE),
            ConversationState::Chatting => Reply::plain(echo_reply(text)),
            ConversationState::AwaitingWord => {
                self.states.reset(user_id).await;
                Reply::with_main_menu(lookup_placeholder(text))
            }
            ConversationState::AwaitingNote => self.save_note(user_id, text).await,
            ConversationState::AwaitingAddress => self.ping(user_id, text).await,
            ConversationState::AwaitingWiki => self.search_wikipedia(user_id, text).await,
        }
    }

    async fn save_note(&self, user_id: u64, text: &str) -> Reply {
        match self.notes.add_note(user_id, text).await {
            Ok(AddNoteOutcome::Saved) => {
                self.states.reset(user_id).await;
                log_command_success("add_note", user_id, None);
                Reply::with_main_menu(NOTE_SAVED_MESSAGE)
            }
            // stays in AwaitingNote so the user can send a shorter note
            Ok(AddNoteOutcome::TooLong) => Reply::plain(NOTE_TOO_LONG_MESSAGE),
            Err(e) => self.storage_failure("add_note", user_id, &e).await,
        }
    }

    async fn ping(&self, user_id: u64, address: &str) -> Reply {
        let address = address.trim();
        if let Err(e) = validate_ping_address(address) {
            log_validation_error("ping", "address", &e.to_string(), user_id);
            return Reply::plain(format!("Endereço inválido: {e}. Digite outro endereço:"));
        }

        // cleared before the slow call so a second message is not taken as an address
        self.states.reset(user_id).await;
        let outcome = self.pinger.check(address).await;
        log_command_success("ping", user_id, Some(&format!("{address}: {outcome:?}")));
        Reply::with_main_menu(outcome.to_message(address))
    }

    async fn search_wikipedia(&self, user_id: u64, term: &str) -> Reply {
        self.states.reset(user_id).await;

        match self.wikipedia.lookup(term).await {
            Ok(outcome) => {
                log_command_success("wikipedia", user_id, Some(term));
                Reply::with_main_menu(outcome.to_message())
            }
            Err(e) => {
                log_command_error("wikipedia", user_id, &e.to_string());
                Reply::with_main_menu(lookup_error_message(&e))
            }
        }
    }

    async fn storage_failure(&self, command: &str, user_id: u64, error: &anyhow::Error) -> Reply {
        log_command_error(command, user_id, &error.to_string());
        self.states.reset(user_id).await;
        Reply::with_main_menu(STORAGE_ERROR_MESSAGE)
    }
}
