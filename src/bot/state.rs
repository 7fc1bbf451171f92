//! Per-user conversation state and the routing rules for free text.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use crate::bot::keyboards::MenuAction;

/// What the next free-text message from a user is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingWord,
    AwaitingNote,
    AwaitingAddress,
    AwaitingWiki,
    /// Echoes every message until the user goes back to the menu.
    Chatting,
}

impl ConversationState {
    pub fn is_pending(self) -> bool {
        self != ConversationState::Idle
    }

    pub fn name(self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::AwaitingWord => "awaiting_word",
            ConversationState::AwaitingNote => "awaiting_note",
            ConversationState::AwaitingAddress => "awaiting_address",
            ConversationState::AwaitingWiki => "awaiting_wiki",
            ConversationState::Chatting => "chatting",
        }
    }
}

/// How a text message is handled given the sender's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Leave any pending flow and show the main menu.
    Back,
    /// The text is the input the pending state was waiting for.
    Consume(ConversationState),
    /// A menu button pressed while idle.
    Menu(MenuAction),
    Unrecognized,
}

/// `Voltar` always wins; otherwise a pending state swallows the text, and an
/// idle user's text must be a menu label.
pub fn route(state: ConversationState, text: &str) -> Step {
    let action = MenuAction::from_label(text);

    if action == Some(MenuAction::Back) {
        return Step::Back;
    }

    if state.is_pending() {
        return Step::Consume(state);
    }

    match action {
        Some(action) => Step::Menu(action),
        None => Step::Unrecognized,
    }
}

/// User id → conversation state. Idle users have no entry.
#[derive(Clone, Default)]
pub struct ConversationStore {
    states: Arc<Mutex<HashMap<u64, ConversationState>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: u64) -> ConversationState {
        self.states
            .lock()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    pub async fn set(&self, user_id: u64, state: ConversationState) {
        let mut states = self.states.lock().await;
        if state.is_pending() {
            states.insert(user_id, state);
        } else {
            states.remove(&user_id);
        }
    }

    pub async fn reset(&self, user_id: u64) {
        self.states.lock().await.remove(&user_id);
    }

    /// Number of users in the middle of a flow.
    pub async fn len(&self) -> usize {
        self.states.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_menu_selection() {
        assert_eq!(
            route(ConversationState::Idle, "Notas Pessoais"),
            Step::Menu(MenuAction::PersonalNotes)
        );
        assert_eq!(
            route(ConversationState::Idle, "Wikipedia"),
            Step::Menu(MenuAction::Wikipedia)
        );
    }

    #[test]
    fn test_idle_unknown_text() {
        assert_eq!(route(ConversationState::Idle, "olá"), Step::Unrecognized);
        assert_eq!(route(ConversationState::Idle, ""), Step::Unrecognized);
    }

    #[test]
    fn test_pending_state_consumes_text() {
        for state in [
            ConversationState::AwaitingWord,
            ConversationState::AwaitingNote,
            ConversationState::AwaitingAddress,
            ConversationState::AwaitingWiki,
            ConversationState::Chatting,
        ] {
            assert_eq!(route(state, "buy milk"), Step::Consume(state));
            // menu labels are input too while a flow is pending
            assert_eq!(route(state, "Wikipedia"), Step::Consume(state));
        }
    }

    #[test]
    fn test_back_escapes_every_state() {
        for state in [
            ConversationState::Idle,
            ConversationState::AwaitingNote,
            ConversationState::Chatting,
        ] {
            assert_eq!(route(state, "Voltar"), Step::Back);
        }
    }

    #[test]
    fn test_state_names() {
        assert_eq!(ConversationState::default().name(), "idle");
        assert_eq!(ConversationState::AwaitingAddress.name(), "awaiting_address");
        assert!(!ConversationState::Idle.is_pending());
        assert!(ConversationState::Chatting.is_pending());
    }

    #[tokio::test]
    async fn test_store_defaults_to_idle() {
        let store = ConversationStore::new();
        assert_eq!(store.get(1).await, ConversationState::Idle);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_set_and_reset() {
        let store = ConversationStore::new();
        store.set(1, ConversationState::AwaitingWiki).await;
        store.set(2, ConversationState::Chatting).await;
        assert_eq!(store.get(1).await, ConversationState::AwaitingWiki);
        assert_eq!(store.len().await, 2);

        store.set(1, ConversationState::Idle).await;
        assert_eq!(store.get(1).await, ConversationState::Idle);
        assert_eq!(store.len().await, 1);

        store.reset(2).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_users_do_not_interfere() {
        let store = ConversationStore::new();
        let mut tasks = Vec::new();
        for user_id in 0..50u64 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let state = if user_id % 2 == 0 {
                    ConversationState::AwaitingNote
                } else {
                    ConversationState::AwaitingWord
                };
                store.set(user_id, state).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        for user_id in 0..50u64 {
            let expected = if user_id % 2 == 0 {
                ConversationState::AwaitingNote
            } else {
                ConversationState::AwaitingWord
            };
            assert_eq!(store.get(user_id).await, expected);
        }
    }
}
