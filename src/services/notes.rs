use anyhow::Result;
use crate::database::{connection::DatabaseManager, models::Note};
use crate::services::stats::to_db_id;
use crate::utils::logging::{log_database_operation, log_validation_error};
use crate::utils::validation::validate_note_text;

pub const NOTE_SAVED_MESSAGE: &str = "Nota salva com sucesso!";
pub const NOTE_TOO_LONG_MESSAGE: &str =
    "A nota é muito longa. Por favor, limite-a a 500 caracteres.";
pub const NO_NOTES_MESSAGE: &str = "Você não tem notas salvas.";
pub const NOTES_CLEARED_MESSAGE: &str = "Todas as suas notas foram apagadas.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddNoteOutcome {
    Saved,
    TooLong,
}

#[derive(Clone)]
pub struct NoteService {
    db: DatabaseManager,
}

impl NoteService {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    /// Stores `text` as a new note unless it exceeds the length limit, in
    /// which case nothing is written.
    pub async fn add_note(&self, user_id: u64, text: &str) -> Result<AddNoteOutcome> {
        if let Err(e) = validate_note_text(text) {
            log_validation_error("add_note", "text", &e.to_string(), user_id);
            return Ok(AddNoteOutcome::TooLong);
        }

        log_database_operation("INSERT", "notes", Some(&format!("user {user_id}")));
        Note::create(&self.db.pool, to_db_id(user_id)?, text).await?;
        Ok(AddNoteOutcome::Saved)
    }

    /// Note texts in the order they were saved.
    pub async fn list_notes(&self, user_id: u64) -> Result<Vec<String>> {
        let notes = Note::find_by_user(&self.db.pool, to_db_id(user_id)?).await?;
        Ok(notes.into_iter().map(|note| note.note).collect())
    }

    pub async fn clear_notes(&self, user_id: u64) -> Result<u64> {
        let deleted = Note::delete_by_user(&self.db.pool, to_db_id(user_id)?).await?;
        log_database_operation("DELETE", "notes", Some(&format!("user {user_id}, {deleted} rows")));
        Ok(deleted)
    }
}

/// Renders a note listing for display.
pub fn format_notes(notes: &[String]) -> String {
    if notes.is_empty() {
        NO_NOTES_MESSAGE.to_string()
    } else {
        format!("Suas notas:\n{}", notes.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_notes() {
        assert_eq!(format_notes(&[]), NO_NOTES_MESSAGE);
    }

    #[test]
    fn test_format_notes_in_order() {
        let notes = vec!["buy milk".to_string(), "call mom".to_string(), "buy milk".to_string()];
        assert_eq!(format_notes(&notes), "Suas notas:\nbuy milk\ncall mom\nbuy milk");
    }
}
