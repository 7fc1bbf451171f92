pub mod chat;
pub mod dictionary;
pub mod health;
pub mod notes;
pub mod password;
pub mod ping;
pub mod stats;
pub mod wikipedia;
