//! # Assistente
//! 
//! A Telegram assistant bot that routes menu selections to a small set of
//! utility handlers through a per-user conversation state machine.
//! 
//! ## Features
//! - Personal notes stored per user
//! - Random password generation
//! - Ping checks through the system `ping` utility
//! - Wikipedia summaries
//! - Usage statistics with an admin-only leaderboard
//! - Persistent storage with SQLite

/// Telegram handlers, menus and the conversation state machine
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Utility handlers, statistics and the health endpoint
pub mod services;
/// Utility functions for datetime, validation, and logging
pub mod utils;
