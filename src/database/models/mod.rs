pub mod bot_stats;
pub mod note;
pub mod user_stats;

pub use bot_stats::*;
pub use note::*;
pub use user_stats::*;
