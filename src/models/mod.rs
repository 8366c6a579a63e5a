pub mod chat;
pub mod paper;

pub use chat::{ChatExchange, ChatMessage, ChatRole};
pub use paper::PaperSummary;
