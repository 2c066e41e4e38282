pub mod cases;
pub mod chat;
pub mod prompts;
pub mod sessions;
