pub mod message;
pub mod event;
pub mod prompt;
pub mod case;
pub mod config;
pub mod error;
pub mod session;


pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
