pub mod api;
pub mod cases;
pub mod chat;
pub mod completion;
pub mod event_bus;
pub mod export;
pub mod ports;
pub mod sessions;

#[cfg(test)]
mod tests;
