/// Health check handler.
pub mod health;
/// Streaming research handler.
pub mod research;
