pub mod chat;
pub mod upload;
