pub mod header;
pub mod chat;
pub mod upload;
pub mod dashboard;
