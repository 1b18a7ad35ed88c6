pub mod message;
pub mod event;
pub mod document;
pub mod api;
pub mod config;
pub mod error;
pub mod session;


pub use error::{ClientError, UploadRejection};

pub type Result<T> = std::result::Result<T, ClientError>;
