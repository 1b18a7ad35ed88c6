//! Browser adapters for the chatbot client.
//!
//! Everything that touches `fetch`, the DOM, or the page URL lives here.

pub mod http;
pub mod confirm;
pub mod picker;
pub mod launch;


pub use http::HttpApiClient;
pub use confirm::BrowserConfirm;
pub use picker::FilePicker;
pub use launch::LaunchParams;
