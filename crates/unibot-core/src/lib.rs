//! Core of the chatbot client.
//!
//! Owns every piece of view state and the async flows that mutate it.
//! Talks to the outside world only through the traits in [`ports`].

pub mod ports;
pub mod event_bus;
pub mod view;
pub mod chat;
pub mod upload;
pub mod documents;
pub mod dashboard;
pub mod health;

#[cfg(test)]
mod tests;
