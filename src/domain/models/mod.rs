mod action;
mod error;
mod event;
mod gateway;
#[cfg(test)]
mod gateway_stub;
mod language;
mod message;
mod pending_input;
mod record;
mod slash_commands;

pub use action::*;
pub use error::*;
pub use event::*;
pub use gateway::*;
#[cfg(test)]
pub use gateway_stub::*;
pub use language::*;
pub use message::*;
pub use pending_input::*;
pub use record::*;
pub use slash_commands::*;
