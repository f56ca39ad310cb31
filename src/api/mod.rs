//! Host message API module
//!
//! Inbound message structures and the dispatcher that routes them.

pub mod dispatcher;
pub mod messages;

pub use dispatcher::{dispatch, MessageHandler};
pub use messages::{parse_event, Action, Command};
