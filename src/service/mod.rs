//! Service layer: session handling and the transport seam.
//!
//! [`RelaySession`] reacts to join, chat and disconnect events, updates the
//! [`crate::domain::ConnectionRegistry`], and fans out through a
//! [`Transport`].

pub mod session_service;
pub mod transport;

pub use session_service::{RelaySession, SessionHandler, SessionPolicy};
pub use transport::Transport;
