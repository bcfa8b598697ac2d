//! Domain layer: connection identity, joined users, and outbound events.
//!
//! Rooms are not modelled as entities. A room is the string a user last
//! joined and exists only while at least one user names it.

pub mod connection_id;
pub mod connection_registry;
pub mod relay_event;
pub mod user;

pub use connection_id::ConnectionId;
pub use connection_registry::ConnectionRegistry;
pub use relay_event::RelayEvent;
pub use user::User;
