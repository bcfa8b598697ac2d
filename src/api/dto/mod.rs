//! Response types for the REST endpoints.

pub mod room_dto;

pub use room_dto::{RoomSummaryDto, UserDto};
