//! Board model: static layout plus mutable ownership.
//!
//! - `space`: space kinds, color groups, per-space state
//! - `layout`: the fixed 40-space board and group membership
//! - `manager`: `Board`, the ownership array and its group queries
//!
//! Ownership is stored once, on the board, and looked up by index.

pub mod layout;
pub mod manager;
pub mod space;

pub use layout::{group_members, BOARD, BOARD_SIZE, FREE_PARKING, GO, GO_TO_JAIL, JAIL, RAILROADS, UTILITIES};
pub use manager::Board;
pub use space::{ColorGroup, SpaceDef, SpaceIndex, SpaceKind, SpaceState};
