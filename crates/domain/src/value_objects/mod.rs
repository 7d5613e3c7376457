//! Value Objects - Immutable, identity-less domain primitives

mod email_address;
mod entity_id;

pub use email_address::EmailAddress;
pub use entity_id::{CategoryId, ProfileId, TileId, UserId};
