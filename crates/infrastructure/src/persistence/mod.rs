//! Persistence module
//!
//! In-memory stores behind the application's storage ports. Data lives for
//! the lifetime of the process.

mod board_store;
mod table;
mod user_store;

pub use board_store::{InMemoryCategoryStore, InMemoryProfileStore, InMemoryTileStore};
pub use user_store::InMemoryUserStore;
