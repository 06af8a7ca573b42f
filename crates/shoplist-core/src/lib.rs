//! Core models, list transitions, persistence and share codec for shoplist.
//!
//! This crate holds everything about the shopping list that is independent of
//! how it is presented; front ends drive it through [`Session`].

pub mod engine;
pub mod error;
pub mod models;
pub mod session;
pub mod share;
pub mod store;

pub use error::{ShareError, StoreError, UnknownCategory};
pub use models::{Category, Filter, Item, ItemCounts};
pub use session::{Command, Session};
pub use share::SharedList;
pub use store::{FileStorage, ListStore, MemoryStorage, Storage};
