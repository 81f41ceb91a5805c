//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `actor.rs`: the `DbActor` owning the pool, and its cloneable handle
//! - `models.rs`: Rust structs mirroring DB rows
//! - `patch.rs`: create/patch payloads for saved selections
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `traits.rs`: the `QuoteStore` seam consumed by the resolver

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;
pub mod traits;

pub use models::{DbQuote, DbSavedQuote};
pub use patch::{SavedQuoteCreate, SavedQuotePatch};
pub use schema::SQLITE_INIT;
pub use traits::QuoteStore;

pub use actor::{DbActorHandle, spawn};
