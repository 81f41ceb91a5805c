pub mod config;
pub mod db;
pub mod error;
pub mod providers;
pub mod server;
pub mod service;
pub mod types;
pub(crate) mod utils;

pub use error::{LuminousError, ProviderError};
pub use service::ContentResolver;
