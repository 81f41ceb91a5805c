pub mod fallback;
pub mod pexels;
pub mod policy;
pub mod traits;
pub mod unsplash;
pub mod zenquotes;

mod bootstrap;
mod upstream_retry;

pub use bootstrap::{LUMINOUS_USER_AGENT, Providers};
pub use pexels::PexelsClient;
pub use traits::{BackgroundProvider, QuoteProvider};
pub use unsplash::UnsplashClient;
pub use upstream_retry::UPSTREAM_BODY_PREVIEW_CHARS;
pub use zenquotes::ZenQuotesClient;
