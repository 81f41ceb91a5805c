mod background;
mod quote;

pub use background::{BackgroundOrigin, BackgroundPhoto, ImageService, ProviderConfig};
pub use quote::{QuoteOrigin, QuotePage, Quotation};
