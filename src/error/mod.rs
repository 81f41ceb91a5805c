mod luminous;
mod provider;

pub use luminous::{ApiErrorBody, ApiErrorObject, LuminousError};
pub use provider::ProviderError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
