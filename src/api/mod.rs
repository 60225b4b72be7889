//! Quote API client module for JSON-over-HTTP communication

mod client;
mod error;
mod traits;

pub use client::{QuoteApiClient, DEFAULT_API_HOST};
pub use error::ApiError;
pub use traits::{FetchResponse, QuoteApi, SaveResponse, SubmitResponse};

#[cfg(test)]
pub use traits::MockQuoteApi;
