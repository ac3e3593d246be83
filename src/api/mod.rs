//! Customer store API module

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod store;

#[cfg(test)]
pub(crate) mod stub_server;

pub use auth::{AuthManager, StoreCredentials};
pub use client::MagentoClient;
pub use endpoints::SearchCriteria;
pub use store::{get_all_customers, CustomerStore};

/// First `max_chars` characters of a response body, for log messages
pub(crate) fn body_preview(body: &str, max_chars: usize) -> &str {
    body.char_indices()
        .nth(max_chars)
        .map_or(body, |(i, _)| &body[..i])
}
