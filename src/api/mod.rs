mod client;
mod fetch;
mod sync;

pub use client::ApiClient;
pub use fetch::Fetched;
pub use sync::DEFAULT_SYNC_PER_PAGE;
