mod error;
mod loader;
mod oem;
mod store;

pub use error::FeedError;
pub use loader::{FeedLoader, FeedSource};
pub use oem::{Dataset, Header, Metadata};
pub use store::DatasetStore;

#[cfg(test)]
pub(crate) use oem::tests::SAMPLE_OEM;
