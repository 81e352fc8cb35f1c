pub mod fetch;

pub use fetch::{FetchError, FetchResponse, Fetcher, InMemoryFetcher};
