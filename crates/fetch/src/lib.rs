//! Fetcher implementations for the stitch fragment composer.
//!
//! This crate provides concrete implementations of the `Fetcher` trait from
//! stitch-traits.
//!
//! ## Available Fetchers
//!
//! - [`HttpFetcher`]: Blocking HTTP(S) requests via `ureq`
//! - [`DirectoryFetcher`]: Serves fragment sources from a local directory
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory fetcher from stitch-traits:
//! - [`InMemoryFetcher`]: Fixed route table

mod directory;
mod http;

pub use directory::DirectoryFetcher;
pub use http::{HttpConfig, HttpFetcher};

// Re-export the in-memory fetcher from stitch-traits for convenience
pub use stitch_traits::InMemoryFetcher;
