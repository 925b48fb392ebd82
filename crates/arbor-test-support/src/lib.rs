#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Shared test helpers used across the Arbor integration suites.
//! Layout: fixtures.rs (content records and response bodies), mocks.rs
//! (scripted fetchers and the payload recorder).

pub mod fixtures;
pub mod mocks;

pub use fixtures::{batch_body, mock_content, single_body};
pub use mocks::{FailingFetcher, Recorder, StaticFetcher};
