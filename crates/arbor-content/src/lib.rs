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

//! Content data model shared across the Arbor client crates.
//!
//! Layout: `model.rs` (content records and identifier references),
//! `odata.rs` (wire envelopes mirroring the server's OData conventions).

pub mod model;
pub mod odata;

pub use model::{Content, ContentArg, ContentRef};
pub use odata::{BatchBody, BatchError, ODataBatch, ODataSingle};
