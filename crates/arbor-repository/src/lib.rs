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

//! Client for one content-repository service.
//!
//! Layout: `fetch.rs` (the transport seam), `request.rs` (operation
//! descriptors and the settlement-observer contract), `repository.rs`
//! (operation entry points), `error.rs` (error primitives).
//!
//! The crate performs no network I/O itself: callers supply a [`Fetcher`]
//! and the repository classifies whatever it returns. Observers attached via
//! [`Repository::attach_observer`] are notified synchronously after each
//! operation's network call settles and before the operation returns, which
//! is the hook the event layer builds on.

pub mod error;
pub mod fetch;
pub mod repository;
pub mod request;

pub use error::{RepositoryError, RepositoryResult};
pub use fetch::{FetchMethod, FetchRequest, FetchResponse, Fetcher};
pub use repository::{
    CopyOptions, DeleteOptions, MoveOptions, PatchOptions, PostOptions, PutOptions, Repository,
};
pub use request::{
    ObserverKey, OperationKind, OperationObserver, OperationOutcome, OperationRequest,
};
