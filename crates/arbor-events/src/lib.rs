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

//! Event-notification layer over the Arbor repository client.
//!
//! The [`EventHub`] attaches to one [`Repository`](arbor_repository::Repository)
//! and republishes each settled operation as typed success/failure events:
//! the interpreter (`interpret.rs`) classifies the outcome and extracts the
//! affected item(s), and the per-family channels (`channel.rs`) fan every
//! classified payload out to subscribers — one event per item per meaningful
//! outcome, published before the originating call returns to its caller.
//!
//! Layout: `channel.rs` (subscription channels), `payloads.rs` (event payload
//! types), `interpret.rs` (outcome classification), `hub.rs` (the hub binding
//! one dispatcher to one repository).

pub mod channel;
pub mod hub;
pub mod interpret;
pub mod payloads;

pub use channel::{Channel, SubscriptionKey};
pub use hub::EventHub;
pub use interpret::interpret;
pub use payloads::{
    CopyFailed, Copied, CreateFailed, Created, DeleteFailed, Deleted, ModificationFailed, Modified,
    MoveFailed, Moved, RepositoryEvent,
};
