//! Wire envelopes mirroring the server's OData conventions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Content;

/// Envelope for single-item responses: `{ "d": { ...content } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ODataSingle {
    /// The resolved content record.
    pub d: Content,
}

/// Envelope for batch-capable responses:
/// `{ "d": { "__count": n, "results": [...], "errors": [...] } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ODataBatch {
    /// The batch body.
    pub d: BatchBody,
}

/// Body of a batch response, partitioning submitted items into successes and
/// failures.
///
/// `results` and `errors` together account for every submitted item, each item
/// appearing in at most one of the two. Missing collections deserialize as
/// empty so a sparse body never fails interpretation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchBody {
    /// Number of items the server processed.
    #[serde(rename = "__count", default)]
    pub count: u64,
    /// Items processed successfully, in submission order.
    #[serde(default)]
    pub results: Vec<Content>,
    /// Per-item failures, in submission order.
    #[serde(default)]
    pub errors: Vec<BatchError>,
}

/// One failed entry of a batch response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchError {
    /// Server-supplied error description, kept opaque.
    #[serde(default)]
    pub error: Value,
    /// The offending item, when the server could resolve one.
    #[serde(default)]
    pub content: Option<Content>,
}
