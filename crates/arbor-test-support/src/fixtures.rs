//! Content records and response bodies shared by the event suites.

use arbor_content::Content;
use serde_json::{Value, json};

/// The content record used across the event suites: `Id` 123 under
/// `Root/Example`.
#[must_use]
pub fn mock_content() -> Content {
    Content {
        id: Some(123),
        path: Some("Root/Example".to_owned()),
        name: Some("sample".to_owned()),
        fields: serde_json::Map::new(),
    }
}

/// Ok single-item envelope wrapping `content`.
#[must_use]
pub fn single_body(content: &Content) -> Value {
    json!({ "d": content })
}

/// Ok batch envelope with the given results and `(error, content)` failures.
#[must_use]
pub fn batch_body(results: &[Content], errors: &[(Value, Content)]) -> Value {
    let errors: Vec<Value> = errors
        .iter()
        .map(|(error, content)| json!({ "error": error, "content": content }))
        .collect();
    json!({
        "d": {
            "__count": results.len() + errors.len(),
            "results": results,
            "errors": errors,
        }
    })
}
