//! Content records and the identifier references used to address them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An item stored in the content repository.
///
/// Identity fields are typed; every other server field is carried opaquely in
/// [`Content::fields`] and forwarded to consumers untouched. A record built
/// from a bare identifier (see [`ContentRef::to_content`]) carries exactly
/// that identity and nothing else, and serializes without the absent fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Numeric identifier assigned by the server.
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Repository path of the item.
    #[serde(rename = "Path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Display name of the item.
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Remaining server fields, forwarded verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Content {
    /// Identity-only record for a numeric identifier.
    #[must_use]
    pub fn from_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Identity-only record for a repository path.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

/// A single id-or-path reference addressing one content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRef {
    /// Numeric identifier.
    Id(i64),
    /// Repository path.
    Path(String),
}

impl ContentRef {
    /// Best-effort content record carrying only this identity.
    ///
    /// Used when an operation settles without a server-resolved body; the
    /// record deliberately holds nothing beyond the original identifier.
    #[must_use]
    pub fn to_content(&self) -> Content {
        match self {
            Self::Id(id) => Content::from_id(*id),
            Self::Path(path) => Content::from_path(path.clone()),
        }
    }
}

impl From<i64> for ContentRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ContentRef {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for ContentRef {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

/// Identifier reference supplied to an operation: one item or an ordered batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentArg {
    /// A single id-or-path.
    One(ContentRef),
    /// An ordered sequence of ids and/or paths.
    Many(Vec<ContentRef>),
}

impl ContentArg {
    /// Iterate the references, treating a singular argument as a one-element
    /// sequence.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentRef> {
        match self {
            Self::One(reference) => std::slice::from_ref(reference).iter(),
            Self::Many(references) => references.iter(),
        }
    }

    /// Number of referenced items.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(references) => references.len(),
        }
    }

    /// True when the reference addresses no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<ContentRef> for ContentArg {
    fn from(reference: ContentRef) -> Self {
        Self::One(reference)
    }
}

impl From<i64> for ContentArg {
    fn from(id: i64) -> Self {
        Self::One(ContentRef::Id(id))
    }
}

impl From<&str> for ContentArg {
    fn from(path: &str) -> Self {
        Self::One(ContentRef::from(path))
    }
}

impl From<String> for ContentArg {
    fn from(path: String) -> Self {
        Self::One(ContentRef::Path(path))
    }
}

impl From<Vec<ContentRef>> for ContentArg {
    fn from(references: Vec<ContentRef>) -> Self {
        Self::Many(references)
    }
}

impl<'a> IntoIterator for &'a ContentArg {
    type Item = &'a ContentRef;
    type IntoIter = std::slice::Iter<'a, ContentRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
