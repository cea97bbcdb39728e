//! Paper entity

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown when a paper lists no authors
pub const UNKNOWN_AUTHORS: &str = "Unknown";

const SHORT_TITLE_LIMIT: usize = 80;
const SHORT_TITLE_KEEP: usize = 77;

/// One corpus entry. Immutable once ingested.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique identifier, usually an OpenAlex work URL
    pub id: String,

    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub venue: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,

    /// Ids of the works this paper cites
    #[serde(default, deserialize_with = "null_as_default")]
    pub referenced_works: Vec<String>,

    /// Reference count reported by the source; diagnostics only
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_json_reference_count: u32,
}

impl Paper {
    /// Create a paper with only an id and its references
    pub fn new(id: impl Into<String>, referenced_works: Vec<String>) -> Self {
        Self {
            id: id.into(),
            referenced_works,
            ..Default::default()
        }
    }

    /// Suffix after the last `/` of the id, or the whole id
    pub fn short_id(&self) -> &str {
        match self.id.rsplit_once('/') {
            Some((_, tail)) => tail,
            None => &self.id,
        }
    }

    /// Authors joined with ", " or a placeholder
    pub fn authors_text(&self) -> String {
        if self.authors.is_empty() {
            UNKNOWN_AUTHORS.to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// Title truncated to 77 characters plus "..." when longer than 80
    pub fn short_title(&self) -> String {
        if self.title.chars().count() > SHORT_TITLE_LIMIT {
            let mut short: String = self.title.chars().take(SHORT_TITLE_KEEP).collect();
            short.push_str("...");
            short
        } else {
            self.title.clone()
        }
    }
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
