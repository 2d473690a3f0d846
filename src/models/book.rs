//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier, never reused
    pub id: String,
    pub name: String,
    #[schema(value_type = Option<Object>)]
    pub year: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub author: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub summary: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub publisher: Option<Value>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    /// Derived: true when readPage equals pageCount
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from an already validated payload
    pub(crate) fn from_payload(
        id: String,
        name: String,
        payload: &BookPayload,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            year: payload.year.clone(),
            author: payload.author.clone(),
            summary: payload.summary.clone(),
            publisher: payload.publisher.clone(),
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished: is_finished(payload.page_count, payload.read_page),
            reading: payload.reading.unwrap_or(false),
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping `id` and `inserted_at`
    pub(crate) fn apply(&mut self, name: String, payload: &BookPayload, now: DateTime<Utc>) {
        self.name = name;
        self.year = payload.year.clone();
        self.author = payload.author.clone();
        self.summary = payload.summary.clone();
        self.publisher = payload.publisher.clone();
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading.unwrap_or(false);
        self.finished = is_finished(self.page_count, self.read_page);
        self.updated_at = now;
    }

    /// Whether the record carries enough to be listed
    pub fn is_listable(&self) -> bool {
        !self.name.is_empty() || !self.id.is_empty() || self.publisher.is_some()
    }

    pub fn to_summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// A book counts as finished once every page has been read.
/// Both counts absent compares as equal.
pub fn is_finished(page_count: Option<u32>, read_page: Option<u32>) -> bool {
    page_count == read_page
}

/// Create / update request body.
/// `year`, `author`, `summary` and `publisher` are free-form and stored as sent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub year: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub author: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub summary: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub publisher: Option<Value>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Name if present and non-empty
    pub fn valid_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// True when both page counts are given and readPage is past the end
    pub fn read_page_exceeds_page_count(&self) -> bool {
        matches!(
            (self.read_page, self.page_count),
            (Some(read), Some(total)) if read > total
        )
    }
}

/// List projection of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[schema(value_type = Option<Object>)]
    pub publisher: Option<Value>,
}

/// List filter. Criteria are not combined: `reading` wins over `finished`,
/// which wins over `name`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// 1 for books being read, 0 for the others
    #[serde(default, deserialize_with = "deserialize_flag")]
    #[param(value_type = Option<String>)]
    pub reading: Option<bool>,
    /// 1 for finished books, 0 for the others
    #[serde(default, deserialize_with = "deserialize_flag")]
    #[param(value_type = Option<String>)]
    pub finished: Option<bool>,
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
}

impl BookQuery {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(reading) = self.reading {
            book.reading == reading
        } else if let Some(finished) = self.finished {
            book.finished == finished
        } else if let Some(ref name) = self.name {
            book.name.to_lowercase().contains(&name.to_lowercase())
        } else {
            true
        }
    }
}

/// Query-string flag: `1`/`0` or `true`/`false`. An empty value counts as absent.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("1") | Some("true") => Ok(Some(true)),
        Some("0") | Some("false") => Ok(Some(false)),
        Some(other) => Err(de::Error::custom(format!(
            "expected 0 or 1, got '{}'",
            other
        ))),
    }
}
