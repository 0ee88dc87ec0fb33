//! Case-insensitive search over record collections.

use statelog_core::{Approval, OriginRecord, Transaction};
use statelog_ingestion::ClassifiedApproval;

/// A lowercased search term. The empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether any of `fields` contains the term.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
        self.is_empty()
            || fields
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&self.term))
    }
}

/// Records that can be searched.
pub trait Searchable {
    /// Fields the search term is matched against.
    fn search_fields(&self) -> Vec<Option<&str>>;

    fn matches(&self, query: &SearchQuery) -> bool {
        query.matches_any(self.search_fields())
    }
}

impl Searchable for Transaction {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.hash.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
            self.origin.as_deref(),
        ]
    }
}

impl Searchable for Approval {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![self.origin.as_deref(), self.approval_type.as_deref()]
    }
}

impl Searchable for ClassifiedApproval {
    fn search_fields(&self) -> Vec<Option<&str>> {
        self.approval.search_fields()
    }
}

impl Searchable for OriginRecord {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.origin.as_str())]
    }
}

/// Records matching `query`, in their original order.
pub fn filter_records<'a, T: Searchable>(records: &'a [T], query: &SearchQuery) -> Vec<&'a T> {
    records.iter().filter(|r| r.matches(query)).collect()
}
