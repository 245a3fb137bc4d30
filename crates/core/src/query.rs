//! Filter/sort state and its query-string codec
//!
//! The query string is the single source of truth for what the directory is
//! showing. [`decode`] never fails: anything it does not recognise falls back
//! to the default for that field, so a stale or hand-edited link still opens a
//! sensible view.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use url::form_urlencoded;

use crate::doctor::ConsultationMode;

const SEARCH_KEY: &str = "search";
const CONSULT_KEY: &str = "consult";
const SPECIALTY_KEY: &str = "specialty";
const SORT_KEY: &str = "sort";

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Cheapest first
    Fees,
    /// Most experienced first
    Experience,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Fees => "fees",
            SortOption::Experience => "experience",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortOption(pub String);

impl fmt::Display for UnknownSortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown sort option: {}. Valid options: fees, experience", self.0)
    }
}

impl std::error::Error for UnknownSortOption {}

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fees" => Ok(SortOption::Fees),
            "experience" => Ok(SortOption::Experience),
            other => Err(UnknownSortOption(other.to_string())),
        }
    }
}

/// Everything the user can change about the current view
///
/// Values are replaced, never edited: every `with_*` method consumes the state
/// and returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSortState {
    pub search_text: String,
    pub consultation: Option<ConsultationMode>,
    pub specialties: BTreeSet<String>,
    pub sort: Option<SortOption>,
}

impl FilterSortState {
    pub fn with_search(self, search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..self
        }
    }

    pub fn with_consultation(self, consultation: Option<ConsultationMode>) -> Self {
        Self {
            consultation,
            ..self
        }
    }

    /// Check or uncheck one specialty
    pub fn with_specialty(mut self, specialty: &str, selected: bool) -> Self {
        if selected {
            self.specialties.insert(specialty.to_string());
        } else {
            self.specialties.remove(specialty);
        }
        self
    }

    pub fn with_sort(self, sort: Option<SortOption>) -> Self {
        Self { sort, ..self }
    }

    /// True when no filter or ordering is active
    pub fn is_default(&self) -> bool {
        self == &FilterSortState::default()
    }
}

/// Serialize a state into a query string without the leading `?`
///
/// Fields at their default are omitted, so the default state encodes to an
/// empty string.
pub fn encode(state: &FilterSortState) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();

    if !state.search_text.is_empty() {
        pairs.push((SEARCH_KEY, state.search_text.as_str()));
    }

    if let Some(mode) = state.consultation {
        pairs.push((CONSULT_KEY, mode.as_str()));
    }

    for specialty in &state.specialties {
        pairs.push((SPECIALTY_KEY, specialty.as_str()));
    }

    if let Some(sort) = state.sort {
        pairs.push((SORT_KEY, sort.as_str()));
    }

    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Derive a state from a query string, with or without the leading `?`
///
/// Repeated `search`, `consult` and `sort` keys resolve to their first
/// occurrence. Unknown keys are ignored.
pub fn decode(query: &str) -> FilterSortState {
    let mut search_text: Option<String> = None;
    let mut consultation: Option<Option<ConsultationMode>> = None;
    let mut sort: Option<Option<SortOption>> = None;
    let mut specialties = BTreeSet::new();

    let query = query.strip_prefix('?').unwrap_or(query);

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            SEARCH_KEY if search_text.is_none() => search_text = Some(value.into_owned()),
            CONSULT_KEY if consultation.is_none() => consultation = Some(value.parse().ok()),
            SORT_KEY if sort.is_none() => sort = Some(value.parse().ok()),
            SPECIALTY_KEY => {
                specialties.insert(value.into_owned());
            }
            _ => {}
        }
    }

    FilterSortState {
        search_text: search_text.unwrap_or_default(),
        consultation: consultation.flatten(),
        specialties,
        sort: sort.flatten(),
    }
}

/// Pull the query component out of a full URL
///
/// Input is treated as a link when it has a scheme (`://`) or starts with `?`
/// or `/`; the result is then the text between the first `?` and any
/// `#fragment`. Anything else is assumed to already be a query string and is
/// returned as is, so a bare `search=what?x` keeps its literal `?`.
pub fn query_from_url(input: &str) -> &str {
    let is_link = input.contains("://") || input.starts_with(['?', '/']);
    if !is_link {
        return input;
    }

    match input.split_once('?') {
        Some((_, rest)) => rest.split('#').next().unwrap_or_default(),
        None => input,
    }
}
