//! Output models for the shell
//!
//! Pure builders that combine the doctor list with a state into the documents
//! the shell prints, either as text or as JSON.

use serde::Serialize;

use crate::doctor::{ConsultationMode, DoctorRecord};
use crate::engine::{all_specialties, compute};
use crate::query::{encode, FilterSortState};
use crate::suggest::suggest;

/// Everything needed to render one search result page
#[derive(Debug, Serialize, Clone)]
pub struct DirectoryView {
    /// Canonical query string for the state, without the leading `?`
    pub query: String,
    pub state: FilterSortState,
    pub heading: String,
    pub total: usize,
    /// Filter options, derived from the full list rather than the results
    pub specialties: Vec<String>,
    pub doctors: Vec<DoctorRecord>,
}

/// One entry of the autocomplete list
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Suggestion {
    pub id: u64,
    pub name: String,
    pub specialties: Vec<String>,
    /// Query string that selects this doctor by name
    pub query: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct SuggestionOutput {
    pub partial: String,
    pub suggestions: Vec<Suggestion>,
}

/// "No doctors found", "1 doctor found", "12 doctors found"
pub fn results_heading(count: usize) -> String {
    match count {
        0 => "No doctors found".to_string(),
        1 => "1 doctor found".to_string(),
        n => format!("{n} doctors found"),
    }
}

pub fn build_directory_view(records: &[DoctorRecord], state: FilterSortState) -> DirectoryView {
    let doctors: Vec<DoctorRecord> = compute(records, &state).into_iter().cloned().collect();

    DirectoryView {
        query: encode(&state),
        heading: results_heading(doctors.len()),
        total: doctors.len(),
        specialties: all_specialties(records),
        doctors,
        state,
    }
}

/// Suggestions for a partial query
///
/// Picking a suggestion searches for that doctor's full name while keeping the
/// rest of `state`, so each entry carries the query string of that next view.
pub fn build_suggestions(
    records: &[DoctorRecord],
    partial: &str,
    state: &FilterSortState,
) -> SuggestionOutput {
    let suggestions = suggest(records, partial)
        .into_iter()
        .map(|doctor| Suggestion {
            id: doctor.id,
            name: doctor.display_name().to_string(),
            specialties: doctor.specialties.clone(),
            query: encode(&state.clone().with_search(doctor.name.clone())),
        })
        .collect();

    SuggestionOutput {
        partial: partial.to_string(),
        suggestions,
    }
}

/// Fee as shown to users, e.g. "₹500" or "₹499.50"
pub fn format_fee(fee: Option<f64>) -> String {
    match fee {
        Some(amount) if amount.fract() == 0.0 => format!("₹{amount:.0}"),
        Some(amount) => format!("₹{amount:.2}"),
        None => "n/a".to_string(),
    }
}

pub fn format_experience(years: Option<u32>) -> String {
    match years {
        Some(1) => "1 year".to_string(),
        Some(n) => format!("{n} years"),
        None => "n/a".to_string(),
    }
}

pub fn format_modes(modes: &[ConsultationMode]) -> String {
    if modes.is_empty() {
        return "n/a".to_string();
    }

    modes
        .iter()
        .map(|mode| mode.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
