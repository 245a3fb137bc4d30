//! Filtering and sorting of the doctor list
//!
//! [`compute`] is the whole pipeline: name search, consultation mode,
//! specialties, then ordering. The steps run in that fixed order and each is
//! available on its own.
//!
//! Records missing the sort key (no fee, no experience) are placed after every
//! record that has it, whichever direction the sort runs, and keep their
//! relative order among themselves.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::doctor::{ConsultationMode, DoctorRecord};
use crate::query::{FilterSortState, SortOption};

/// Produce the visible, ordered list for a state
///
/// Pure and deterministic. Returns references into `records` so the source list
/// is never copied or reordered.
pub fn compute<'a>(
    records: &'a [DoctorRecord],
    state: &FilterSortState,
) -> Vec<&'a DoctorRecord> {
    let matches = search_by_name(records.iter(), &state.search_text);
    let matches = filter_by_consultation(matches, state.consultation);
    let matches = filter_by_specialties(matches, &state.specialties);
    sort_records(matches, state.sort)
}

/// Keep records whose name contains `query`, ignoring case
///
/// A blank query keeps everything. Records without a name never match a
/// non-blank query.
pub fn search_by_name<'a, I>(records: I, query: &str) -> Vec<&'a DoctorRecord>
where
    I: IntoIterator<Item = &'a DoctorRecord>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.into_iter().collect();
    }

    records
        .into_iter()
        .filter(|doctor| name_matches(doctor, &needle))
        .collect()
}

pub fn filter_by_consultation(
    records: Vec<&DoctorRecord>,
    mode: Option<ConsultationMode>,
) -> Vec<&DoctorRecord> {
    match mode {
        Some(mode) => records.into_iter().filter(|d| d.offers(mode)).collect(),
        None => records,
    }
}

/// Keep records sharing at least one specialty with `selected`
pub fn filter_by_specialties<'a>(
    records: Vec<&'a DoctorRecord>,
    selected: &BTreeSet<String>,
) -> Vec<&'a DoctorRecord> {
    if selected.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|doctor| doctor.specialties.iter().any(|s| selected.contains(s)))
        .collect()
}

/// Stable sort by the chosen key; `None` leaves the order untouched
pub fn sort_records(
    mut records: Vec<&DoctorRecord>,
    sort: Option<SortOption>,
) -> Vec<&DoctorRecord> {
    match sort {
        Some(SortOption::Fees) => {
            records.sort_by(|a, b| missing_last(a.fee, b.fee, |x, y| x.total_cmp(y)));
        }
        Some(SortOption::Experience) => {
            records.sort_by(|a, b| {
                missing_last(a.experience_years, b.experience_years, |x, y| y.cmp(x))
            });
        }
        None => {}
    }
    records
}

/// Every distinct specialty across the list, in lexicographic order
pub fn all_specialties(records: &[DoctorRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|doctor| doctor.specialties.iter())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Distinct consultation modes offered by at least one record
pub fn available_consultation_modes(records: &[DoctorRecord]) -> Vec<ConsultationMode> {
    let offered: HashSet<ConsultationMode> = records
        .iter()
        .flat_map(|doctor| doctor.consultation_types.iter().copied())
        .collect();

    ConsultationMode::ALL
        .into_iter()
        .filter(|mode| offered.contains(mode))
        .collect()
}

pub(crate) fn name_matches(doctor: &DoctorRecord, lowercase_needle: &str) -> bool {
    !doctor.name.is_empty() && doctor.name.to_lowercase().contains(lowercase_needle)
}

fn missing_last<T, F>(a: Option<T>, b: Option<T>, cmp: F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_doctor(
        id: u64,
        name: &str,
        fee: Option<f64>,
        experience: Option<u32>,
        specialties: &[&str],
        modes: &[ConsultationMode],
    ) -> DoctorRecord {
        DoctorRecord {
            id,
            name: name.to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            qualification: Some("MBBS".to_string()),
            experience_years: experience,
            clinic_name: Some("City Clinic".to_string()),
            area: Some("Koramangala".to_string()),
            consultation_types: modes.to_vec(),
            fee,
            image: None,
        }
    }

    fn alice_and_bob() -> Vec<DoctorRecord> {
        vec![
            create_test_doctor(
                1,
                "Alice",
                Some(500.0),
                Some(3),
                &["Cardiology"],
                &[ConsultationMode::InClinic],
            ),
            create_test_doctor(
                2,
                "Bob",
                Some(300.0),
                Some(10),
                &["Dermatology"],
                &[ConsultationMode::VideoConsult],
            ),
        ]
    }

    fn create_test_directory() -> Vec<DoctorRecord> {
        use ConsultationMode::{InClinic, VideoConsult};

        vec![
            create_test_doctor(1, "Dr. Asha Rao", Some(500.0), Some(12), &["Dentist"], &[InClinic]),
            create_test_doctor(
                2,
                "Dr. Rahul Mehta",
                Some(300.0),
                Some(5),
                &["General Physician", "Dentist"],
                &[VideoConsult, InClinic],
            ),
            create_test_doctor(3, "", Some(100.0), None, &["Homeopath"], &[VideoConsult]),
            create_test_doctor(4, "Dr. Priya Raman", None, Some(20), &["Homeopath"], &[]),
            create_test_doctor(
                5,
                "Dr. Arun Kumar",
                Some(300.0),
                Some(5),
                &["General Physician"],
                &[VideoConsult],
            ),
        ]
    }

    fn ids(records: &[&DoctorRecord]) -> Vec<u64> {
        records.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_compute_sort_by_fee_scenario() {
        let records = alice_and_bob();
        let state = FilterSortState::default().with_sort(Some(SortOption::Fees));

        let names: Vec<&str> = compute(&records, &state)
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();

        assert_eq!(names, vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_compute_specialty_scenario() {
        let records = alice_and_bob();
        let state = FilterSortState::default().with_specialty("Cardiology", true);

        let result = compute(&records, &state);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Alice");
    }

    #[test]
    fn test_compute_default_state_is_identity() {
        let records = create_test_directory();

        let result = compute(&records, &FilterSortState::default());

        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_compute_empty_input() {
        let state = FilterSortState::default()
            .with_search("rao")
            .with_sort(Some(SortOption::Experience));

        assert!(compute(&[], &state).is_empty());
    }

    #[test]
    fn test_compute_is_deterministic() {
        let records = create_test_directory();
        let state = FilterSortState::default()
            .with_search("dr")
            .with_sort(Some(SortOption::Fees));

        let first = ids(&compute(&records, &state));
        let second = ids(&compute(&records, &state));

        assert_eq!(first, second);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = create_test_directory();

        assert_eq!(ids(&search_by_name(&records, "RA")), vec![1, 2, 4]);
        assert_eq!(ids(&search_by_name(&records, "mehta")), vec![2]);
        assert_eq!(ids(&search_by_name(&records, "  kumar  ")), vec![5]);
    }

    #[test]
    fn test_search_blank_keeps_everything() {
        let records = create_test_directory();

        assert_eq!(ids(&search_by_name(&records, "")), vec![1, 2, 3, 4, 5]);
        assert_eq!(ids(&search_by_name(&records, "   ")), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_excludes_unnamed_records() {
        let records = create_test_directory();

        let result = search_by_name(&records, "r");

        assert!(!ids(&result).contains(&3));
    }

    #[test]
    fn test_filter_by_consultation() {
        let records = create_test_directory();
        let all: Vec<&DoctorRecord> = records.iter().collect();

        let video = filter_by_consultation(all.clone(), Some(ConsultationMode::VideoConsult));
        let clinic = filter_by_consultation(all.clone(), Some(ConsultationMode::InClinic));
        let any = filter_by_consultation(all, None);

        assert_eq!(ids(&video), vec![2, 3, 5]);
        assert_eq!(ids(&clinic), vec![1, 2]);
        assert_eq!(ids(&any), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_filter_by_specialties_is_disjunctive() {
        let records = create_test_directory();
        let selected: BTreeSet<String> = ["Dentist", "Homeopath"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let result = filter_by_specialties(records.iter().collect(), &selected);

        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_by_unknown_specialty_is_empty() {
        let records = create_test_directory();
        let selected: BTreeSet<String> = ["Cardiology".to_string()].into_iter().collect();

        assert!(filter_by_specialties(records.iter().collect(), &selected).is_empty());
    }

    #[test]
    fn test_filters_compose_as_intersection() {
        let records = create_test_directory();
        let consult_only =
            FilterSortState::default().with_consultation(Some(ConsultationMode::VideoConsult));
        let specialty_only = FilterSortState::default().with_specialty("General Physician", true);
        let both = consult_only.clone().with_specialty("General Physician", true);

        let a: HashSet<u64> = ids(&compute(&records, &consult_only)).into_iter().collect();
        let b: HashSet<u64> = ids(&compute(&records, &specialty_only)).into_iter().collect();
        let combined: HashSet<u64> = ids(&compute(&records, &both)).into_iter().collect();

        let expected: HashSet<u64> = a.intersection(&b).copied().collect();
        assert_eq!(combined, expected);
        assert_eq!(combined, HashSet::from([2u64, 5]));
    }

    #[test]
    fn test_all_filters_active() {
        let records = create_test_directory();
        let state = FilterSortState::default()
            .with_search("dr.")
            .with_consultation(Some(ConsultationMode::InClinic))
            .with_specialty("Dentist", true)
            .with_specialty("Homeopath", true)
            .with_sort(Some(SortOption::Fees));

        assert_eq!(ids(&compute(&records, &state)), vec![2, 1]);
    }

    #[test]
    fn test_sort_by_fee_is_stable() {
        let records = create_test_directory();
        let state = FilterSortState::default().with_sort(Some(SortOption::Fees));

        // 2 and 5 share a fee of 300 and must keep their input order
        assert_eq!(ids(&compute(&records, &state)), vec![3, 2, 5, 1, 4]);
    }

    #[test]
    fn test_sort_by_experience_descending() {
        let records = create_test_directory();
        let state = FilterSortState::default().with_sort(Some(SortOption::Experience));

        assert_eq!(ids(&compute(&records, &state)), vec![4, 1, 2, 5, 3]);
    }

    #[test]
    fn test_sort_missing_values_go_last() {
        let records = vec![
            create_test_doctor(1, "A", None, None, &[], &[]),
            create_test_doctor(2, "B", Some(0.0), Some(0), &[], &[]),
            create_test_doctor(3, "C", None, None, &[], &[]),
            create_test_doctor(4, "D", Some(50.0), Some(1), &[], &[]),
        ];

        let by_fee = sort_records(records.iter().collect(), Some(SortOption::Fees));
        let by_experience = sort_records(records.iter().collect(), Some(SortOption::Experience));

        assert_eq!(ids(&by_fee), vec![2, 4, 1, 3]);
        assert_eq!(ids(&by_experience), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_sort_none_preserves_order() {
        let records = create_test_directory();
        let result = sort_records(records.iter().rev().collect(), None);
        assert_eq!(ids(&result), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_compute_does_not_touch_source() {
        let records = create_test_directory();
        let before = records.clone();
        let state = FilterSortState::default().with_sort(Some(SortOption::Experience));

        let _ = compute(&records, &state);

        assert_eq!(records, before);
    }

    #[test]
    fn test_all_specialties_sorted_and_unique() {
        let records = create_test_directory();

        let specialties = all_specialties(&records);

        assert_eq!(specialties, vec!["Dentist", "General Physician", "Homeopath"]);
    }

    #[test]
    fn test_all_specialties_empty() {
        assert!(all_specialties(&[]).is_empty());
        let records = vec![create_test_doctor(1, "A", None, None, &[], &[])];
        assert!(all_specialties(&records).is_empty());
    }

    #[test]
    fn test_available_consultation_modes() {
        let records = create_test_directory();
        assert_eq!(
            available_consultation_modes(&records),
            vec![ConsultationMode::VideoConsult, ConsultationMode::InClinic]
        );

        let clinic_only = vec![create_test_doctor(
            1,
            "A",
            None,
            None,
            &[],
            &[ConsultationMode::InClinic],
        )];
        assert_eq!(
            available_consultation_modes(&clinic_only),
            vec![ConsultationMode::InClinic]
        );
    }
}
