//! Core library for docfinder
//!
//! This crate implements the **Functional Core** of the docfinder application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`docfinder_core`** (this crate): Pure transformation functions with zero I/O
//! - **`docfinder`**: fetching the directory, configuration and presentation
//!   (the Imperative Shell)
//!
//! Every function here takes immutable inputs and returns a new value. Calling
//! any of them again with the same inputs gives the same answer, so the shell
//! simply recomputes the view whenever the doctor list or the query string
//! changes.
//!
//! # Module Organization
//!
//! - [`doctor`]: the doctor record and the tolerant payload parser
//! - [`query`]: filter/sort state and its query-string codec
//! - [`engine`]: search, filters, ordering and specialty extraction
//! - [`suggest`]: bounded name suggestions for a partial query
//! - [`view`]: output documents built from the list and a state
//!
//! # Example Usage
//!
//! ```rust
//! use docfinder_core::{compute, decode, parse_doctor_list};
//!
//! let doctors = parse_doctor_list(
//!     r#"[{"id": 1, "name": "Alice", "fee": 500}, {"id": 2, "name": "Bob", "fee": 300}]"#,
//! )
//! .unwrap();
//!
//! let state = decode("?sort=fees");
//! let visible = compute(&doctors, &state);
//!
//! assert_eq!(visible[0].name, "Bob");
//! ```

pub mod doctor;
pub mod engine;
pub mod query;
pub mod suggest;
pub mod view;

pub use doctor::{parse_doctor_list, ConsultationMode, DoctorRecord};
pub use engine::{all_specialties, available_consultation_modes, compute};
pub use query::{decode, encode, query_from_url, FilterSortState, SortOption};
pub use suggest::{suggest, SUGGESTION_LIMIT};
