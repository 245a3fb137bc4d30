//! Remote doctor list
//!
//! A single GET against the configured endpoint. Transport errors, non-success
//! statuses and bodies that are not a doctor array each map to their own
//! [`Error`] variant. There is no retry and no cache.

use crate::prelude::*;
use docfinder_core::{parse_doctor_list, DoctorRecord};

pub const DEFAULT_API_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

#[derive(Debug, Clone)]
pub struct DoctorSource {
    client: reqwest::Client,
    url: String,
}

impl DoctorSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the whole list, preserving the order it was served in
    pub async fn fetch_all(&self) -> Result<Vec<DoctorRecord>, Error> {
        log::debug!("Fetching doctor list from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Network(f!("Failed to fetch {}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(f!("Failed to read response from {}: {}", self.url, e)))?;

        let doctors =
            parse_doctor_list(&body).map_err(|e| Error::MalformedPayload(e.to_string()))?;

        log::info!("Loaded {} doctors from {}", doctors.len(), self.url);

        Ok(doctors)
    }
}
