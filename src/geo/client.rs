//! Live geolocation over HTTP.
//!
//! Every failure (timeout, HTTP status, bad body, `"fail"` status) is
//! logged and folded into the `"Unknown"` label so the analyzer never
//! sees an error.

use super::types::{GeoApiResponse, GEO_FIELDS};
use super::{is_unresolvable, private_label, GeoLookup};
use crate::utils::config::LABEL_UNKNOWN;
use crate::utils::error::GeoError;
use log::{debug, warn};
use reqwest::blocking::Client;
use std::cell::RefCell;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Geolocation client with a per-process answer cache
pub struct HttpGeoLookup {
    client: Client,
    endpoint: String,
    cache: RefCell<HashMap<String, String>>,
}

impl HttpGeoLookup {
    /// Create a new client
    ///
    /// # Arguments
    /// * `endpoint` - Base URL; the address is appended as a path segment
    /// * `timeout` - Budget for each request
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GeoError::RequestFailed)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            cache: RefCell::new(HashMap::new()),
        })
    }

    fn request_url(&self, address: &str) -> String {
        format!(
            "{}/{}?fields={}",
            self.endpoint.trim_end_matches('/'),
            address,
            GEO_FIELDS
        )
    }

    /// Query the endpoint for one public address
    fn fetch_country(&self, address: &str) -> Result<String, GeoError> {
        let url = self.request_url(address);
        debug!("Geo request: {}", url);

        let response = self.client.get(&url).send()?;

        if !response.status().is_success() {
            return Err(GeoError::InvalidResponse(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: GeoApiResponse = response.json()?;

        if !body.is_success() {
            return Err(GeoError::InvalidResponse(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }

        body.country
            .filter(|country| !country.is_empty())
            .ok_or_else(|| GeoError::InvalidResponse("Missing country field".to_string()))
    }
}

impl GeoLookup for HttpGeoLookup {
    fn lookup(&self, address: &str) -> Option<String> {
        if is_unresolvable(address) {
            return None;
        }

        if let Some(label) = private_label(address) {
            return Some(label);
        }

        if let Some(label) = self.cache.borrow().get(address) {
            return Some(label.clone());
        }

        // Never send anything that is not a plain IPv4 address
        let label = if address.parse::<Ipv4Addr>().is_err() {
            LABEL_UNKNOWN.to_string()
        } else {
            match self.fetch_country(address) {
                Ok(country) => country,
                Err(e) => {
                    warn!("Geo lookup for {} failed: {}", address, e);
                    LABEL_UNKNOWN.to_string()
                }
            }
        };

        self.cache
            .borrow_mut()
            .insert(address.to_string(), label.clone());

        Some(label)
    }

    fn name(&self) -> &'static str {
        "live"
    }
}
