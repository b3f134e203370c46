//! Response types for the live geolocation endpoint.
//!
//! Shaped after ip-api.com's JSON API (`/json/<ip>?fields=status,country,message`).

use serde::Deserialize;

/// Query fields requested from the endpoint
pub const GEO_FIELDS: &str = "status,country,message";

/// JSON response body
#[derive(Debug, Deserialize)]
pub struct GeoApiResponse {
    /// `"success"` or `"fail"`
    pub status: String,

    #[serde(default)]
    pub country: Option<String>,

    /// Failure reason when `status` is `"fail"`
    #[serde(default)]
    pub message: Option<String>,
}

impl GeoApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
