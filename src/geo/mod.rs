//! Coarse IP-to-location lookup used by the geography rule.
//!
//! The analyzer only sees the `GeoLookup` trait. Which variant backs it
//! (static table, live HTTP, or disabled) is chosen once, up front, with
//! `build_geo_lookup`.

pub mod client;
pub mod static_table;
pub mod types;

pub use client::HttpGeoLookup;
pub use static_table::StaticGeoLookup;

use crate::utils::config::{LABEL_PRIVATE, WILDCARD};
use crate::utils::error::GeoError;
use log::info;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Maps an address to a coarse location label.
///
/// Implementations must return `None` for the wildcard and for empty
/// input, and must never fail: internal errors resolve to `"Unknown"`.
pub trait GeoLookup {
    fn lookup(&self, address: &str) -> Option<String>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Lookup that knows nothing; the geography rule never fires with it
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeoLookup;

impl GeoLookup for DisabledGeoLookup {
    fn lookup(&self, _address: &str) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Which lookup backs the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GeoMode {
    /// Deterministic first-octet table, no network access
    #[default]
    Static,
    /// Live HTTP geolocation with a local fallback label
    Live,
    /// No geography
    Off,
}

/// Build the lookup for a mode
///
/// **Public** - the only place a variant is selected
///
/// # Errors
/// * `GeoError::RequestFailed` - The HTTP client could not be built (live mode only)
pub fn build_geo_lookup(
    mode: GeoMode,
    endpoint: &str,
    timeout: Duration,
) -> Result<Box<dyn GeoLookup>, GeoError> {
    let lookup: Box<dyn GeoLookup> = match mode {
        GeoMode::Static => Box::new(StaticGeoLookup::new()),
        GeoMode::Live => Box::new(HttpGeoLookup::new(endpoint, timeout)?),
        GeoMode::Off => Box::new(DisabledGeoLookup),
    };

    info!("Geo lookup: {}", lookup.name());
    Ok(lookup)
}

/// True for input every lookup must answer with `None`
pub(crate) fn is_unresolvable(address: &str) -> bool {
    address.is_empty() || address == WILDCARD
}

/// Private, link-local and carrier-grade NAT ranges get a canonical label
pub(crate) fn private_label(address: &str) -> Option<String> {
    let ip: Ipv4Addr = address.parse().ok()?;
    let [a, b, ..] = ip.octets();
    let shared = a == 100 && (64..=127).contains(&b);

    (ip.is_private() || ip.is_link_local() || shared).then(|| LABEL_PRIVATE.to_string())
}
