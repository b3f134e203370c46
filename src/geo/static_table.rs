//! Offline geography heuristic keyed on the first octet.
//!
//! Deterministic and network-free. Labels are deliberately coarse
//! ("USA/Europe") because a first octet says little more than that.

use super::{is_unresolvable, private_label, GeoLookup};
use crate::utils::config::{LABEL_PRIVATE, LABEL_UNKNOWN};
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;

// Well-known addresses answered before the table
const SEEDED: &[(&str, &str)] = &[
    ("8.8.8.8", "USA"),
    ("1.1.1.1", "USA"),
    ("127.0.0.1", "Localhost"),
    ("0.0.0.0", "Invalid IP"),
];

/// Static table lookup with a per-process cache
#[derive(Debug)]
pub struct StaticGeoLookup {
    cache: RefCell<HashMap<String, String>>,
}

impl Default for StaticGeoLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticGeoLookup {
    pub fn new() -> Self {
        let cache = SEEDED
            .iter()
            .map(|(ip, label)| (ip.to_string(), label.to_string()))
            .collect();

        Self {
            cache: RefCell::new(cache),
        }
    }
}

impl GeoLookup for StaticGeoLookup {
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

        let label = label_for_address(address);
        debug!("Static geo: {} -> {}", address, label);
        self.cache
            .borrow_mut()
            .insert(address.to_string(), label.to_string());

        Some(label.to_string())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Region label for an address, by first octet
///
/// **Public** - exposed for testing
pub fn label_for_address(address: &str) -> &'static str {
    let first_octet = address
        .split('.')
        .next()
        .and_then(|octet| octet.parse::<u8>().ok());

    match first_octet {
        Some(octet) if address.contains('.') => label_for_first_octet(octet),
        _ => LABEL_UNKNOWN,
    }
}

fn label_for_first_octet(octet: u8) -> &'static str {
    match octet {
        1..=9 => "USA",
        10 => LABEL_PRIVATE,
        11..=126 => "USA/Europe",
        127 => "Localhost",
        128..=143 => "USA",
        144..=191 => "Europe/Asia",
        192 => LABEL_PRIVATE,
        193..=199 => "USA",
        200..=209 => "South America",
        210..=223 => "Asia",
        224..=239 => "Multicast",
        240..=255 => "Reserved",
        0 => LABEL_UNKNOWN,
    }
}
