//! Destination selection.
//!
//! The policy is a small decision table:
//!
//! ```text
//! area matched | carrier      | destination
//! -------------+--------------+------------------
//! no           | (ignored)    | generic_url
//! yes          | first match  | that carrier's url
//! yes          | none         | area_fallback_url
//! ```

use crate::config::CatalogConfig;
use crate::geo::LookupResult;
use crate::routing::matcher::{IspSubstring, Matcher, RegionMarker};

/// A compiled carrier rule.
#[derive(Debug)]
struct CarrierRoute {
    label: String,
    matcher: IspSubstring,
    url: String,
}

/// Outcome of evaluating the policy against one lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    Carrier { label: &'a str, url: &'a str },
    AreaFallback(&'a str),
    Generic(&'a str),
}

impl<'a> Destination<'a> {
    pub fn url(&self) -> &'a str {
        match *self {
            Destination::Carrier { url, .. } => url,
            Destination::AreaFallback(url) | Destination::Generic(url) => url,
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'a str {
        match *self {
            Destination::Carrier { label, .. } => label,
            Destination::AreaFallback(_) => "area_fallback",
            Destination::Generic(_) => "generic",
        }
    }
}

/// Immutable routing policy built from the destination catalog.
#[derive(Debug)]
pub struct RoutingPolicy {
    area: RegionMarker,
    carriers: Vec<CarrierRoute>,
    area_fallback_url: String,
    generic_url: String,
}

impl RoutingPolicy {
    pub fn from_config(catalog: &CatalogConfig) -> Self {
        let carriers = catalog
            .carriers
            .iter()
            .map(|c| CarrierRoute {
                label: c.label.clone(),
                matcher: IspSubstring::new(c.substring.clone()),
                url: c.url.clone(),
            })
            .collect();

        Self {
            area: RegionMarker::new(catalog.area_marker.clone()),
            carriers,
            area_fallback_url: catalog.area_fallback_url.clone(),
            generic_url: catalog.generic_url.clone(),
        }
    }

    /// Evaluate the decision table. Never fails.
    pub fn decide(&self, result: &LookupResult) -> Destination<'_> {
        if !self.area.matches(result) {
            return Destination::Generic(&self.generic_url);
        }

        self.carriers
            .iter()
            .find(|c| c.matcher.matches(result))
            .map(|c| Destination::Carrier {
                label: &c.label,
                url: &c.url,
            })
            .unwrap_or(Destination::AreaFallback(&self.area_fallback_url))
    }

    pub fn select_destination(&self, result: &LookupResult) -> &str {
        self.decide(result).url()
    }
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}
