//! Configuration for GeoJSON grid sources
//!
//! Options are plain serde records so hosts can build them in code, through
//! the presets below, or from a JSON blob handed over by their own config layer.

use crate::{
    core::{constants::DEFAULT_SUBDOMAINS, geo::Crs},
    data::{conversion::ConversionPolicy, projection::CoordinateSystem},
    tiles::transport::RequestOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSourceOptions {
    /// URL template, e.g. `"https://{s}.example.com/tiles/{z}/{x}/{y}.json?key={apikey}"`
    pub url_template: String,
    /// Values rotated through by `{s}`
    pub subdomains: Vec<String>,
    /// Substitute the bottom-origin Y for `{y}` (TMS tiling)
    pub tms: bool,
    /// CRS of the host map; `{-y}` is only available when it is finite
    pub crs: Crs,
    /// Extra template values such as API keys. Tile coordinate fields win on clashes.
    pub template_values: BTreeMap<String, String>,
    /// Passed through untouched to the transport
    pub fetch_options: RequestOptions,
    /// How point coordinates in the payload are interpreted
    pub coordinate_system: CoordinateSystem,
    /// What a non-Point feature does to the rest of its tile
    pub conversion_policy: ConversionPolicy,
}

impl Default for GridSourceOptions {
    fn default() -> Self {
        Self {
            url_template: String::new(),
            subdomains: DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            tms: false,
            crs: Crs::default(),
            template_values: BTreeMap::new(),
            fetch_options: RequestOptions::default(),
            coordinate_system: CoordinateSystem::default(),
            conversion_policy: ConversionPolicy::default(),
        }
    }
}

impl GridSourceOptions {
    /// Options for `url_template` with every other field at its default
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            ..Self::default()
        }
    }

    /// XYZ server behind `a`/`b`/`c` subdomains, sending cookies along
    pub fn openstreetmap_style(url_template: impl Into<String>) -> Self {
        let mut options = Self::new(url_template);
        options.fetch_options = RequestOptions::with_credentials();
        options
    }

    /// Deterministic options for tests: no subdomains, short timeout
    pub fn for_testing(url_template: impl Into<String>) -> Self {
        let mut options = Self::new(url_template);
        options.subdomains = Vec::new();
        options.fetch_options.timeout = Some(std::time::Duration::from_secs(1));
        options
    }

    /// Adds a template value such as an API key
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.template_values.insert(key.into(), value.into());
        self
    }

    pub fn with_tms(mut self, tms: bool) -> Self {
        self.tms = tms;
        self
    }

    pub fn with_conversion_policy(mut self, policy: ConversionPolicy) -> Self {
        self.conversion_policy = policy;
        self
    }

    pub fn with_coordinate_system(mut self, coordinate_system: CoordinateSystem) -> Self {
        self.coordinate_system = coordinate_system;
        self
    }
}
