//! Tile URL construction: templates, subdomain rotation and per-tile values

use crate::core::{config::GridSourceOptions, geo::TileCoord};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> Result<String>;
}

/// Picks the `{s}` value for a tile. Must be deterministic per coordinate.
pub trait SubdomainSelector: Send + Sync {
    fn select(&self, coord: TileCoord, subdomains: &[String]) -> String;
}

impl<F> SubdomainSelector for F
where
    F: Fn(TileCoord, &[String]) -> String + Send + Sync,
{
    fn select(&self, coord: TileCoord, subdomains: &[String]) -> String {
        self(coord, subdomains)
    }
}

/// Spreads neighbouring tiles across subdomains by `(x + y) mod n`
#[derive(Debug, Clone, Copy, Default)]
pub struct RotatingSubdomains;

impl SubdomainSelector for RotatingSubdomains {
    fn select(&self, coord: TileCoord, subdomains: &[String]) -> String {
        if subdomains.is_empty() {
            return String::new();
        }
        let idx = ((coord.x as u64 + coord.y as u64) % subdomains.len() as u64) as usize;
        subdomains[idx].clone()
    }
}

/// URL template with `{key}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Replaces every `{key}` with its value. Surrounding spaces inside the
    /// braces are ignored; braces around anything other than word characters,
    /// `-` and spaces are kept literally.
    pub fn render(&self, values: &BTreeMap<String, String>) -> Result<String> {
        let mut out = String::with_capacity(self.template.len() + 16);
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return Ok(out);
            };

            let raw = &after[..close];
            if !is_placeholder(raw) {
                out.push('{');
                rest = after;
                continue;
            }

            let key = raw.trim();
            let value = values.get(key).ok_or_else(|| {
                Error::Template(format!("no value provided for variable {{{}}}", key))
            })?;
            out.push_str(value);
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn is_placeholder(raw: &str) -> bool {
    !raw.trim().is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ' ')
}

/// Builds the substitution record for one tile request.
///
/// Starts from the configured template values, then sets `s`, `x`, `y`, `z`
/// and, on finite CRSs, `-y`. With `tms` enabled `y` carries the inverted row.
/// Fails on a finite CRS when the zoom is too deep to count rows.
pub fn tile_template_values(
    options: &GridSourceOptions,
    subdomain: String,
    coord: TileCoord,
) -> Result<BTreeMap<String, String>> {
    let mut values = options.template_values.clone();
    values.insert("s".to_string(), subdomain);
    values.insert("x".to_string(), coord.x.to_string());
    values.insert("y".to_string(), coord.y.to_string());
    values.insert("z".to_string(), coord.z.to_string());

    if options.crs.is_finite() {
        let inverted_y = coord
            .inverted_y()
            .ok_or_else(|| {
                Error::InvalidCoordinates(format!("zoom {} has no finite tile range", coord.z))
            })?
            .to_string();
        if options.tms {
            values.insert("y".to_string(), inverted_y.clone());
        }
        values.insert("-y".to_string(), inverted_y);
    }

    Ok(values)
}
