//! Recovery of parcel fields from a record's previous description
//!
//! Each field is matched independently against the prior description
//! markup and replaced by its fallback when its pattern does not match.
//! A miss is never an error.

use rand::Rng;
use regex::Regex;

use crate::config::FallbackConfig;
use crate::synth::random;

/// Unit suffix area values carry in descriptions
pub const AREA_UNIT: &str = "m²";

/// Where an extracted value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Description,
    Fallback,
}

/// Location and size fields of one parcel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub area: String,
    pub neighborhood: String,
    pub street: String,
    pub full_address: String,
    pub latitude: String,
    pub longitude: String,
    /// Provenance per field, in extraction order
    pub sources: Vec<(&'static str, Source)>,
}

impl ExtractedFields {
    /// Names of the fields that had to fall back
    pub fn fallbacks(&self) -> Vec<&'static str> {
        self.sources
            .iter()
            .filter(|(_, source)| *source == Source::Fallback)
            .map(|(field, _)| *field)
            .collect()
    }
}

pub struct FieldExtractor {
    area: Regex,
    neighborhood: Regex,
    street: Regex,
    full_address: Regex,
    latitude: Regex,
    longitude: Regex,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            area: Regex::new(r"<td[^>]*>\s*(\d+\.?\d*)\s*m²\s*</td>").expect("static pattern"),
            neighborhood: label_pattern("Mahalle:"),
            street: label_pattern("Sokak:"),
            full_address: label_pattern("Tam Adres:"),
            latitude: label_pattern("Enlem:"),
            longitude: label_pattern("Boylam:"),
        }
    }

    /// Recover all fields for one record. `rng` is only consulted when the
    /// area has to be drawn.
    pub fn extract<R: Rng + ?Sized>(
        &self,
        description: Option<&str>,
        fallbacks: &FallbackConfig,
        rng: &mut R,
    ) -> ExtractedFields {
        let description = description.unwrap_or_default();
        let mut sources = Vec::with_capacity(6);

        let area = match self.capture(&self.area, description) {
            Some(value) => {
                sources.push(("area", Source::Description));
                value
            }
            None => {
                sources.push(("area", Source::Fallback));
                random::fallback_area(rng)
            }
        };

        let mut field = |name: &'static str, pattern: &Regex, fallback: &str| {
            let (value, source) = match self.capture(pattern, description) {
                Some(value) => (value, Source::Description),
                None => (fallback.to_string(), Source::Fallback),
            };
            sources.push((name, source));
            value
        };

        let neighborhood = field("neighborhood", &self.neighborhood, &fallbacks.neighborhood);
        let street = field("street", &self.street, &fallbacks.street);
        let full_address = field("full_address", &self.full_address, &fallbacks.full_address);
        let latitude = field("latitude", &self.latitude, &fallbacks.latitude);
        let longitude = field("longitude", &self.longitude, &fallbacks.longitude);

        ExtractedFields {
            area,
            neighborhood,
            street,
            full_address,
            latitude,
            longitude,
            sources,
        }
    }

    fn capture(&self, pattern: &Regex, haystack: &str) -> Option<String> {
        pattern
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// A label cell, optionally bolded, followed by the value cell
fn label_pattern(label: &str) -> Regex {
    Regex::new(&format!(
        r"<td[^>]*>\s*(?:<b>)?\s*{}\s*(?:</b>)?\s*</td>\s*<td[^>]*>([^<]+)</td>",
        regex::escape(label)
    ))
    .expect("label pattern")
}
