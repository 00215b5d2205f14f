//! One parcel's full set of values, and writing it back onto its Placemark

use rand::Rng;
use tracing::debug;

use crate::config::Config;
use crate::document::Element;
use crate::extract::{ExtractedFields, FieldExtractor};
use crate::render;
use crate::synth::{OrdinalFields, RandomFields};

pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const EXTENDED_DATA: &str = "ExtendedData";

/// Geometry elements a new `ExtendedData` block is placed in front of
const GEOMETRIES: [&str; 6] = [
    "Point",
    "LineString",
    "LinearRing",
    "Polygon",
    "MultiGeometry",
    "Model",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParcelRecord {
    /// Zero-based position in document order
    pub ordinal: usize,
    pub parcel_no: String,
    pub fields: ExtractedFields,
    pub derived: OrdinalFields,
    pub drawn: RandomFields,
}

/// Parcel number from the record's `name` text as written, or
/// `PARSEL-<ordinal + 1>` when the name is missing or empty
pub fn parcel_no(record: &Element, ordinal: usize) -> String {
    record
        .child_text(NAME)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("PARSEL-{}", ordinal + 1))
}

impl ParcelRecord {
    /// Build the record for the Placemark at `ordinal`: extraction first,
    /// then the ordinal-derived values, then the random draws
    pub fn build<R: Rng + ?Sized>(
        record: &Element,
        ordinal: usize,
        extractor: &FieldExtractor,
        config: &Config,
        rng: &mut R,
    ) -> Self {
        let parcel_no = parcel_no(record, ordinal);
        let description = record.child_text(DESCRIPTION);
        let fields = extractor.extract(description.as_deref(), &config.fallbacks, rng);

        let fallbacks = fields.fallbacks();
        if !fallbacks.is_empty() {
            debug!(parcel = %parcel_no, ordinal, ?fallbacks, "Using fallback values");
        }

        Self {
            ordinal,
            parcel_no,
            fields,
            derived: OrdinalFields::for_ordinal(ordinal),
            drawn: RandomFields::draw(rng),
        }
    }

    /// Replace the record's description and structured block
    pub fn write_to(&self, record: &mut Element, config: &Config) {
        write_description(record, render::description(self, &config.registry));
        write_extended_data(record, &render::structured_entries(self, &config.registry));
    }
}

/// Replace the description text entirely, creating the element right after
/// `name` if there is none
pub fn write_description(record: &mut Element, html: String) {
    record.dedupe_children(DESCRIPTION);
    record
        .child_or_insert_with(DESCRIPTION, |r| r.position_of(NAME).map_or(0, |i| i + 1))
        .set_cdata(html);
}

/// Clear and repopulate the `ExtendedData` block. A new block goes in front
/// of the geometry.
pub fn write_extended_data(record: &mut Element, entries: &[(&str, String)]) {
    record.dedupe_children(EXTENDED_DATA);
    let block = record.child_or_insert_with(EXTENDED_DATA, |r| {
        GEOMETRIES
            .iter()
            .filter_map(|g| r.position_of(g))
            .min()
            .unwrap_or(r.children.len())
    });

    block.clear_children();
    for (name, value) in entries {
        block
            .append_child("Data", &[("name", *name)])
            .set_child_text("value", value.as_str());
    }
}
