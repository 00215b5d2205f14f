//! kmz-enricher: synthetic cadastral registry data for KMZ parcel maps
//!
//! Opens a KMZ, finds every `Placemark` in its KML document, and gives each
//! one a fresh owner, classification, registration and valuation. The result
//! is written to the Placemark twice: as an HTML balloon `description` and
//! as a flat `ExtendedData` block. The archive is then rewritten in place.

pub mod archive;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod synth;

pub use archive::{Compression, Container, MarkupMember, ZipContainer};
pub use config::{Config, FallbackConfig, RegistryConfig};
pub use document::{Document, Element, RecordHandle, KML_NAMESPACE};
pub use error::{EnrichError, Result};
pub use extract::{ExtractedFields, FieldExtractor, Source};
pub use pipeline::{DocumentSummary, Enricher, RunSummary};
pub use record::ParcelRecord;
