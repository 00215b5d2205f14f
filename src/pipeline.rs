//! Archive-to-archive enrichment run
//!
//! open archive -> parse -> for each Placemark in document order:
//! extract, generate, write back -> serialize -> rewrite archive.
//!
//! Nothing touches the archive on disk until every record has been
//! processed; any failure before the final save leaves it as it was.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::{debug, info};

use crate::archive::{self, Container, MarkupMember, ZipContainer};
use crate::config::Config;
use crate::document::Document;
use crate::error::{EnrichError, Result};
use crate::extract::FieldExtractor;
use crate::record::ParcelRecord;

/// Outcome of enriching one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub records: usize,
    /// Records where at least one field fell back to a default
    pub fallbacks: usize,
}

/// Outcome of a full archive run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub member_name: String,
    pub records: usize,
    pub fallbacks: usize,
    /// False when the run was a no-op and the archive was left untouched
    pub written: bool,
}

pub struct Enricher<R = StdRng> {
    config: Config,
    extractor: FieldExtractor,
    rng: R,
}

impl Enricher<StdRng> {
    /// Seeded from `config.seed` when set, from OS entropy otherwise
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Enricher<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        Self {
            config,
            extractor: FieldExtractor::new(),
            rng,
        }
    }

    /// Rewrite every Placemark of `doc` in place
    pub fn enrich_document(&mut self, doc: &mut Document) -> DocumentSummary {
        let mut summary = DocumentSummary::default();

        for (ordinal, handle) in doc.find_records().iter().enumerate() {
            let Some(element) = doc.element(handle) else {
                continue;
            };
            let record = ParcelRecord::build(
                element,
                ordinal,
                &self.extractor,
                &self.config,
                &mut self.rng,
            );

            if let Some(element) = doc.element_mut(handle) {
                record.write_to(element, &self.config);
            }

            summary.records += 1;
            if !record.fields.fallbacks().is_empty() {
                summary.fallbacks += 1;
            }
            debug!(ordinal, parcel = %record.parcel_no, "Record rewritten");
        }

        summary
    }

    /// Run against any container. `on_discovered` is called with the
    /// record count once the document has been parsed.
    pub fn run_with<C, F>(
        &mut self,
        container: &mut C,
        origin: &Path,
        on_discovered: F,
    ) -> Result<RunSummary>
    where
        C: Container,
        F: FnOnce(usize),
    {
        let member = archive::open_markup(container, &self.config.markup_extension, origin)?;
        let mut doc = Document::parse(&member.bytes)?;

        let discovered = doc.find_records().len();
        info!(records = discovered, member = %member.name, "Parcels found");
        on_discovered(discovered);

        if discovered == 0 {
            if !self.config.allow_empty {
                return Err(EnrichError::NoRecords);
            }
            info!("No records to update, archive left untouched");
            return Ok(RunSummary {
                member_name: member.name,
                records: 0,
                fallbacks: 0,
                written: false,
            });
        }

        let summary = self.enrich_document(&mut doc);

        let updated = MarkupMember {
            bytes: doc.to_bytes(),
            ..member
        };
        archive::save_markup(container, &updated)?;

        info!(
            records = summary.records,
            fallbacks = summary.fallbacks,
            "Archive updated"
        );

        Ok(RunSummary {
            member_name: updated.name,
            records: summary.records,
            fallbacks: summary.fallbacks,
            written: true,
        })
    }

    /// Run against the KMZ at `path`
    pub fn run_archive(&mut self, path: &Path) -> Result<RunSummary> {
        self.run_with(&mut ZipContainer::new(path), path, |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{Compression, EntryInfo};
    use crate::record::{DESCRIPTION, EXTENDED_DATA};

    /// Container held in memory; records every replace
    #[derive(Default)]
    struct MemoryContainer {
        entries: Vec<(String, Vec<u8>, Compression)>,
        writes: usize,
    }

    impl MemoryContainer {
        fn with(name: &str, bytes: &[u8]) -> Self {
            Self {
                entries: vec![(name.to_string(), bytes.to_vec(), Compression::Deflated)],
                writes: 0,
            }
        }
    }

    impl Container for MemoryContainer {
        fn entries(&mut self) -> Result<Vec<EntryInfo>> {
            Ok(self
                .entries
                .iter()
                .map(|(name, _, compression)| EntryInfo {
                    name: name.clone(),
                    compression: *compression,
                })
                .collect())
        }

        fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
            self.entries
                .iter()
                .find(|(n, _, _)| n == name)
                .map(|(_, bytes, _)| bytes.clone())
                .ok_or_else(|| EnrichError::Archive(zip::result::ZipError::FileNotFound))
        }

        fn replace_with(
            &mut self,
            name: &str,
            bytes: &[u8],
            compression: Compression,
        ) -> Result<()> {
            self.entries = vec![(name.to_string(), bytes.to_vec(), compression)];
            self.writes += 1;
            Ok(())
        }
    }

    const THREE_PARCELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
<Placemark><name>101</name><Polygon/></Placemark>
<Placemark><name>102</name><Polygon/></Placemark>
<Placemark><name>103</name><Polygon/></Placemark>
</Document></kml>"#;

    fn seeded(seed: u64) -> Enricher<StdRng> {
        let config = Config {
            seed: Some(seed),
            ..Config::default()
        };
        Enricher::new(config)
    }

    #[test]
    fn test_enrich_document_fills_every_record() {
        let mut doc = Document::parse(THREE_PARCELS.as_bytes()).unwrap();
        let summary = seeded(1).enrich_document(&mut doc);
        assert_eq!(summary, DocumentSummary { records: 3, fallbacks: 3 });

        for handle in doc.find_records() {
            let record = doc.element(&handle).unwrap();
            assert_eq!(record.children_named(DESCRIPTION).count(), 1);
            assert_eq!(record.children_named(EXTENDED_DATA).count(), 1);
            assert_eq!(record.child(EXTENDED_DATA).unwrap().children_named("Data").count(), 18);
        }
    }

    #[test]
    fn test_run_rewrites_member_once() {
        let mut container = MemoryContainer::with("doc.kml", THREE_PARCELS.as_bytes());
        let mut discovered = None;
        let summary = seeded(2)
            .run_with(&mut container, Path::new("mem.kmz"), |n| discovered = Some(n))
            .unwrap();

        assert_eq!(discovered, Some(3));
        assert_eq!(summary.records, 3);
        assert_eq!(summary.member_name, "doc.kml");
        assert!(summary.written);
        assert_eq!(container.writes, 1);
        assert_eq!(container.entries.len(), 1);
        assert_eq!(container.entries[0].0, "doc.kml");
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut a = MemoryContainer::with("doc.kml", THREE_PARCELS.as_bytes());
        let mut b = MemoryContainer::with("doc.kml", THREE_PARCELS.as_bytes());
        seeded(9).run_with(&mut a, Path::new("a.kmz"), |_| {}).unwrap();
        seeded(9).run_with(&mut b, Path::new("b.kmz"), |_| {}).unwrap();
        assert_eq!(a.entries[0].1, b.entries[0].1);
    }

    #[test]
    fn test_zero_records_is_error_without_write() {
        let mut container = MemoryContainer::with(
            "doc.kml",
            b"<kml xmlns=\"http://www.opengis.net/kml/2.2\"><Document/></kml>",
        );
        match seeded(3).run_with(&mut container, Path::new("mem.kmz"), |_| {}) {
            Err(EnrichError::NoRecords) => {}
            other => panic!("expected NoRecords, got {:?}", other),
        }
        assert_eq!(container.writes, 0);
    }

    #[test]
    fn test_zero_records_allowed_is_noop() {
        let mut container = MemoryContainer::with("doc.kml", b"<kml><Document/></kml>");
        let config = Config {
            allow_empty: true,
            ..Config::default()
        };
        let summary = Enricher::new(config)
            .run_with(&mut container, Path::new("mem.kmz"), |_| {})
            .unwrap();
        assert_eq!(summary.records, 0);
        assert!(!summary.written);
        assert_eq!(container.writes, 0);
    }

    #[test]
    fn test_malformed_document_aborts_before_write() {
        let mut container = MemoryContainer::with("doc.kml", b"<kml><Placemark></kml>");
        let err = seeded(4)
            .run_with(&mut container, Path::new("mem.kmz"), |_| {})
            .unwrap_err();
        assert!(matches!(err, EnrichError::MalformedDocument(_)));
        assert_eq!(container.writes, 0);
    }
}
