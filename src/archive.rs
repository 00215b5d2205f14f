//! KMZ archive access
//!
//! A KMZ is a zip container holding one KML document (plus, sometimes,
//! icons and overlays). Reading locates the first member whose name ends
//! with the markup extension. Writing is destructive: the archive is
//! replaced by one holding only the rewritten document, under the same
//! member name and compression method it had on input.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{EnrichError, Result};

/// Upper bound on the buffer preallocated from a member's declared size
const READ_HINT_LIMIT: u64 = 64 * 1024 * 1024;

/// Compression applied to a container member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Stored,
    Deflated,
}

impl From<zip::CompressionMethod> for Compression {
    fn from(method: zip::CompressionMethod) -> Self {
        match method {
            zip::CompressionMethod::Stored => Compression::Stored,
            // Deflate is what KMZ readers expect for anything else
            _ => Compression::Deflated,
        }
    }
}

impl From<Compression> for zip::CompressionMethod {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Stored => zip::CompressionMethod::Stored,
            Compression::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

/// One listed container member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub compression: Compression,
}

/// An addressable container of named byte entries
pub trait Container {
    /// Member files in container order (directories excluded)
    fn entries(&mut self) -> Result<Vec<EntryInfo>>;

    /// Full contents of one member
    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>>;

    /// Replace the whole container with a single member
    fn replace_with(&mut self, name: &str, bytes: &[u8], compression: Compression)
        -> Result<()>;
}

/// The markup document pulled out of a container
#[derive(Debug, Clone)]
pub struct MarkupMember {
    pub name: String,
    pub bytes: Vec<u8>,
    pub compression: Compression,
}

/// A zip file on disk
pub struct ZipContainer {
    path: PathBuf,
}

impl ZipContainer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn archive(&self) -> Result<zip::ZipArchive<File>> {
        let file = File::open(&self.path)?;
        Ok(zip::ZipArchive::new(file)?)
    }

    fn staging_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archive".to_string());
        self.path.with_file_name(format!("{}.staging", file_name))
    }
}

impl Container for ZipContainer {
    fn entries(&mut self) -> Result<Vec<EntryInfo>> {
        let mut archive = self.archive()?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let file = archive.by_index(i)?;
            if file.is_file() {
                entries.push(EntryInfo {
                    name: file.name().to_string(),
                    compression: file.compression().into(),
                });
            }
        }

        Ok(entries)
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive()?;
        let mut file = archive.by_name(name)?;
        let mut contents = Vec::with_capacity(capacity_hint(file.size()));
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    fn replace_with(
        &mut self,
        name: &str,
        bytes: &[u8],
        compression: Compression,
    ) -> Result<()> {
        // Stage next to the target so the final rename stays on one filesystem
        let staged = self.staging_path();

        let written = (|| -> Result<()> {
            let file = File::create(&staged)?;
            let mut zip = zip::ZipWriter::new(file);
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(compression.into());
            zip.start_file(name, options)?;
            zip.write_all(bytes)?;
            zip.finish()?;
            Ok(())
        })();

        if let Err(e) = written {
            fs::remove_file(&staged).ok();
            return Err(e);
        }

        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}

/// Declared sizes come from the archive header and are not trusted
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared.min(READ_HINT_LIMIT)).unwrap_or(0)
}

fn has_extension(name: &str, extension: &str) -> bool {
    let suffix = format!(".{}", extension.to_ascii_lowercase());
    name.to_ascii_lowercase().ends_with(&suffix)
}

/// Locate and read the markup member.
///
/// The first matching member in container order wins; any further matches
/// are reported and ignored.
pub fn open_markup<C: Container>(
    container: &mut C,
    extension: &str,
    origin: &Path,
) -> Result<MarkupMember> {
    let entries = container.entries()?;
    let mut matches = entries.iter().filter(|e| has_extension(&e.name, extension));

    let chosen = matches.next().cloned().ok_or_else(|| EnrichError::NotFound {
        path: origin.to_path_buf(),
        extension: extension.to_string(),
    })?;

    let ignored: Vec<&str> = matches.map(|e| e.name.as_str()).collect();
    if !ignored.is_empty() {
        warn!(
            chosen = %chosen.name,
            ?ignored,
            "Archive holds several markup members, using the first"
        );
    }

    let dropped: Vec<&str> = entries
        .iter()
        .filter(|e| e.name != chosen.name)
        .map(|e| e.name.as_str())
        .collect();
    if !dropped.is_empty() {
        warn!(
            ?dropped,
            "Members other than the document are not carried into the rewritten archive"
        );
    }

    let bytes = container.read_entry(&chosen.name)?;

    info!(
        member = %chosen.name,
        bytes = bytes.len(),
        compression = ?chosen.compression,
        "Opened markup member"
    );

    Ok(MarkupMember {
        name: chosen.name,
        bytes,
        compression: chosen.compression,
    })
}

/// Rewrite the container so it holds exactly `member`
pub fn save_markup<C: Container>(container: &mut C, member: &MarkupMember) -> Result<()> {
    container.replace_with(&member.name, &member.bytes, member.compression)?;
    info!(member = %member.name, bytes = member.bytes.len(), "Archive rewritten");
    Ok(())
}

/// Read the markup member of the KMZ at `path`
pub fn open(path: &Path, extension: &str) -> Result<MarkupMember> {
    open_markup(&mut ZipContainer::new(path), extension, path)
}

/// Replace the KMZ at `path` with one holding only `member`
pub fn save(path: &Path, member: &MarkupMember) -> Result<()> {
    save_markup(&mut ZipContainer::new(path), member)
}
