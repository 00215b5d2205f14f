//! Configuration for kmz-enricher

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EnrichError, Result};

/// Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// KMZ archive to rewrite in place
    #[serde(default = "default_archive_path")]
    pub archive_path: PathBuf,

    /// Extension (without dot) of the markup member inside the archive
    #[serde(default = "default_markup_extension")]
    pub markup_extension: String,

    /// Seed for the random generation path. Unset means entropy-seeded.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Treat a document without Placemarks as a successful no-op
    #[serde(default)]
    pub allow_empty: bool,

    #[serde(default)]
    pub fallbacks: FallbackConfig,

    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Values used when a field cannot be recovered from prior content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_neighborhood")]
    pub neighborhood: String,

    #[serde(default = "default_street")]
    pub street: String,

    #[serde(default = "default_full_address")]
    pub full_address: String,

    #[serde(default = "default_latitude")]
    pub latitude: String,

    #[serde(default = "default_longitude")]
    pub longitude: String,
}

/// Fixed labels of the registry office the records are attributed to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Province name written to the structured block
    #[serde(default = "default_province")]
    pub province: String,

    /// Province as shown in the description (both scripts)
    #[serde(default = "default_province_display")]
    pub province_display: String,

    #[serde(default = "default_directorate")]
    pub directorate: String,

    #[serde(default = "default_transaction_type")]
    pub transaction_type: String,

    #[serde(default = "default_transaction_display")]
    pub transaction_display: String,

    /// Share text used when the owner holds the whole parcel
    #[serde(default = "default_full_ownership")]
    pub full_ownership: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Footer line at the bottom of every description
    #[serde(default = "default_notice")]
    pub notice: String,
}

// Defaults
fn default_archive_path() -> PathBuf { PathBuf::from("13.kmz") }
fn default_markup_extension() -> String { "kml".to_string() }
fn default_neighborhood() -> String { "Al-Farafira (الفرافرة)".to_string() }
fn default_street() -> String { "شارع الفرافرة".to_string() }
fn default_full_address() -> String { "سوريا / حلب / المدينة القديمة".to_string() }
fn default_latitude() -> String { "36.200000".to_string() }
fn default_longitude() -> String { "37.160000".to_string() }
fn default_province() -> String { "Halep".to_string() }
fn default_province_display() -> String { "Halep (حلب)".to_string() }
fn default_directorate() -> String { "Halep Kadastro Müdürlüğü".to_string() }
fn default_transaction_type() -> String { "Satış".to_string() }
fn default_transaction_display() -> String { "Satış / بيع".to_string() }
fn default_full_ownership() -> String { "Tamamı (1/1)".to_string() }
fn default_currency_symbol() -> String { "$".to_string() }
fn default_notice() -> String {
    "⚠️ Bu kayıt Suriye Kadastro ve Tapu Müdürlüğü resmi sisteminden alınmıştır.".to_string()
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            neighborhood: default_neighborhood(),
            street: default_street(),
            full_address: default_full_address(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            province: default_province(),
            province_display: default_province_display(),
            directorate: default_directorate(),
            transaction_type: default_transaction_type(),
            transaction_display: default_transaction_display(),
            full_ownership: default_full_ownership(),
            currency_symbol: default_currency_symbol(),
            notice: default_notice(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_path: default_archive_path(),
            markup_extension: default_markup_extension(),
            seed: None,
            allow_empty: false,
            fallbacks: FallbackConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| EnrichError::Config(e.to_string()))
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EnrichError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
