//! Fields drawn fresh from the random source on every run

use rand::Rng;
use std::fmt;

use super::tables::{FAMILY_NAMES, FATHER_NAMES, FIRST_NAMES};

/// Probability that an owner holds a fractional share
const FRACTIONAL_SHARE_PROBABILITY: f64 = 0.2;

fn pick<R: Rng + ?Sized>(rng: &mut R, table: &[&'static str]) -> &'static str {
    table[rng.gen_range(0..table.len())]
}

/// Arabic owner name, each component drawn independently
pub fn arabic_owner_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} بن {} {}",
        pick(rng, &FIRST_NAMES),
        pick(rng, &FATHER_NAMES),
        pick(rng, &FAMILY_NAMES)
    )
}

/// `DD/MM/YYYY` between 1990 and 2015, days limited to 1..=28
pub fn registration_date<R: Rng + ?Sized>(rng: &mut R) -> String {
    let year = rng.gen_range(1990..=2015);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    format!("{:02}/{:02}/{}", day, month, year)
}

/// Daily register (yevmiye) reference, `YYYY/NNNN`
pub fn registry_reference<R: Rng + ?Sized>(rng: &mut R) -> String {
    let year = rng.gen_range(2000..=2024);
    let sequence = rng.gen_range(1000..=9999);
    format!("{}/{}", year, sequence)
}

/// Ownership share of the registered owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Share {
    Full,
    /// Numerator and denominator are drawn independently; a share above
    /// one is possible and kept as drawn.
    Fraction { numerator: u8, denominator: u8 },
}

impl Share {
    /// Display text; `full_label` stands in for a whole share
    pub fn text(&self, full_label: &str) -> String {
        match self {
            Share::Full => full_label.to_string(),
            Share::Fraction { .. } => self.to_string(),
        }
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Share::Full => write!(f, "1/1"),
            Share::Fraction {
                numerator,
                denominator,
            } => write!(f, "{}/{}", numerator, denominator),
        }
    }
}

pub fn ownership_share<R: Rng + ?Sized>(rng: &mut R) -> Share {
    if rng.gen_bool(FRACTIONAL_SHARE_PROBABILITY) {
        Share::Fraction {
            numerator: rng.gen_range(1..=3),
            denominator: rng.gen_range(2..=4),
        }
    } else {
        Share::Full
    }
}

/// Transaction price in whole currency units, a multiple of 1000 in
/// `[50_000, 500_000)`
pub fn valuation<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(50..500u64) * 1000
}

/// Area in m² with one decimal, in `[50.0, 550.0)`
pub fn fallback_area<R: Rng + ?Sized>(rng: &mut R) -> String {
    let tenths: u32 = rng.gen_range(500..5500);
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Everything drawn from the random source for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomFields {
    pub owner_arabic: String,
    pub registration_date: String,
    pub registry_reference: String,
    pub share: Share,
    pub price: u64,
}

impl RandomFields {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            owner_arabic: arabic_owner_name(rng),
            registration_date: registration_date(rng),
            registry_reference: registry_reference(rng),
            share: ownership_share(rng),
            price: valuation(rng),
        }
    }
}
