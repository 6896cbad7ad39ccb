//! Scoring Engine
//!
//! Derives a receipt's points from seven independent rules. Each rule reads
//! its own receipt field, so the terms can be computed and tested in
//! isolation and simply added up.
//!
//! The engine assumes the receipt already passed [`Receipt::validate`]. If a
//! malformed amount, date or time slips through anyway, the rule reports a
//! [`ScoringError`] instead of guessing.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{Item, Receipt, Score};

/// A receipt field that should have been rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("malformed {field} {value:?} reached the scoring engine; validation was bypassed")]
    MalformedField { field: &'static str, value: String },
}

fn malformed(field: &'static str, value: &str) -> ScoringError {
    ScoringError::MalformedField {
        field,
        value: value.to_string(),
    }
}

// == Options ==
/// Thresholds the rules compare against.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Start of the bonus window; a purchase at exactly this time earns nothing
    pub window_start: NaiveTime,
    /// End of the bonus window, compared on the hour only
    pub window_end: NaiveTime,
    /// Divisor for the divisible-total bonus, in cents
    pub total_divisor_cents: u64,
    /// Items per counted batch
    pub items_batch_size: u32,
    /// Trimmed description lengths divisible by this earn a price bonus
    pub description_divisor: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            window_start: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default(),
            window_end: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
            total_divisor_cents: 25,
            items_batch_size: 2,
            description_divisor: 3,
        }
    }
}

// == Multipliers ==
/// Point weight of each rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Multipliers {
    pub retailer: u32,
    pub round_total: u32,
    pub divisible_total: u32,
    pub items: f64,
    pub description: f64,
    pub purchase_time: u32,
    pub purchase_date: u32,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            retailer: 1,
            round_total: 50,
            divisible_total: 25,
            items: 5.0,
            description: 0.2,
            purchase_time: 10,
            purchase_date: 6,
        }
    }
}

// == Score Breakdown ==
/// Points contributed by each rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub retailer: u64,
    pub item_count: u64,
    pub round_total: u64,
    pub divisible_total: u64,
    pub descriptions: u64,
    pub odd_day: u64,
    pub purchase_time: u64,
}

impl ScoreBreakdown {
    /// Exact sum of all terms.
    pub fn total(&self) -> u64 {
        [
            self.retailer,
            self.item_count,
            self.round_total,
            self.divisible_total,
            self.descriptions,
            self.odd_day,
            self.purchase_time,
        ]
        .iter()
        .fold(0u64, |acc, term| acc.saturating_add(*term))
    }

    /// Sum clamped to the width of [`Score`].
    pub fn score(&self) -> Score {
        Score::try_from(self.total()).unwrap_or(Score::MAX)
    }
}

/// Splits a `D+.DD` amount into its whole and cent digits.
fn split_amount(amount: &str) -> Option<(&str, &str)> {
    let (whole, fraction) = amount.split_once('.')?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || fraction.len() != 2 || !all_digits(fraction) {
        return None;
    }
    Some((whole, fraction))
}

/// Remainder of the amount in cents modulo `divisor`, for any number of digits.
fn cents_remainder(whole: &str, fraction: &str, divisor: u64) -> u64 {
    let divisor = u128::from(divisor);
    let remainder = whole
        .bytes()
        .chain(fraction.bytes())
        .fold(0u128, |rem, digit| (rem * 10 + u128::from(digit - b'0')) % divisor);
    remainder as u64
}

/// Parses a `D+.DD` amount into cents; `None` if it does not fit a `u64`.
pub fn parse_cents(amount: &str) -> Option<u64> {
    let (whole, fraction) = split_amount(amount)?;

    let whole: u64 = whole.parse().ok()?;
    let fraction: u64 = fraction.parse().ok()?;
    whole.checked_mul(100)?.checked_add(fraction)
}

// == Scoring Engine ==
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    options: Options,
    multipliers: Multipliers,
}

impl ScoringEngine {
    pub fn new(options: Options, multipliers: Multipliers) -> Self {
        Self {
            options,
            multipliers,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn multipliers(&self) -> &Multipliers {
        &self.multipliers
    }

    /// Computes the score of a validated receipt.
    pub fn score(&self, receipt: &Receipt) -> Result<Score, ScoringError> {
        let breakdown = self.breakdown(receipt)?;
        let total = breakdown.total();
        let score = breakdown.score();

        if u64::from(score) != total {
            warn!(total, score, "receipt points exceed the score range, clamping");
        }
        debug!(score, "receipt scored");

        Ok(score)
    }

    /// Runs every rule and keeps the individual terms.
    pub fn breakdown(&self, receipt: &Receipt) -> Result<ScoreBreakdown, ScoringError> {
        Ok(ScoreBreakdown {
            retailer: self.retailer_points(&receipt.retailer),
            item_count: self.item_count_points(receipt.items.len()),
            round_total: self.round_total_points(&receipt.total)?,
            divisible_total: self.divisible_total_points(&receipt.total)?,
            descriptions: self.description_points(&receipt.items)?,
            odd_day: self.odd_day_points(&receipt.purchase_date)?,
            purchase_time: self.purchase_time_points(&receipt.purchase_time)?,
        })
    }

    /// One point weight per letter or digit in the retailer name.
    pub fn retailer_points(&self, retailer: &str) -> u64 {
        let alphanumerics = retailer.chars().filter(|c| c.is_alphanumeric()).count() as u64;
        let points = alphanumerics.saturating_mul(u64::from(self.multipliers.retailer));

        if points > 0 {
            debug!(points, alphanumerics, retailer, "retailer name points");
        }
        points
    }

    /// Points for every full batch of items.
    pub fn item_count_points(&self, item_count: usize) -> u64 {
        let batch = self.options.items_batch_size as usize;
        if batch == 0 {
            return 0;
        }

        let batches = item_count / batch;
        let points = (batches as f64 * self.multipliers.items).floor().max(0.0) as u64;

        if points > 0 {
            debug!(points, item_count, batches, "item batch points");
        }
        points
    }

    /// Bonus when the total has no cents, including a total of `0.00`.
    pub fn round_total_points(&self, total: &str) -> Result<u64, ScoringError> {
        let (_, fraction) = split_amount(total).ok_or_else(|| malformed("total", total))?;
        if fraction != "00" {
            return Ok(0);
        }

        let points = u64::from(self.multipliers.round_total);
        debug!(points, total, "round dollar total");
        Ok(points)
    }

    /// Bonus when a non-zero total is a multiple of the configured divisor.
    pub fn divisible_total_points(&self, total: &str) -> Result<u64, ScoringError> {
        let (whole, fraction) = split_amount(total).ok_or_else(|| malformed("total", total))?;
        let divisor = self.options.total_divisor_cents;
        let is_zero = whole.bytes().chain(fraction.bytes()).all(|b| b == b'0');
        if is_zero || divisor == 0 || cents_remainder(whole, fraction, divisor) != 0 {
            return Ok(0);
        }

        let points = u64::from(self.multipliers.divisible_total);
        debug!(points, total, divisor_cents = divisor, "total is a multiple of the divisor");
        Ok(points)
    }

    /// Price bonus for every item whose trimmed description length is a
    /// positive multiple of the divisor.
    pub fn description_points(&self, items: &[Item]) -> Result<u64, ScoringError> {
        let divisor = self.options.description_divisor as usize;
        if divisor == 0 {
            return Ok(0);
        }

        let mut total = 0u64;
        for item in items {
            let trimmed = item.short_description.trim_matches(' ');
            let length = trimmed.chars().count();
            if length == 0 || length % divisor != 0 {
                continue;
            }

            let price: f64 = split_amount(&item.price)
                .and_then(|_| item.price.parse().ok())
                .ok_or_else(|| malformed("price", &item.price))?;
            let raw = price * self.multipliers.description;
            // 15.00 * 0.2 evaluates to 3.0000000000000004, which a bare ceil
            // turns into 4. Round to six decimals first so it stays 3.
            // Huge prices saturate at u64::MAX through the cast.
            let points = ((raw * 1e6).round() / 1e6).ceil().max(0.0) as u64;

            debug!(
                points,
                description = trimmed,
                length,
                price = %item.price,
                "item description points"
            );
            total = total.saturating_add(points);
        }
        Ok(total)
    }

    /// Bonus when the day of month, read from the last two characters of the
    /// date, is odd.
    pub fn odd_day_points(&self, purchase_date: &str) -> Result<u64, ScoringError> {
        let day: u32 = purchase_date
            .len()
            .checked_sub(2)
            .and_then(|start| purchase_date.get(start..))
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| malformed("purchaseDate", purchase_date))?;

        if day % 2 == 0 {
            return Ok(0);
        }

        let points = u64::from(self.multipliers.purchase_date);
        debug!(points, purchase_date, "purchase day is odd");
        Ok(points)
    }

    /// Bonus for purchases inside the hour window `[start, end)`, except at
    /// exactly the start time.
    pub fn purchase_time_points(&self, purchase_time: &str) -> Result<u64, ScoringError> {
        let time = NaiveTime::parse_from_str(purchase_time, "%H:%M")
            .map_err(|_| malformed("purchaseTime", purchase_time))?;

        let start = self.options.window_start;
        let end = self.options.window_end;
        if time == start || time.hour() < start.hour() || time.hour() >= end.hour() {
            return Ok(0);
        }

        let points = u64::from(self.multipliers.purchase_time);
        debug!(
            points,
            purchase_time,
            window_start = %start.format("%H:%M"),
            window_end = %end.format("%H:%M"),
            "purchase time inside bonus window"
        );
        Ok(points)
    }
}
