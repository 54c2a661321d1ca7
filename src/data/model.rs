use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names of the launch file
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome, stored as 0/1 in the `class` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Numeric class as plotted on the y axis.
    pub fn as_class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record validation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("row {row}: missing 'Launch Site'")]
    MissingSite { row: usize },
    #[error("row {row}: missing 'class'")]
    MissingClass { row: usize },
    #[error("row {row}: 'class' must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: f64 },
    #[error("row {row}: missing 'Payload Mass (kg)'")]
    MissingPayload { row: usize },
    #[error("row {row}: 'Payload Mass (kg)' must be a finite number >= 0, got {value}")]
    InvalidPayload { row: usize, value: f64 },
    #[error("row {row}: missing 'Booster Version Category'")]
    MissingBoosterCategory { row: usize },
}

// ---------------------------------------------------------------------------
// RawRecord – one row as it comes out of a file
// ---------------------------------------------------------------------------

/// Row as deserialised from CSV / JSON. Every field is optional here so that
/// validation can report which column is missing on which row.
///
/// `class` is read as a float because pandas exports sometimes write `1.0`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Launch Site", default)]
    pub site: Option<String>,
    #[serde(rename = "Payload Mass (kg)", default)]
    pub payload_mass_kg: Option<f64>,
    #[serde(rename = "class", default)]
    pub class: Option<f64>,
    #[serde(rename = "Booster Version Category", default)]
    pub booster_category: Option<String>,
    /// Float because pandas writes `1.0` once the column holds a NaN.
    #[serde(rename = "Flight Number", default)]
    pub flight_number: Option<f64>,
    #[serde(rename = "Booster Version", default)]
    pub booster_version: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `Some` only for finite, non-negative whole numbers that fit a `u32`.
fn whole_number(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u32)
}

impl RawRecord {
    /// Validate into a [`Record`]. `row` is the 0-based data row index.
    pub fn validate(self, row: usize) -> Result<Record, RecordError> {
        let site = non_empty(self.site).ok_or(RecordError::MissingSite { row })?;

        let class = self.class.ok_or(RecordError::MissingClass { row })?;
        let outcome = if class.fract() == 0.0 {
            Outcome::from_class(class as i64)
        } else {
            None
        }
        .ok_or(RecordError::InvalidClass { row, value: class })?;

        let payload_mass_kg = self
            .payload_mass_kg
            .ok_or(RecordError::MissingPayload { row })?;
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(RecordError::InvalidPayload {
                row,
                value: payload_mass_kg,
            });
        }

        let booster_category = non_empty(self.booster_category)
            .ok_or(RecordError::MissingBoosterCategory { row })?;

        Ok(Record {
            site,
            payload_mass_kg,
            outcome,
            booster_category,
            flight_number: self.flight_number.and_then(whole_number),
            booster_version: non_empty(self.booster_version),
        })
    }
}

// ---------------------------------------------------------------------------
// Record – one validated launch
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

#[cfg(test)]
impl Record {
    pub fn new(site: &str, payload_mass_kg: f64, outcome: Outcome, booster_category: &str) -> Self {
        Record {
            site: site.to_string(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.to_string(),
            flight_number: None,
            booster_version: None,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Built once at start-up and never mutated.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<Record>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        LaunchDataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed (min, max) payload mass, `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.payload_mass_kg).fold(None, |acc, m| match acc {
            None => Some((m, m)),
            Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
        })
    }

    /// Distinct launch sites in first-occurrence order.
    pub fn sites(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.site.as_str()))
    }

    /// Distinct booster categories in first-occurrence order.
    pub fn booster_categories(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.booster_category.as_str()))
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(site: &str, mass: f64, class: f64, category: &str) -> RawRecord {
        RawRecord {
            site: Some(site.to_string()),
            payload_mass_kg: Some(mass),
            class: Some(class),
            booster_category: Some(category.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn validate_accepts_float_class() {
        let rec = raw("CCAFS LC-40", 2500.0, 1.0, "FT").validate(0).unwrap();
        assert_eq!(rec.outcome, Outcome::Success);
        assert_eq!(rec.payload_mass_kg, 2500.0);
    }

    #[test]
    fn validate_rejects_bad_rows() {
        assert_eq!(
            raw("A", 1.0, 2.0, "FT").validate(3),
            Err(RecordError::InvalidClass { row: 3, value: 2.0 })
        );
        assert_eq!(
            raw("A", -5.0, 0.0, "FT").validate(1),
            Err(RecordError::InvalidPayload { row: 1, value: -5.0 })
        );
        assert_eq!(
            raw("  ", 1.0, 0.0, "FT").validate(0),
            Err(RecordError::MissingSite { row: 0 })
        );
        let mut no_class = raw("A", 1.0, 0.0, "FT");
        no_class.class = None;
        assert_eq!(no_class.validate(7), Err(RecordError::MissingClass { row: 7 }));
    }

    #[test]
    fn flight_number_accepts_whole_floats_only() {
        let mut row = raw("A", 1.0, 0.0, "FT");
        row.flight_number = Some(7.0);
        assert_eq!(row.clone().validate(0).unwrap().flight_number, Some(7));
        for odd in [7.5, -1.0, f64::NAN, f64::INFINITY] {
            row.flight_number = Some(odd);
            assert_eq!(row.clone().validate(0).unwrap().flight_number, None, "{odd}");
        }
    }

    #[test]
    fn sites_and_bounds_follow_first_occurrence() {
        let ds = LaunchDataset::from_records(vec![
            Record::new("B", 3000.0, Outcome::Success, "v1.1"),
            Record::new("A", 500.0, Outcome::Failure, "FT"),
            Record::new("B", 9600.0, Outcome::Failure, "FT"),
        ]);
        assert_eq!(ds.sites(), vec!["B", "A"]);
        assert_eq!(ds.booster_categories(), vec!["v1.1", "FT"]);
        assert_eq!(ds.payload_bounds(), Some((500.0, 9600.0)));
        assert_eq!(LaunchDataset::default().payload_bounds(), None);
    }
}
