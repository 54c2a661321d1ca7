use serde::{Deserialize, Serialize};

use super::catalog::SiteSelection;
use super::model::{LaunchDataset, Record};

// ---------------------------------------------------------------------------
// PayloadRange – closed interval over payload mass
// ---------------------------------------------------------------------------

/// Inclusive payload-mass interval. Endpoints are always ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    lo: f64,
    hi: f64,
}

impl PayloadRange {
    pub fn new(a: f64, b: f64) -> Self {
        PayloadRange {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// The observed payload range of `dataset`, or `fallback` when the
    /// dataset is empty.
    pub fn full(dataset: &LaunchDataset, fallback: (f64, f64)) -> Self {
        let (lo, hi) = dataset.payload_bounds().unwrap_or(fallback);
        PayloadRange::new(lo, hi)
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.lo <= mass && mass <= self.hi
    }

    /// Range after a slider drag. When the dragged handle crosses the other
    /// one, the other is pushed along instead of the two swapping roles.
    pub fn dragged(lo: f64, hi: f64, lo_changed: bool) -> Self {
        if lo <= hi {
            PayloadRange { lo, hi }
        } else if lo_changed {
            PayloadRange { lo, hi: lo }
        } else {
            PayloadRange { lo: hi, hi }
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState – the live selection
// ---------------------------------------------------------------------------

/// Current site and payload selection. Replaced wholesale on each control
/// event, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl FilterState {
    /// Defaults: all sites, full observed payload range.
    pub fn initial(dataset: &LaunchDataset, fallback: (f64, f64)) -> Self {
        FilterState {
            site: SiteSelection::All,
            payload: PayloadRange::full(dataset, fallback),
        }
    }

    pub fn with_site(&self, site: SiteSelection) -> Self {
        FilterState {
            site,
            payload: self.payload,
        }
    }

    pub fn with_payload(&self, payload: PayloadRange) -> Self {
        FilterState {
            site: self.site.clone(),
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// Site / payload composition for the correlation view
// ---------------------------------------------------------------------------

/// How a specific site choice combines with the payload range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteFilterComposition {
    /// Rows must match both the site and the payload range.
    #[default]
    Intersect,
    /// Legacy dashboard behaviour: choosing a site replaces the payload
    /// filter, so all of that site's rows are shown whatever their mass.
    Override,
}

pub fn rows_in_range<'a>(dataset: &'a LaunchDataset, range: &PayloadRange) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .collect()
}

pub fn rows_for_site<'a>(dataset: &'a LaunchDataset, site: &SiteSelection) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| site.matches(&r.site))
        .collect()
}

/// Rows shown by the correlation view, in dataset order.
pub fn correlation_rows<'a>(
    dataset: &'a LaunchDataset,
    filter: &FilterState,
    composition: SiteFilterComposition,
) -> Vec<&'a Record> {
    match (&filter.site, composition) {
        (SiteSelection::All, _) => rows_in_range(dataset, &filter.payload),
        (site, SiteFilterComposition::Override) => rows_for_site(dataset, site),
        (site, SiteFilterComposition::Intersect) => dataset
            .records()
            .iter()
            .filter(|r| site.matches(&r.site) && filter.payload.contains(r.payload_mass_kg))
            .collect(),
    }
}
