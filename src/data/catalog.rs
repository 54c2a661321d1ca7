use std::fmt;

use super::model::LaunchDataset;

/// Label shown for the synthetic "no site filter" entry.
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// SiteSelection – one entry of the site catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    #[cfg(test)]
    pub fn site(name: &str) -> Self {
        SiteSelection::Site(name.to_string())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelection::All)
    }

    /// Whether a record at `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }

    /// The label used in chart titles: "All" or the site name.
    pub fn title_name(&self) -> &str {
        match self {
            SiteSelection::All => "All",
            SiteSelection::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => f.write_str(ALL_SITES_LABEL),
            SiteSelection::Site(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteCatalog – "All" plus distinct sites, built once
// ---------------------------------------------------------------------------

/// Options offered by the site selector: `All` first, then every distinct
/// site of the dataset in first-occurrence order.
#[derive(Debug, Clone)]
pub struct SiteCatalog {
    entries: Vec<SiteSelection>,
}

impl SiteCatalog {
    pub fn from_dataset(dataset: &LaunchDataset) -> Self {
        let entries = std::iter::once(SiteSelection::All)
            .chain(dataset.sites().into_iter().map(SiteSelection::Site))
            .collect();
        SiteCatalog { entries }
    }

    pub fn entries(&self) -> &[SiteSelection] {
        &self.entries
    }

    pub fn contains(&self, selection: &SiteSelection) -> bool {
        self.entries.contains(selection)
    }

    /// Entries whose label contains `query` (case-insensitive).
    pub fn search(&self, query: &str) -> Vec<&SiteSelection> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.to_string().to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Outcome, Record};

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            Record::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            Record::new("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            Record::new("CCAFS LC-40", 677.0, Outcome::Success, "v1.0"),
            Record::new("KSC LC-39A", 2490.0, Outcome::Success, "FT"),
        ])
    }

    #[test]
    fn catalog_starts_with_all_then_first_occurrence() {
        let catalog = SiteCatalog::from_dataset(&dataset());
        assert_eq!(
            catalog.entries(),
            &[
                SiteSelection::All,
                SiteSelection::site("CCAFS LC-40"),
                SiteSelection::site("VAFB SLC-4E"),
                SiteSelection::site("KSC LC-39A"),
            ]
        );
        assert!(catalog.contains(&SiteSelection::site("KSC LC-39A")));
        assert!(!catalog.contains(&SiteSelection::site("Boca Chica")));
    }

    #[test]
    fn empty_dataset_yields_only_all() {
        let catalog = SiteCatalog::from_dataset(&LaunchDataset::default());
        assert_eq!(catalog.entries(), &[SiteSelection::All]);
    }

    #[test]
    fn search_matches_labels_case_insensitively() {
        let catalog = SiteCatalog::from_dataset(&dataset());
        let hits = catalog.search("ccafs");
        assert_eq!(hits, vec![&SiteSelection::site("CCAFS LC-40")]);
        assert_eq!(catalog.search("all"), vec![&SiteSelection::All]);
        assert_eq!(catalog.search("  ").len(), catalog.entries().len());
    }
}
