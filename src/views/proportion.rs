use crate::data::aggregate::{count_by, group_by};
use crate::data::catalog::SiteSelection;
use crate::data::filter::rows_for_site;
use crate::data::model::{LaunchDataset, Outcome, Record};

/// One labelled wedge of the proportion chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: usize,
}

impl Slice {
    fn new(label: impl Into<String>, value: usize) -> Self {
        Slice {
            label: label.into(),
            value,
        }
    }
}

/// Everything the pie chart needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionData {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl ProportionData {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Percentage share of slice `i`; 0 when the chart is empty.
    pub fn share(&self, i: usize) -> f64 {
        let total = self.total();
        match self.slices.get(i) {
            Some(s) if total > 0 => s.value as f64 * 100.0 / total as f64,
            _ => 0.0,
        }
    }

    /// No wedge has a non-zero value.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

pub struct ProportionView;

impl ProportionView {
    pub fn derive(dataset: &LaunchDataset, site: &SiteSelection) -> ProportionData {
        match site {
            SiteSelection::All => ProportionData {
                title: format!("Total Success Launches for {} Site", site.title_name()),
                slices: successes_per_site(dataset.records()),
            },
            SiteSelection::Site(name) => {
                let rows = rows_for_site(dataset, site);
                ProportionData {
                    title: format!("Success vs Failure for {name}"),
                    slices: outcome_split(&rows),
                }
            }
        }
    }
}

/// One slice per site valued at its success count. Sites without a single
/// success still get a (zero) slice so every site stays in the legend.
fn successes_per_site(records: &[Record]) -> Vec<Slice> {
    group_by(records, |r| r.site.clone())
        .into_iter()
        .map(|(site, rows)| {
            let successes = rows
                .iter()
                .filter(|r| r.outcome == Outcome::Success)
                .count();
            Slice::new(site, successes)
        })
        .collect()
}

/// Success / Failure counts of `rows`, largest first, ties Success first.
fn outcome_split(rows: &[&Record]) -> Vec<Slice> {
    let mut counts = count_by(rows, |r| r.outcome);
    counts.sort_by(|(oa, ca), (ob, cb)| cb.cmp(ca).then(ob.cmp(oa)));
    counts
        .into_iter()
        .map(|(outcome, n)| Slice::new(outcome.label(), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sites A (3 successes / 2 failures) and B (1 success / 4 failures).
    fn scenario() -> LaunchDataset {
        let mut records = Vec::new();
        for (site, ok, failed) in [("A", 3, 2), ("B", 1, 4)] {
            for _ in 0..ok {
                records.push(Record::new(site, 1000.0, Outcome::Success, "FT"));
            }
            for _ in 0..failed {
                records.push(Record::new(site, 2000.0, Outcome::Failure, "v1.1"));
            }
        }
        LaunchDataset::from_records(records)
    }

    #[test]
    fn all_sites_yields_success_count_per_site() {
        let data = ProportionView::derive(&scenario(), &SiteSelection::All);
        assert_eq!(data.slices, vec![Slice::new("A", 3), Slice::new("B", 1)]);
        assert_eq!(data.total(), 4);
        assert_eq!(data.title, "Total Success Launches for All Site");
    }

    #[test]
    fn single_site_splits_success_and_failure() {
        let data = ProportionView::derive(&scenario(), &SiteSelection::site("A"));
        assert_eq!(
            data.slices,
            vec![Slice::new("Success", 3), Slice::new("Failure", 2)]
        );
        assert_eq!(data.title, "Success vs Failure for A");
        assert!((data.share(0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn site_without_failures_has_a_single_slice() {
        let ds = LaunchDataset::from_records(vec![
            Record::new("KSC LC-39A", 2490.0, Outcome::Success, "FT"),
            Record::new("KSC LC-39A", 5300.0, Outcome::Success, "FT"),
        ]);
        let data = ProportionView::derive(&ds, &SiteSelection::site("KSC LC-39A"));
        assert_eq!(data.slices, vec![Slice::new("Success", 2)]);
        assert_eq!(data.share(0), 100.0);
    }

    #[test]
    fn tie_puts_success_first() {
        let ds = LaunchDataset::from_records(vec![
            Record::new("A", 1.0, Outcome::Failure, "FT"),
            Record::new("A", 2.0, Outcome::Success, "FT"),
        ]);
        let data = ProportionView::derive(&ds, &SiteSelection::site("A"));
        assert_eq!(data.slices[0].label, "Success");
    }

    #[test]
    fn slice_totals_match_dataset() {
        let ds = scenario();
        let all = ProportionView::derive(&ds, &SiteSelection::All);
        let successes = ds
            .records()
            .iter()
            .filter(|r| r.outcome == Outcome::Success)
            .count();
        assert_eq!(all.total(), successes);

        for site in ds.sites() {
            let data = ProportionView::derive(&ds, &SiteSelection::Site(site.clone()));
            let rows = ds.records().iter().filter(|r| r.site == site).count();
            assert_eq!(data.total(), rows);
        }
    }

    #[test]
    fn empty_dataset_and_unknown_site_have_no_slices() {
        let empty = ProportionView::derive(&LaunchDataset::default(), &SiteSelection::All);
        assert!(empty.slices.is_empty());
        assert!(empty.is_empty());
        assert_eq!(empty.share(0), 0.0);

        let none = ProportionView::derive(&scenario(), &SiteSelection::site("Z"));
        assert!(none.slices.is_empty());
    }

    #[test]
    fn derive_is_idempotent() {
        let ds = scenario();
        let site = SiteSelection::site("B");
        assert_eq!(
            ProportionView::derive(&ds, &site),
            ProportionView::derive(&ds, &site)
        );
    }
}
