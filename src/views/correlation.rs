use crate::data::aggregate::group_by;
use crate::data::filter::{FilterState, SiteFilterComposition, correlation_rows};
use crate::data::model::LaunchDataset;

pub const X_LABEL: &str = "Payload Mass (kg)";
pub const Y_LABEL: &str = "Success (1) / Failure (0)";

/// Points of one booster category: `[payload mass, class]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub category: String,
    pub points: Vec<[f64; 2]>,
}

/// Everything the scatter chart needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl CorrelationData {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

pub struct CorrelationView;

impl CorrelationView {
    pub fn derive(
        dataset: &LaunchDataset,
        filter: &FilterState,
        composition: SiteFilterComposition,
    ) -> CorrelationData {
        let rows = correlation_rows(dataset, filter, composition);
        let series = group_by(&rows, |r| r.booster_category.clone())
            .into_iter()
            .map(|(category, members)| Series {
                category,
                points: members
                    .iter()
                    .map(|r| [r.payload_mass_kg, r.outcome.as_class() as f64])
                    .collect(),
            })
            .collect();

        CorrelationData {
            title: format!(
                "Correlation between Payload Mass and Success for {} Site",
                filter.site.title_name()
            ),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::SiteSelection;
    use crate::data::filter::PayloadRange;
    use crate::data::model::{Outcome, Record};

    fn masses(data: &CorrelationData) -> Vec<f64> {
        let mut m: Vec<f64> = data
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p[0]))
            .collect();
        m.sort_by(f64::total_cmp);
        m
    }

    #[test]
    fn all_sites_shows_exactly_rows_in_range() {
        let ds = LaunchDataset::from_records(vec![
            Record::new("A", 1000.0, Outcome::Success, "FT"),
            Record::new("A", 6000.0, Outcome::Success, "FT"),
            Record::new("B", 3000.0, Outcome::Failure, "v1.1"),
        ]);
        let filter = FilterState {
            site: SiteSelection::All,
            payload: PayloadRange::new(0.0, 5000.0),
        };
        let data = CorrelationView::derive(&ds, &filter, SiteFilterComposition::default());
        assert_eq!(masses(&data), vec![1000.0, 3000.0]);
        assert_eq!(data.series.len(), 2);
        assert_eq!(data.series[0].points, vec![[1000.0, 1.0]]);
        assert_eq!(data.series[1].points, vec![[3000.0, 0.0]]);
        assert_eq!(
            data.title,
            "Correlation between Payload Mass and Success for All Site"
        );
        assert_eq!(data.y_label, "Success (1) / Failure (0)");
    }

    /// Site A's only launch is at 9000 kg while the range is [0, 100].
    /// The default policy intersects site and range; the legacy policy
    /// drops the range once a site is chosen.
    #[test]
    fn specific_site_outside_range_depends_on_composition() {
        let ds = LaunchDataset::from_records(vec![
            Record::new("A", 9000.0, Outcome::Success, "B5"),
            Record::new("B", 50.0, Outcome::Failure, "v1.0"),
        ]);
        let filter = FilterState {
            site: SiteSelection::site("A"),
            payload: PayloadRange::new(0.0, 100.0),
        };

        let fixed = CorrelationView::derive(&ds, &filter, SiteFilterComposition::Intersect);
        assert_eq!(fixed.point_count(), 0);
        assert!(fixed.series.is_empty());
        assert!(fixed.title.contains("for A Site"));

        let legacy = CorrelationView::derive(&ds, &filter, SiteFilterComposition::Override);
        assert_eq!(masses(&legacy), vec![9000.0]);
    }

    #[test]
    fn range_property_holds_for_every_interval() {
        let ds = LaunchDataset::from_records(
            (0..=20)
                .map(|i| Record::new("A", i as f64 * 500.0, Outcome::Success, "FT"))
                .collect(),
        );
        for lo in (0..=10_000).step_by(1000) {
            for hi in (lo..=10_000).step_by(1000) {
                let filter = FilterState {
                    site: SiteSelection::All,
                    payload: PayloadRange::new(lo as f64, hi as f64),
                };
                let data = CorrelationView::derive(&ds, &filter, SiteFilterComposition::Intersect);
                let expected = ds
                    .records()
                    .iter()
                    .filter(|r| lo as f64 <= r.payload_mass_kg && r.payload_mass_kg <= hi as f64)
                    .count();
                assert_eq!(data.point_count(), expected, "range [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn empty_dataset_yields_no_points() {
        let filter = FilterState::initial(&LaunchDataset::default(), (0.0, 10_000.0));
        let data = CorrelationView::derive(
            &LaunchDataset::default(),
            &filter,
            SiteFilterComposition::Intersect,
        );
        assert_eq!(data.point_count(), 0);
    }
}
