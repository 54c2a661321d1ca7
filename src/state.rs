use crate::color::CategoryColors;
use crate::config::DashboardConfig;
use crate::data::catalog::{SiteCatalog, SiteSelection};
use crate::data::filter::{FilterState, PayloadRange, SiteFilterComposition};
use crate::data::model::LaunchDataset;
use crate::views::correlation::{CorrelationData, CorrelationView};
use crate::views::proportion::{ProportionData, ProportionView};

// ---------------------------------------------------------------------------
// Controls, views and who listens to whom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SiteSelector,
    PayloadRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Proportion,
    Correlation,
}

/// Which views recompute when a control changes.
pub const SUBSCRIPTIONS: &[(Control, &[ViewId])] = &[
    (Control::SiteSelector, &[ViewId::Proportion, ViewId::Correlation]),
    (Control::PayloadRange, &[ViewId::Correlation]),
];

pub fn subscribers(control: Control) -> &'static [ViewId] {
    SUBSCRIPTIONS
        .iter()
        .find(|(c, _)| *c == control)
        .map(|(_, views)| *views)
        .unwrap_or(&[])
}

/// A value published by one of the two controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteChanged(SiteSelection),
    PayloadChanged(PayloadRange),
}

impl ControlEvent {
    pub fn control(&self) -> Control {
        match self {
            ControlEvent::SiteChanged(_) => Control::SiteSelector,
            ControlEvent::PayloadChanged(_) => Control::PayloadRange,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-view lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Computing,
    Rendered,
}

/// Derived data of one view plus its lifecycle bookkeeping.
#[derive(Debug, Clone)]
pub struct ViewSlot<T> {
    pub data: T,
    pub phase: ViewPhase,
    /// Number of recomputes since start-up.
    pub revision: u64,
}

impl<T> ViewSlot<T> {
    fn new(data: T) -> Self {
        ViewSlot {
            data,
            phase: ViewPhase::Rendered,
            revision: 0,
        }
    }

    /// Swap in freshly computed data. The previous value stays visible until
    /// the new one is complete.
    fn recompute(&mut self, compute: impl FnOnce() -> T) {
        self.phase = ViewPhase::Computing;
        let next = compute();
        self.data = next;
        self.revision += 1;
        self.phase = ViewPhase::Rendered;
    }

    fn presented(&mut self) {
        if self.phase == ViewPhase::Rendered {
            self.phase = ViewPhase::Idle;
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Launch records, loaded once before the window opens.
    pub dataset: LaunchDataset,

    /// "All" plus every distinct site.
    pub catalog: SiteCatalog,

    /// The only mutable selection in the app.
    pub filter: FilterState,

    pub composition: SiteFilterComposition,

    /// Colour per booster category for the scatter chart.
    pub booster_colors: CategoryColors,

    pub proportion: ViewSlot<ProportionData>,
    pub correlation: ViewSlot<CorrelationData>,

    /// Text typed into the site selector's search box.
    pub site_query: String,

    /// Slider bounds and tick marks.
    pub slider_bounds: (f64, f64),
    pub slider_step: f64,
    pub slider_marks: Vec<f64>,
}

impl AppState {
    /// Build catalog, default filters and the first render of both views.
    pub fn new(dataset: LaunchDataset, config: &DashboardConfig) -> Self {
        let catalog = SiteCatalog::from_dataset(&dataset);
        let filter = FilterState::initial(&dataset, config.slider_bounds());
        let booster_colors = CategoryColors::new(&dataset.booster_categories());
        let proportion = ViewSlot::new(ProportionView::derive(&dataset, &filter.site));
        let correlation = ViewSlot::new(CorrelationView::derive(
            &dataset,
            &filter,
            config.composition,
        ));

        log::info!(
            "Dashboard ready: {} records, {} sites, payload {:.0}..={:.0} kg",
            dataset.len(),
            catalog.entries().len() - 1,
            filter.payload.lo(),
            filter.payload.hi()
        );

        AppState {
            dataset,
            catalog,
            filter,
            composition: config.composition,
            booster_colors,
            proportion,
            correlation,
            site_query: String::new(),
            slider_bounds: config.slider_bounds(),
            slider_step: config.slider_step,
            slider_marks: config.slider_marks(),
        }
    }

    /// Apply one control event: replace the filter state and recompute every
    /// view subscribed to that control. Returns the views that recomputed.
    pub fn dispatch(&mut self, event: ControlEvent) -> Vec<ViewId> {
        if let ControlEvent::SiteChanged(site) = &event {
            if !self.catalog.contains(site) {
                log::warn!("Ignoring site '{site}' not present in the catalog");
                return Vec::new();
            }
        }
        let next = match &event {
            ControlEvent::SiteChanged(site) => self.filter.with_site(site.clone()),
            ControlEvent::PayloadChanged(range) => self.filter.with_payload(*range),
        };
        if next == self.filter {
            return Vec::new();
        }
        log::debug!("{:?} -> {:?}", event.control(), event);
        self.filter = next;

        let views = subscribers(event.control()).to_vec();
        for view in &views {
            self.recompute(*view);
        }
        views
    }

    fn recompute(&mut self, view: ViewId) {
        let dataset = &self.dataset;
        let filter = &self.filter;
        match view {
            ViewId::Proportion => {
                self.proportion
                    .recompute(|| ProportionView::derive(dataset, &filter.site));
                log::debug!(
                    "proportion view r{}: {} slices",
                    self.proportion.revision,
                    self.proportion.data.slices.len()
                );
            }
            ViewId::Correlation => {
                let composition = self.composition;
                self.correlation
                    .recompute(|| CorrelationView::derive(dataset, filter, composition));
                log::debug!(
                    "correlation view r{}: {} points",
                    self.correlation.revision,
                    self.correlation.data.point_count()
                );
            }
        }
    }

    /// Called once a frame has shown the current data.
    pub fn mark_presented(&mut self) {
        self.proportion.presented();
        self.correlation.presented();
    }
}
