/// Derived chart data, recomputed from the dataset and the current filter
/// state on every relevant control change.
///
/// ```text
///   LaunchDataset + FilterState
///        │
///        ├──► proportion   site  → labelled slices
///        │
///        └──► correlation  site + payload range → points per booster category
/// ```
///
/// Both are pure functions of their inputs; rendering lives in `ui::plot`.

pub mod correlation;
pub mod proportion;
