/// Data layer: core types, loading, catalog, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawRecord → validated Record
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<Record>, immutable after load
///   └──────────────┘
///        │
///        ├──► catalog    "All" + distinct sites
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates → filtered rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  group-by / count in first-occurrence order
///   └───────────┘
/// ```

pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod loader;
pub mod model;
