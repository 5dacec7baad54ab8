/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → OrderDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ OrderDataset  │  Vec<OrderRecord>, sidebar indexes
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → retained indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
