/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PlayerDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PlayerDataset │  Vec<Player>, distinct-value index, age bounds
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply criteria → visible indices, dense / top-N views
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
