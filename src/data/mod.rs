/// Data layer: the trace table and its loaders.
///
/// Architecture:
/// ```text
///  .dat / .txt / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TraceTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ TraceTable  │  headers + columns, column 0 = time
///   └────────────┘
///        │
///        ▼
///     series()     one borrowed Series per trace column
/// ```

pub mod loader;
pub mod model;
