/// Data layer: core types, loading, bucketing, and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SampleSet
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ SampleSet  │  Vec<Sample>, validated ability range
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  bucket   │  one bucket per integer ability label
///   └──────────┘
///        │
///        ▼   (analysis)
///   ┌──────────┐
///   │  export   │  AnalysisReport → .csv table / .json document
///   └──────────┘
/// ```

pub mod bucket;
pub mod export;
pub mod loader;
pub mod model;
