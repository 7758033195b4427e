/// Data layer: row model, loading, and the filter → sort → paginate pipeline.
///
/// Architecture:
/// ```text
///  Domain.csv (path or http(s) URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch text → parse CSV → normalize → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  columns + Vec<Row>, reordered in place by `sort`
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search term → matching row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ paginate  │  page index + page size → visible slice
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod paginate;
pub mod sort;
