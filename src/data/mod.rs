//! Data layer: the passenger table, loading, filtering, aggregation and
//! export.
//!
//! ```text
//!  data/titanic.csv (bundled)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  dedup, drop raw columns, impute → PassengerTable
//!   └──────────┘
//!        │  Arc<PassengerTable>, read-only
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  range + multi-select predicates → fresh PassengerTable
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌──────────┐   ┌──────────┐
//!   │  stats    │   │  export   │  survival shares / CSV + XLSX bytes
//!   └──────────┘   └──────────┘
//! ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
