//! Ingestion of fixed-layout weather-station CSV files.
//!
//! ```text
//!  data/<station>.csv
//!        │
//!        ▼
//!   ┌────────────┐   RowLayout: row index → action
//!   │  classify  │   lazy (index, emission) per row
//!   └────────────┘
//!        │
//!        ├──────────────► sink     (stdout, JSON lines, memory)
//!        └──────────────► station  (typed header block)
//! ```
//!
//! Data rows are skipped by the classifier; `schema` holds the typed
//! records they map onto.

pub mod classify;
pub mod layout;
pub mod schema;
pub mod sink;
pub mod station;
pub mod units;

pub use classify::{classify_and_emit, classify_rows, ClassifiedRow, ClassifyError, Emission};
pub use layout::{HeaderField, RowAction, RowIndex, RowLayout};
pub use sink::{drain, Sink};
pub use station::{read_station_header, StationHeader};
