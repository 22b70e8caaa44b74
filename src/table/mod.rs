//! `JSON_TABLE` projections: turning a JSON document into rows.
//!
//! ```
//! use sqljson::json::column;
//! use sqljson::table::{ColumnSpec, TableProjection};
//! use sqljson::{DataType, SqlExpression};
//!
//! let projection = TableProjection::builder()
//!     .source(column("doc"))
//!     .path("$.items[*]")
//!     .column(ColumnSpec::ordinality("n")?)
//!     .column(ColumnSpec::path("sku", DataType::varchar(16), "$.sku")?)
//!     .alias("items")
//!     .build()?;
//!
//! assert_eq!(
//!     projection.to_sql(),
//!     "JSON_TABLE(`doc`, '$.items[*]' COLUMNS(`n` FOR ORDINALITY, `sku` VARCHAR(16) PATH '$.sku')) AS `items`"
//! );
//! # Ok::<(), sqljson::ExprError>(())
//! ```

mod column;
mod projection;

pub use column::{ColumnKind, ColumnSpec, ColumnSpecBuilder, Fallback, TableColumn};
pub use projection::{JsonTable, TableProjection, TableProjectionBuilder};
