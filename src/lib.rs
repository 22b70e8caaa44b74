// ============================================================================
// sqljson Library
// ============================================================================

//! Typed MySQL JSON function expressions.
//!
//! Every MySQL JSON operation is described once in a [`catalog`] entry with
//! a parameterized template. Typed wrappers ([`JsonDocument`],
//! [`JsonObject`], [`JsonArray`], [`JsonScalar`], [`Predicate`],
//! [`JsonTable`]) fill those templates and nest freely, so callers compose
//! `JSON_*` calls without hand-writing SQL text.
//!
//! ```
//! use sqljson::json::{column, JsonOperand};
//! use sqljson::{RenderConfig, SqlExpression};
//!
//! let doc = column("profile");
//! let filter = doc.extract("$.name")?.unquote()?.eq("Ann");
//! assert_eq!(
//!     filter.to_sql(),
//!     "(JSON_UNQUOTE(JSON_EXTRACT(`profile`, '$.name')) = 'Ann')"
//! );
//!
//! let bound = filter.render_with(&RenderConfig::new().bind_literals());
//! assert_eq!(bound.sql, "(JSON_UNQUOTE(JSON_EXTRACT(`profile`, '$.name')) = ?)");
//! assert_eq!(bound.params.len(), 1);
//! # Ok::<(), sqljson::ExprError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod expression;
pub mod json;
pub mod parser;
pub mod registry;
pub mod table;

// Re-export main types for convenience
pub use config::{LiteralMode, ParameterStyle, RenderConfig};
pub use self::core::{DataType, ExprError, Result, Value};
pub use expression::{Argument, CompositeExpression, Constant, ExpressionVisitor, RenderedSql, SqlExpression};

// Re-export the expression surface
pub use json::{
    column, document, json_array, json_arrayagg, json_cast, json_literal, json_merge_patch,
    json_merge_preserve, json_object, json_objectagg, json_quote, json_valid, IntoPath, JsonArray,
    JsonArrayBuilder, JsonDocument, JsonObject, JsonObjectBuilder, JsonOperand, JsonPath, JsonScalar,
    Predicate, SearchMode,
};
pub use table::{ColumnSpec, Fallback, JsonTable, TableColumn, TableProjection, TableProjectionBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_exports_compose() {
        let doc = column("doc");
        let object = JsonObject::builder().put("role", "admin").build().unwrap();
        let updated = doc.merge_patch(&object).unwrap();
        assert_eq!(updated.to_sql(), "JSON_MERGE_PATCH(`doc`, JSON_OBJECT('role', 'admin'))");
    }

    #[test]
    fn test_dollar_placeholders_with_offset() {
        let config = RenderConfig::parse("mode=bind;style=dollar;offset=2").unwrap();
        let rendered = json_object(["a", "b"]).unwrap().render_with(&config);
        assert_eq!(rendered.sql, "JSON_OBJECT($3, $4)");
        assert_eq!(rendered.params, vec![Value::from("a"), Value::from("b")]);
    }
}
