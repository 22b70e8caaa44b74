//! Typed JSON expression wrappers
//!
//! Every wrapper is an immutable façade over a [`CompositeExpression`];
//! operations return new wrappers and wrappers convert into [`Argument`]s,
//! so expressions nest to any depth.
//!
//! # Architecture
//!
//! - `path.rs` - validated JSON path values
//! - `operand.rs` - operations shared by every JSON document flavor
//! - `document.rs` - generic JSON document expressions
//! - `object.rs` - JSON object expressions and the object literal builder
//! - `array.rs` - JSON array expressions and the array literal builder
//! - `scalar.rs` - scalar (text/numeric) results
//! - `predicate.rs` - boolean conditions for filter positions

/// Declares an immutable wrapper around a `CompositeExpression`.
macro_rules! expression_wrapper {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(crate::expression::CompositeExpression);

        impl $name {
            pub(crate) fn wrap(expr: crate::expression::CompositeExpression) -> Self {
                Self(expr)
            }

            pub fn into_composite(self) -> crate::expression::CompositeExpression {
                self.0
            }
        }

        impl crate::expression::SqlExpression for $name {
            fn composite(&self) -> &crate::expression::CompositeExpression {
                &self.0
            }
        }

        impl From<$name> for crate::expression::Argument {
            fn from(wrapper: $name) -> Self {
                crate::expression::Argument::Expression(wrapper.0)
            }
        }

        impl From<&$name> for crate::expression::Argument {
            fn from(wrapper: &$name) -> Self {
                crate::expression::Argument::Expression(wrapper.0.clone())
            }
        }

        impl From<$name> for crate::expression::CompositeExpression {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub(crate) use expression_wrapper;

mod array;
mod document;
mod object;
mod operand;
mod path;
mod predicate;
mod scalar;

use crate::catalog::{Call, Operation, ResultKind};
use crate::core::Result;
use crate::expression::argument::cast_json_text;
use crate::expression::quote::quote_identifier;
use crate::expression::{Argument, CompositeExpression};

pub use array::{JsonArray, JsonArrayBuilder};
pub use document::JsonDocument;
pub use object::{JsonObject, JsonObjectBuilder};
pub use operand::{IntoPath, JsonOperand, SearchMode};
pub use path::JsonPath;
pub use predicate::Predicate;
pub use scalar::JsonScalar;

/// A JSON column reference. Dotted names are quoted part by part:
/// `column("u.profile")` renders `` `u`.`profile` ``.
pub fn column(name: &str) -> JsonDocument {
    let quoted: Vec<String> = name.split('.').map(quote_identifier).collect();
    JsonDocument::wrap(CompositeExpression::raw(quoted.join("."), ResultKind::Json))
}

/// Trusted SQL text used as a JSON document, e.g. a subquery or a column
/// expression the caller already quoted.
pub fn document(sql: impl Into<String>) -> JsonDocument {
    JsonDocument::wrap(CompositeExpression::raw(sql, ResultKind::Json))
}

/// A JSON value as a document: `CAST('<json>' AS JSON)`.
pub fn json_literal(json: &serde_json::Value) -> JsonDocument {
    JsonDocument::wrap(cast_json_text(json.to_string()))
}

/// `CAST(expr AS JSON)`
pub fn json_cast(expr: impl Into<Argument>) -> Result<JsonDocument> {
    Call::new(Operation::CastJson).arg(expr).build().map(JsonDocument::wrap)
}

/// `JSON_ARRAY(v1, v2, ...)`; zero values give `JSON_ARRAY()`.
pub fn json_array<I>(values: I) -> Result<JsonArray>
where
    I: IntoIterator,
    I::Item: Into<Argument>,
{
    Call::new(Operation::JsonArray).args(values).build().map(JsonArray::wrap)
}

/// `JSON_OBJECT(k1, v1, k2, v2, ...)` from a flat key/value list, which must
/// have an even length.
pub fn json_object<I>(keys_and_values: I) -> Result<JsonObject>
where
    I: IntoIterator,
    I::Item: Into<Argument>,
{
    Call::new(Operation::JsonObject)
        .args(keys_and_values)
        .build()
        .map(JsonObject::wrap)
}

/// `JSON_QUOTE(text)`
pub fn json_quote(text: impl Into<Argument>) -> Result<JsonScalar> {
    Call::new(Operation::JsonQuote).arg(text).build().map(JsonScalar::wrap)
}

/// `JSON_VALID(expr)` for arbitrary text, not only JSON documents.
pub fn json_valid(expr: impl Into<Argument>) -> Result<Predicate> {
    Call::new(Operation::JsonValid).arg(expr).build().map(Predicate::wrap)
}

/// `JSON_ARRAYAGG(expr)`
pub fn json_arrayagg(expr: impl Into<Argument>) -> Result<JsonArray> {
    Call::new(Operation::JsonArrayAgg).arg(expr).build().map(JsonArray::wrap)
}

/// `JSON_OBJECTAGG(key, value)`
pub fn json_objectagg(key: impl Into<Argument>, value: impl Into<Argument>) -> Result<JsonObject> {
    Call::new(Operation::JsonObjectAgg)
        .arg(key)
        .arg(value)
        .build()
        .map(JsonObject::wrap)
}

/// `JSON_MERGE_PATCH(d1, d2, ...)`; at least two documents.
pub fn json_merge_patch<I>(documents: I) -> Result<JsonDocument>
where
    I: IntoIterator,
    I::Item: Into<Argument>,
{
    Call::new(Operation::JsonMergePatch)
        .args(documents)
        .build()
        .map(JsonDocument::wrap)
}

/// `JSON_MERGE_PRESERVE(d1, d2, ...)`; at least two documents.
pub fn json_merge_preserve<I>(documents: I) -> Result<JsonDocument>
where
    I: IntoIterator,
    I::Item: Into<Argument>,
{
    Call::new(Operation::JsonMergePreserve)
        .args(documents)
        .build()
        .map(JsonDocument::wrap)
}
