use super::{JsonArray, JsonObject, JsonOperand, JsonScalar};
use crate::catalog::ResultKind;

expression_wrapper!(
    /// A JSON document of unknown shape: a column, an extraction result,
    /// or the output of a modify operation.
    JsonDocument
);

impl JsonOperand for JsonDocument {}

impl JsonDocument {
    /// Treats the document as an object, e.g. after extracting `$.profile`.
    pub fn as_object(&self) -> JsonObject {
        JsonObject::wrap(self.0.clone().with_kind(ResultKind::Json))
    }

    pub fn as_array(&self) -> JsonArray {
        JsonArray::wrap(self.0.clone().with_kind(ResultKind::Json))
    }

    /// Uses the document where a scalar is expected, without unquoting.
    pub fn as_scalar(&self) -> JsonScalar {
        JsonScalar::wrap(self.0.clone().with_kind(ResultKind::Text))
    }
}
