use super::{JsonOperand, JsonPath};
use crate::catalog::{Call, Operation};
use crate::core::Result;
use crate::expression::{Argument, SqlExpression};

expression_wrapper!(
    /// A JSON object expression.
    JsonObject
);

impl JsonOperand for JsonObject {}

impl JsonObject {
    pub fn builder() -> JsonObjectBuilder {
        JsonObjectBuilder::default()
    }

    /// `JSON_SET(obj, '$.key', value)`. The key is quoted in the path when
    /// it is not a plain identifier.
    pub fn with_member(&self, key: &str, value: impl Into<Argument>) -> Result<JsonObject> {
        Call::new(Operation::JsonSet)
            .arg(self.composite())
            .arg(JsonPath::root().member(key))
            .arg(value)
            .build()
            .map(JsonObject::wrap)
    }

    /// `JSON_REMOVE(obj, '$.key')`
    pub fn without_member(&self, key: &str) -> Result<JsonObject> {
        Call::new(Operation::JsonRemove)
            .arg(self.composite())
            .arg(JsonPath::root().member(key))
            .build()
            .map(JsonObject::wrap)
    }
}

/// Collects key/value pairs for a `JSON_OBJECT(...)` call. Keys are always
/// text literals, so the argument list is paired by construction.
#[derive(Debug, Clone, Default)]
pub struct JsonObjectBuilder {
    args: Vec<Argument>,
}

impl JsonObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(mut self, key: impl Into<String>, value: impl Into<Argument>) -> Self {
        self.args.push(Argument::literal(key.into()));
        self.args.push(value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.args.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn build(self) -> Result<JsonObject> {
        Call::new(Operation::JsonObject)
            .args(self.args)
            .build()
            .map(JsonObject::wrap)
    }
}
