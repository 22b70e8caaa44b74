use super::{JsonDocument, JsonOperand, JsonPath, JsonScalar, Predicate};
use crate::catalog::{Call, Operation};
use crate::core::Result;
use crate::expression::{Argument, SqlExpression};

expression_wrapper!(
    /// A JSON array expression.
    JsonArray
);

impl JsonOperand for JsonArray {}

impl JsonArray {
    pub fn builder() -> JsonArrayBuilder {
        JsonArrayBuilder::default()
    }

    /// `JSON_ARRAY_APPEND(arr, '$', value)`
    pub fn append(&self, value: impl Into<Argument>) -> Result<JsonArray> {
        Call::new(Operation::JsonArrayAppend)
            .arg(self.composite())
            .arg(JsonPath::root())
            .arg(value)
            .build()
            .map(JsonArray::wrap)
    }

    /// `JSON_ARRAY_INSERT(arr, '$[index]', value)`
    pub fn insert_at(&self, index: usize, value: impl Into<Argument>) -> Result<JsonArray> {
        Call::new(Operation::JsonArrayInsert)
            .arg(self.composite())
            .arg(JsonPath::root().index(index))
            .arg(value)
            .build()
            .map(JsonArray::wrap)
    }

    /// `JSON_EXTRACT(arr, '$[index]')`
    pub fn element(&self, index: usize) -> Result<JsonDocument> {
        self.extract(JsonPath::root().index(index))
    }

    /// `(value MEMBER OF(arr))`
    pub fn contains_value(&self, value: impl Into<Argument>) -> Result<Predicate> {
        Call::new(Operation::MemberOf)
            .arg(value)
            .arg(self.composite())
            .build()
            .map(Predicate::wrap)
    }

    /// `JSON_LENGTH(arr)`
    pub fn len(&self) -> Result<JsonScalar> {
        self.length()
    }
}

/// Collects the elements of a `JSON_ARRAY(...)` call.
#[derive(Debug, Clone, Default)]
pub struct JsonArrayBuilder {
    items: Vec<Argument>,
}

impl JsonArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, value: impl Into<Argument>) -> Self {
        self.items.push(value.into());
        self
    }

    pub fn extend<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Argument>,
    {
        self.items.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<JsonArray> {
        Call::new(Operation::JsonArray)
            .args(self.items)
            .build()
            .map(JsonArray::wrap)
    }
}
