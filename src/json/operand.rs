use crate::catalog::{Call, Operation};
use crate::core::{DataType, ExprError, Result, Value};
use crate::expression::{Argument, SqlExpression};
use crate::table::TableProjectionBuilder;

use super::{JsonArray, JsonDocument, JsonPath, JsonScalar, Predicate};

/// Anything usable as a JSON path argument. String input is validated.
pub trait IntoPath {
    fn into_path(self) -> Result<JsonPath>;
}

impl IntoPath for JsonPath {
    fn into_path(self) -> Result<JsonPath> {
        Ok(self)
    }
}

impl IntoPath for &JsonPath {
    fn into_path(self) -> Result<JsonPath> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<JsonPath> {
        JsonPath::parse(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<JsonPath> {
        JsonPath::parse(&self)
    }
}

/// `one_or_all` argument of `JSON_CONTAINS_PATH` and `JSON_SEARCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    One,
    All,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::All => "all",
        }
    }
}

impl From<SearchMode> for Argument {
    fn from(mode: SearchMode) -> Self {
        Argument::Literal(Value::Text(mode.as_str().to_string()))
    }
}

fn path_args<I>(paths: I) -> Result<Vec<Argument>>
where
    I: IntoIterator,
    I::Item: IntoPath,
{
    paths
        .into_iter()
        .map(|path| path.into_path().map(Argument::from))
        .collect()
}

fn pair_args<I, P, V>(pairs: I) -> Result<Vec<Argument>>
where
    I: IntoIterator<Item = (P, V)>,
    P: IntoPath,
    V: Into<Argument>,
{
    let mut args = Vec::new();
    for (path, value) in pairs {
        args.push(Argument::from(path.into_path()?));
        args.push(value.into());
    }
    Ok(args)
}

fn on<T: JsonOperand>(operation: Operation, target: &T) -> Call {
    Call::new(operation).arg(target.composite())
}

/// Operations shared by every JSON document flavor.
///
/// Each method checks its argument shape against the catalog before
/// rendering and returns a new expression; `self` is never modified.
pub trait JsonOperand: SqlExpression + Sized {
    /// `JSON_EXTRACT(doc, path)`
    fn extract<P: IntoPath>(&self, path: P) -> Result<JsonDocument> {
        self.extract_all([path])
    }

    /// `JSON_EXTRACT(doc, p1, p2, ...)`; needs at least one path.
    fn extract_all<I>(&self, paths: I) -> Result<JsonDocument>
    where
        I: IntoIterator,
        I::Item: IntoPath,
    {
        on(Operation::JsonExtract, self)
            .args(path_args(paths)?)
            .build()
            .map(JsonDocument::wrap)
    }

    /// `doc->path`. MySQL only accepts a column on the left side.
    fn get<P: IntoPath>(&self, path: P) -> Result<JsonDocument> {
        on(Operation::ColumnPath, self)
            .arg(path.into_path()?)
            .build()
            .map(JsonDocument::wrap)
    }

    /// `doc->>path`
    fn get_text<P: IntoPath>(&self, path: P) -> Result<JsonScalar> {
        on(Operation::ColumnPathUnquote, self)
            .arg(path.into_path()?)
            .build()
            .map(JsonScalar::wrap)
    }

    /// `JSON_VALUE(doc, path)`
    fn value<P: IntoPath>(&self, path: P) -> Result<JsonScalar> {
        on(Operation::JsonValue, self)
            .arg(path.into_path()?)
            .build()
            .map(JsonScalar::wrap)
    }

    /// `JSON_VALUE(doc, path RETURNING type)`
    fn value_returning<P: IntoPath>(&self, path: P, returning: DataType) -> Result<JsonScalar> {
        if !returning.is_returnable() {
            return Err(ExprError::shape(
                "JSON_VALUE",
                "a RETURNING type among SIGNED, UNSIGNED, DECIMAL, FLOAT, DOUBLE, CHAR, DATE, TIME, DATETIME, YEAR, JSON",
                returning.to_string(),
            ));
        }
        on(Operation::JsonValueReturning, self)
            .arg(path.into_path()?)
            .arg(Argument::raw(returning.to_string()))
            .build()
            .map(JsonScalar::wrap)
    }

    /// `JSON_CONTAINS(doc, candidate)`
    fn contains(&self, candidate: impl Into<Argument>) -> Result<Predicate> {
        on(Operation::JsonContains, self)
            .arg(candidate)
            .build()
            .map(Predicate::wrap)
    }

    /// `JSON_CONTAINS(doc, candidate, path)`
    fn contains_at<P: IntoPath>(&self, candidate: impl Into<Argument>, path: P) -> Result<Predicate> {
        on(Operation::JsonContains, self)
            .arg(candidate)
            .arg(path.into_path()?)
            .build()
            .map(Predicate::wrap)
    }

    /// `JSON_CONTAINS_PATH(doc, 'one'|'all', p1, ...)`
    fn contains_path<I>(&self, mode: SearchMode, paths: I) -> Result<Predicate>
    where
        I: IntoIterator,
        I::Item: IntoPath,
    {
        on(Operation::JsonContainsPath, self)
            .arg(mode)
            .args(path_args(paths)?)
            .build()
            .map(Predicate::wrap)
    }

    fn keys(&self) -> Result<JsonArray> {
        on(Operation::JsonKeys, self).build().map(JsonArray::wrap)
    }

    fn keys_at<P: IntoPath>(&self, path: P) -> Result<JsonArray> {
        on(Operation::JsonKeys, self)
            .arg(path.into_path()?)
            .build()
            .map(JsonArray::wrap)
    }

    fn overlaps(&self, other: impl Into<Argument>) -> Result<Predicate> {
        on(Operation::JsonOverlaps, self)
            .arg(other)
            .build()
            .map(Predicate::wrap)
    }

    /// `JSON_SEARCH(doc, mode, needle)`: path(s) of matching strings.
    fn search(&self, mode: SearchMode, needle: impl Into<Argument>) -> Result<JsonDocument> {
        on(Operation::JsonSearch, self)
            .arg(mode)
            .arg(needle)
            .build()
            .map(JsonDocument::wrap)
    }

    /// `JSON_SEARCH(doc, mode, needle, escape, p1, ...)`. Without an escape
    /// character but with paths, `NULL` selects the default escape.
    fn search_in<I>(
        &self,
        mode: SearchMode,
        needle: impl Into<Argument>,
        escape: Option<char>,
        paths: I,
    ) -> Result<JsonDocument>
    where
        I: IntoIterator,
        I::Item: IntoPath,
    {
        let paths = path_args(paths)?;
        let mut call = on(Operation::JsonSearch, self).arg(mode).arg(needle);
        call = match escape {
            Some(c) => call.arg(Value::Text(c.to_string())),
            None if !paths.is_empty() => call.arg(Value::Null),
            None => call,
        };
        call.args(paths).build().map(JsonDocument::wrap)
    }

    /// `(value MEMBER OF(array))` with this expression as the value.
    fn member_of(&self, array: impl Into<Argument>) -> Result<Predicate> {
        on(Operation::MemberOf, self)
            .arg(array)
            .build()
            .map(Predicate::wrap)
    }

    fn array_append<P: IntoPath>(&self, path: P, value: impl Into<Argument>) -> Result<JsonDocument> {
        self.array_append_all([(path, value.into())])
    }

    fn array_append_all<I, P, V>(&self, pairs: I) -> Result<JsonDocument>
    where
        I: IntoIterator<Item = (P, V)>,
        P: IntoPath,
        V: Into<Argument>,
    {
        on(Operation::JsonArrayAppend, self)
            .args(pair_args(pairs)?)
            .build()
            .map(JsonDocument::wrap)
    }

    fn array_insert<P: IntoPath>(&self, path: P, value: impl Into<Argument>) -> Result<JsonDocument> {
        self.array_insert_all([(path, value.into())])
    }

    fn array_insert_all<I, P, V>(&self, pairs: I) -> Result<JsonDocument>
    where
        I: IntoIterator<Item = (P, V)>,
        P: IntoPath,
        V: Into<Argument>,
    {
        on(Operation::JsonArrayInsert, self)
            .args(pair_args(pairs)?)
            .build()
            .map(JsonDocument::wrap)
    }

    /// `JSON_INSERT`: adds values only where the path does not exist yet.
    fn insert<P: IntoPath>(&self, path: P, value: impl Into<Argument>) -> Result<JsonDocument> {
        self.insert_all([(path, value.into())])
    }

    fn insert_all<I, P, V>(&self, pairs: I) -> Result<JsonDocument>
    where
        I: IntoIterator<Item = (P, V)>,
        P: IntoPath,
        V: Into<Argument>,
    {
        on(Operation::JsonInsert, self)
            .args(pair_args(pairs)?)
            .build()
            .map(JsonDocument::wrap)
    }

    /// `JSON_REPLACE`: changes existing values only.
    fn replace<P: IntoPath>(&self, path: P, value: impl Into<Argument>) -> Result<JsonDocument> {
        self.replace_all([(path, value.into())])
    }

    fn replace_all<I, P, V>(&self, pairs: I) -> Result<JsonDocument>
    where
        I: IntoIterator<Item = (P, V)>,
        P: IntoPath,
        V: Into<Argument>,
    {
        on(Operation::JsonReplace, self)
            .args(pair_args(pairs)?)
            .build()
            .map(JsonDocument::wrap)
    }

    /// `JSON_SET`: inserts or replaces.
    fn set<P: IntoPath>(&self, path: P, value: impl Into<Argument>) -> Result<JsonDocument> {
        self.set_all([(path, value.into())])
    }

    fn set_all<I, P, V>(&self, pairs: I) -> Result<JsonDocument>
    where
        I: IntoIterator<Item = (P, V)>,
        P: IntoPath,
        V: Into<Argument>,
    {
        on(Operation::JsonSet, self)
            .args(pair_args(pairs)?)
            .build()
            .map(JsonDocument::wrap)
    }

    fn remove<P: IntoPath>(&self, path: P) -> Result<JsonDocument> {
        self.remove_all([path])
    }

    fn remove_all<I>(&self, paths: I) -> Result<JsonDocument>
    where
        I: IntoIterator,
        I::Item: IntoPath,
    {
        on(Operation::JsonRemove, self)
            .args(path_args(paths)?)
            .build()
            .map(JsonDocument::wrap)
    }

    /// Deprecated `JSON_MERGE`, a synonym of `JSON_MERGE_PRESERVE`.
    fn merge(&self, other: impl Into<Argument>) -> Result<JsonDocument> {
        on(Operation::JsonMerge, self)
            .arg(other)
            .build()
            .map(JsonDocument::wrap)
    }

    /// RFC 7396 merge: members of `other` replace members of this document.
    fn merge_patch(&self, other: impl Into<Argument>) -> Result<JsonDocument> {
        on(Operation::JsonMergePatch, self)
            .arg(other)
            .build()
            .map(JsonDocument::wrap)
    }

    fn merge_preserve(&self, other: impl Into<Argument>) -> Result<JsonDocument> {
        on(Operation::JsonMergePreserve, self)
            .arg(other)
            .build()
            .map(JsonDocument::wrap)
    }

    fn unquote(&self) -> Result<JsonScalar> {
        on(Operation::JsonUnquote, self).build().map(JsonScalar::wrap)
    }

    fn depth(&self) -> Result<JsonScalar> {
        on(Operation::JsonDepth, self).build().map(JsonScalar::wrap)
    }

    fn length(&self) -> Result<JsonScalar> {
        on(Operation::JsonLength, self).build().map(JsonScalar::wrap)
    }

    fn length_at<P: IntoPath>(&self, path: P) -> Result<JsonScalar> {
        on(Operation::JsonLength, self)
            .arg(path.into_path()?)
            .build()
            .map(JsonScalar::wrap)
    }

    /// `JSON_TYPE(doc)`: `'OBJECT'`, `'ARRAY'`, `'INTEGER'`, ...
    fn json_type(&self) -> Result<JsonScalar> {
        on(Operation::JsonType, self).build().map(JsonScalar::wrap)
    }

    fn is_valid(&self) -> Result<Predicate> {
        on(Operation::JsonValid, self).build().map(Predicate::wrap)
    }

    fn pretty(&self) -> Result<JsonScalar> {
        on(Operation::JsonPretty, self).build().map(JsonScalar::wrap)
    }

    fn storage_size(&self) -> Result<JsonScalar> {
        on(Operation::JsonStorageSize, self).build().map(JsonScalar::wrap)
    }

    fn storage_free(&self) -> Result<JsonScalar> {
        on(Operation::JsonStorageFree, self).build().map(JsonScalar::wrap)
    }

    /// `JSON_SCHEMA_VALID(schema, doc)`
    fn schema_valid(&self, schema: impl Into<Argument>) -> Result<Predicate> {
        Call::new(Operation::JsonSchemaValid)
            .arg(schema)
            .arg(self.composite())
            .build()
            .map(Predicate::wrap)
    }

    /// `JSON_SCHEMA_VALIDATION_REPORT(schema, doc)`
    fn schema_validation_report(&self, schema: impl Into<Argument>) -> Result<JsonDocument> {
        Call::new(Operation::JsonSchemaValidationReport)
            .arg(schema)
            .arg(self.composite())
            .build()
            .map(JsonDocument::wrap)
    }

    /// Starts a `JSON_TABLE` projection over this document.
    fn table<P: IntoPath>(&self, root: P) -> Result<TableProjectionBuilder> {
        Ok(TableProjectionBuilder::new()
            .source(self.composite().clone())
            .path(root.into_path()?))
    }
}
