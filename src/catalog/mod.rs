//! The closed catalog of MySQL JSON operations.
//!
//! Every [`Operation`] has exactly one [`OperationEntry`] (arity, argument
//! kinds, result kind) and one parsed [`Template`]. The tables are built once
//! on first access and only read afterwards.

pub mod template;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::core::{ExprError, Result};
use crate::expression::{Argument, CompositeExpression};

pub use template::{Segment, Template};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Creation,
    Search,
    Modify,
    Attribute,
    Schema,
    Utility,
    Aggregate,
    Table,
}

/// Literal kind expected at an argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    Json,
    Path,
    Text,
    Numeric,
    Boolean,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Json,
    Text,
    Numeric,
    Boolean,
    Table,
}

/// Argument grouping beyond plain counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    None,
    /// Arguments from this index onward come in pairs.
    PairsFrom(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    JsonArray,
    JsonObject,
    JsonQuote,
    CastJson,
    JsonContains,
    JsonContainsPath,
    JsonExtract,
    ColumnPath,
    ColumnPathUnquote,
    JsonKeys,
    JsonOverlaps,
    JsonSearch,
    JsonValue,
    JsonValueReturning,
    MemberOf,
    JsonArrayAppend,
    JsonArrayInsert,
    JsonInsert,
    JsonMerge,
    JsonMergePatch,
    JsonMergePreserve,
    JsonRemove,
    JsonReplace,
    JsonSet,
    JsonUnquote,
    JsonDepth,
    JsonLength,
    JsonType,
    JsonValid,
    JsonSchemaValid,
    JsonSchemaValidationReport,
    JsonPretty,
    JsonStorageFree,
    JsonStorageSize,
    JsonArrayAgg,
    JsonObjectAgg,
    JsonTable,
}

impl Operation {
    pub fn entry(self) -> &'static OperationEntry {
        &ENTRIES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn template(self) -> &'static Template {
        template_for(self.entry())
    }

    pub fn all() -> impl Iterator<Item = Operation> {
        ENTRIES.iter().map(|entry| entry.operation)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one catalog operation.
#[derive(Debug)]
pub struct OperationEntry {
    pub operation: Operation,
    /// SQL function name or operator text.
    pub name: &'static str,
    /// Stable lowercase identifier used by function registries.
    pub key: &'static str,
    pub family: Family,
    pub min_args: usize,
    pub max_args: Option<usize>,
    pub pairing: Pairing,
    /// Per-position kinds; positions past the end cycle over `arg_kinds[repeat_from..]`.
    pub arg_kinds: &'static [ArgKind],
    pub repeat_from: usize,
    pub result: ResultKind,
    pub template: &'static str,
}

impl OperationEntry {
    pub fn kind_at(&self, position: usize) -> ArgKind {
        if let Some(kind) = self.arg_kinds.get(position) {
            return *kind;
        }
        let cycle = &self.arg_kinds[self.repeat_from.min(self.arg_kinds.len())..];
        if cycle.is_empty() {
            return ArgKind::Any;
        }
        cycle[(position - self.arg_kinds.len()) % cycle.len()]
    }

    pub fn is_variadic(&self) -> bool {
        self.max_args.is_none()
    }

    /// Human-readable description of the accepted argument shape.
    pub fn expected_shape(&self) -> String {
        let count = match (self.min_args, self.max_args) {
            (min, Some(max)) if min == max => format!("exactly {} argument(s)", min),
            (min, Some(max)) => format!("between {} and {} arguments", min, max),
            (0, None) => "any number of arguments".to_string(),
            (min, None) => format!("at least {} arguments", min),
        };
        match self.pairing {
            Pairing::None => count,
            Pairing::PairsFrom(0) => format!("{}, as an even number of key/value arguments", count),
            Pairing::PairsFrom(from) => {
                format!("{}, as {} leading argument(s) followed by path/value pairs", count, from)
            }
        }
    }

    /// Validates an argument count against arity and pairing rules.
    pub fn check_shape(&self, count: usize) -> Result<()> {
        let too_few = count < self.min_args;
        let too_many = self.max_args.is_some_and(|max| count > max);
        let unpaired = match self.pairing {
            Pairing::PairsFrom(from) => count >= from && (count - from) % 2 != 0,
            Pairing::None => false,
        };
        if too_few || too_many || unpaired {
            return Err(ExprError::shape(self.name, self.expected_shape(), count.to_string()));
        }
        Ok(())
    }
}

use ArgKind as K;

macro_rules! entry {
    ($op:ident, $name:expr, $key:expr, $family:ident, $min:expr, $max:expr, $pairing:expr,
     [$($kind:ident),*], $repeat:expr, $result:ident, $template:expr) => {
        OperationEntry {
            operation: Operation::$op,
            name: $name,
            key: $key,
            family: Family::$family,
            min_args: $min,
            max_args: $max,
            pairing: $pairing,
            arg_kinds: &[$(K::$kind),*],
            repeat_from: $repeat,
            result: ResultKind::$result,
            template: $template,
        }
    };
}

/// Declaration order matches `Operation` discriminants.
static ENTRIES: [OperationEntry; 37] = [
    entry!(JsonArray, "JSON_ARRAY", "json_array", Creation, 0, None, Pairing::None,
        [Any], 0, Json, "JSON_ARRAY({0*})"),
    entry!(JsonObject, "JSON_OBJECT", "json_object", Creation, 0, None, Pairing::PairsFrom(0),
        [Text, Any], 0, Json, "JSON_OBJECT({0*})"),
    entry!(JsonQuote, "JSON_QUOTE", "json_quote", Creation, 1, Some(1), Pairing::None,
        [Text], 1, Text, "JSON_QUOTE({0})"),
    entry!(CastJson, "CAST", "json_cast", Creation, 1, Some(1), Pairing::None,
        [Any], 1, Json, "CAST({0} AS JSON)"),
    entry!(JsonContains, "JSON_CONTAINS", "json_contains", Search, 2, Some(3), Pairing::None,
        [Json, Json, Path], 3, Boolean, "JSON_CONTAINS({0*})"),
    entry!(JsonContainsPath, "JSON_CONTAINS_PATH", "json_contains_path", Search, 3, None, Pairing::None,
        [Json, Text, Path], 2, Boolean, "JSON_CONTAINS_PATH({0}, {1}, {2*})"),
    entry!(JsonExtract, "JSON_EXTRACT", "json_extract", Search, 2, None, Pairing::None,
        [Json, Path], 1, Json, "JSON_EXTRACT({0}, {1*})"),
    entry!(ColumnPath, "->", "json_column_path", Search, 2, Some(2), Pairing::None,
        [Json, Path], 2, Json, "{0}->{1}"),
    entry!(ColumnPathUnquote, "->>", "json_column_path_unquote", Search, 2, Some(2), Pairing::None,
        [Json, Path], 2, Text, "{0}->>{1}"),
    entry!(JsonKeys, "JSON_KEYS", "json_keys", Search, 1, Some(2), Pairing::None,
        [Json, Path], 2, Json, "JSON_KEYS({0*})"),
    entry!(JsonOverlaps, "JSON_OVERLAPS", "json_overlaps", Search, 2, Some(2), Pairing::None,
        [Json, Json], 2, Boolean, "JSON_OVERLAPS({0}, {1})"),
    entry!(JsonSearch, "JSON_SEARCH", "json_search", Search, 3, None, Pairing::None,
        [Json, Text, Text, Text, Path], 4, Json, "JSON_SEARCH({0}, {1}, {2*})"),
    entry!(JsonValue, "JSON_VALUE", "json_value", Search, 2, Some(2), Pairing::None,
        [Json, Path], 2, Text, "JSON_VALUE({0}, {1})"),
    entry!(JsonValueReturning, "JSON_VALUE", "json_value_returning", Search, 3, Some(3), Pairing::None,
        [Json, Path, Text], 3, Text, "JSON_VALUE({0}, {1} RETURNING {2})"),
    entry!(MemberOf, "MEMBER OF", "json_member_of", Search, 2, Some(2), Pairing::None,
        [Any, Json], 2, Boolean, "({0} MEMBER OF({1}))"),
    entry!(JsonArrayAppend, "JSON_ARRAY_APPEND", "json_array_append", Modify, 3, None, Pairing::PairsFrom(1),
        [Json, Path, Any], 1, Json, "JSON_ARRAY_APPEND({0}, {1*})"),
    entry!(JsonArrayInsert, "JSON_ARRAY_INSERT", "json_array_insert", Modify, 3, None, Pairing::PairsFrom(1),
        [Json, Path, Any], 1, Json, "JSON_ARRAY_INSERT({0}, {1*})"),
    entry!(JsonInsert, "JSON_INSERT", "json_insert", Modify, 3, None, Pairing::PairsFrom(1),
        [Json, Path, Any], 1, Json, "JSON_INSERT({0}, {1*})"),
    entry!(JsonMerge, "JSON_MERGE", "json_merge", Modify, 2, None, Pairing::None,
        [Json], 0, Json, "JSON_MERGE({0*})"),
    entry!(JsonMergePatch, "JSON_MERGE_PATCH", "json_merge_patch", Modify, 2, None, Pairing::None,
        [Json], 0, Json, "JSON_MERGE_PATCH({0*})"),
    entry!(JsonMergePreserve, "JSON_MERGE_PRESERVE", "json_merge_preserve", Modify, 2, None, Pairing::None,
        [Json], 0, Json, "JSON_MERGE_PRESERVE({0*})"),
    entry!(JsonRemove, "JSON_REMOVE", "json_remove", Modify, 2, None, Pairing::None,
        [Json, Path], 1, Json, "JSON_REMOVE({0}, {1*})"),
    entry!(JsonReplace, "JSON_REPLACE", "json_replace", Modify, 3, None, Pairing::PairsFrom(1),
        [Json, Path, Any], 1, Json, "JSON_REPLACE({0}, {1*})"),
    entry!(JsonSet, "JSON_SET", "json_set", Modify, 3, None, Pairing::PairsFrom(1),
        [Json, Path, Any], 1, Json, "JSON_SET({0}, {1*})"),
    entry!(JsonUnquote, "JSON_UNQUOTE", "json_unquote", Modify, 1, Some(1), Pairing::None,
        [Json], 1, Text, "JSON_UNQUOTE({0})"),
    entry!(JsonDepth, "JSON_DEPTH", "json_depth", Attribute, 1, Some(1), Pairing::None,
        [Json], 1, Numeric, "JSON_DEPTH({0})"),
    entry!(JsonLength, "JSON_LENGTH", "json_length", Attribute, 1, Some(2), Pairing::None,
        [Json, Path], 2, Numeric, "JSON_LENGTH({0*})"),
    entry!(JsonType, "JSON_TYPE", "json_type", Attribute, 1, Some(1), Pairing::None,
        [Json], 1, Text, "JSON_TYPE({0})"),
    entry!(JsonValid, "JSON_VALID", "json_valid", Attribute, 1, Some(1), Pairing::None,
        [Any], 1, Boolean, "JSON_VALID({0})"),
    entry!(JsonSchemaValid, "JSON_SCHEMA_VALID", "json_schema_valid", Schema, 2, Some(2), Pairing::None,
        [Json, Json], 2, Boolean, "JSON_SCHEMA_VALID({0}, {1})"),
    entry!(JsonSchemaValidationReport, "JSON_SCHEMA_VALIDATION_REPORT", "json_schema_validation_report",
        Schema, 2, Some(2), Pairing::None,
        [Json, Json], 2, Json, "JSON_SCHEMA_VALIDATION_REPORT({0}, {1})"),
    entry!(JsonPretty, "JSON_PRETTY", "json_pretty", Utility, 1, Some(1), Pairing::None,
        [Json], 1, Text, "JSON_PRETTY({0})"),
    entry!(JsonStorageFree, "JSON_STORAGE_FREE", "json_storage_free", Utility, 1, Some(1), Pairing::None,
        [Json], 1, Numeric, "JSON_STORAGE_FREE({0})"),
    entry!(JsonStorageSize, "JSON_STORAGE_SIZE", "json_storage_size", Utility, 1, Some(1), Pairing::None,
        [Json], 1, Numeric, "JSON_STORAGE_SIZE({0})"),
    entry!(JsonArrayAgg, "JSON_ARRAYAGG", "json_arrayagg", Aggregate, 1, Some(1), Pairing::None,
        [Any], 1, Json, "JSON_ARRAYAGG({0})"),
    entry!(JsonObjectAgg, "JSON_OBJECTAGG", "json_objectagg", Aggregate, 2, Some(2), Pairing::None,
        [Text, Any], 2, Json, "JSON_OBJECTAGG({0}, {1})"),
    entry!(JsonTable, "JSON_TABLE", "json_table", Table, 3, Some(3), Pairing::None,
        [Json, Path, Text], 3, Table, "JSON_TABLE({0}, {1} COLUMNS({2}))"),
];

struct Registry {
    by_name: HashMap<String, &'static OperationEntry>,
    templates: Vec<Template>,
}

lazy_static::lazy_static! {
    static ref REGISTRY: Registry = {
        let mut by_name = HashMap::with_capacity(ENTRIES.len() * 2);
        let mut templates = Vec::with_capacity(ENTRIES.len());
        for entry in ENTRIES.iter() {
            by_name.insert(entry.key.to_string(), entry);
            // JSON_VALUE and its RETURNING form share a name; the plain form wins.
            by_name.entry(entry.name.to_ascii_lowercase()).or_insert(entry);
            let template = Template::parse(entry.template)
                .unwrap_or_else(|e| panic!("built-in template for {} is malformed: {}", entry.key, e));
            templates.push(template);
        }
        log::debug!("JSON function catalog initialized with {} operations", ENTRIES.len());
        Registry { by_name, templates }
    };
}

/// Finds an operation by SQL name or registry key, case-insensitively.
pub fn lookup(name: &str) -> Result<&'static OperationEntry> {
    REGISTRY
        .by_name
        .get(&name.trim().to_ascii_lowercase())
        .copied()
        .ok_or_else(|| ExprError::UnknownOperation(name.to_string()))
}

/// The template of a catalog entry. Total over the catalog.
pub fn template_for(entry: &OperationEntry) -> &'static Template {
    &REGISTRY.templates[entry.operation as usize]
}

pub fn entries() -> &'static [OperationEntry] {
    &ENTRIES
}

/// Call-site builder: collects arguments, validates the operation's shape,
/// then renders through the engine.
#[derive(Debug)]
pub struct Call {
    entry: &'static OperationEntry,
    args: Vec<Argument>,
}

impl Call {
    pub fn new(operation: Operation) -> Self {
        Self {
            entry: operation.entry(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<Argument>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Argument>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn build(self) -> Result<CompositeExpression> {
        self.entry.check_shape(self.args.len())?;
        let bound = template_for(self.entry).bind(self.args)?;
        Ok(bound
            .operation(self.entry.operation)
            .kind(self.entry.result)
            .render())
    }
}
