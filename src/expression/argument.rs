use crate::catalog::{Operation, ResultKind};
use crate::core::Value;
use crate::expression::composite::{CompositeExpression, Fragment};
use crate::json::JsonPath;

/// One template argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Already rendered sub-expression, inlined verbatim.
    Expression(CompositeExpression),
    /// Literal scalar, quoted or bound at render time.
    Literal(Value),
    /// Pre-quoted SQL text, inlined verbatim.
    Raw(String),
}

impl Argument {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    pub fn path(path: &JsonPath) -> Self {
        Self::Raw(path.quoted())
    }

    /// JSON scalars become literals; arrays and objects become
    /// `CAST('<json>' AS JSON)` so MySQL treats them as documents rather than strings.
    pub fn json(json: &serde_json::Value) -> Self {
        match Value::from_json_scalar(json) {
            Some(value) => Self::Literal(value),
            None => Self::Expression(cast_json_text(json.to_string())),
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Self::Expression(_))
    }
}

/// `CAST(<text> AS JSON)`, laid out as the catalog's `CAST` template renders it.
pub(crate) fn cast_json_text(text: String) -> CompositeExpression {
    CompositeExpression::from_parts(
        Some(Operation::CastJson),
        ResultKind::Json,
        vec![
            Fragment::Sql("CAST(".into()),
            Fragment::Literal(Value::Text(text)),
            Fragment::Sql(" AS JSON)".into()),
        ],
        Vec::new(),
    )
}

/// Boxes a literal for the parameter-binding path.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant(pub Value);

impl Constant {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn null() -> Self {
        Self(Value::Null)
    }
}

impl From<Constant> for Argument {
    fn from(constant: Constant) -> Self {
        Self::Literal(constant.0)
    }
}

impl From<CompositeExpression> for Argument {
    fn from(expr: CompositeExpression) -> Self {
        Self::Expression(expr)
    }
}

impl From<&CompositeExpression> for Argument {
    fn from(expr: &CompositeExpression) -> Self {
        Self::Expression(expr.clone())
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<JsonPath> for Argument {
    fn from(path: JsonPath) -> Self {
        Self::path(&path)
    }
}

impl From<&JsonPath> for Argument {
    fn from(path: &JsonPath) -> Self {
        Self::path(path)
    }
}

impl From<serde_json::Value> for Argument {
    fn from(json: serde_json::Value) -> Self {
        Self::json(&json)
    }
}

impl From<&serde_json::Value> for Argument {
    fn from(json: &serde_json::Value) -> Self {
        Self::json(json)
    }
}

macro_rules! literal_argument {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_argument!(&str, String, i64, i32, u32, f64, bool);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversions() {
        assert_eq!(Argument::from("a"), Argument::Literal(Value::Text("a".into())));
        assert_eq!(Argument::from(5i64), Argument::Literal(Value::Integer(5)));
        assert_eq!(Argument::from(true), Argument::Literal(Value::Boolean(true)));
        assert_eq!(Argument::from(Constant::null()), Argument::Literal(Value::Null));
        assert_eq!(
            Argument::from(JsonPath::root().member("a")),
            Argument::Raw("'$.a'".into())
        );
    }

    #[test]
    fn test_json_arguments() {
        assert_eq!(Argument::from(json!("x")), Argument::Literal(Value::Text("x".into())));
        assert_eq!(Argument::from(json!(null)), Argument::Literal(Value::Null));

        let Argument::Expression(expr) = Argument::from(json!({"a": [1, "b"]})) else {
            panic!("objects must become CAST expressions");
        };
        assert_eq!(expr.to_sql(), r#"CAST('{"a":[1,"b"]}' AS JSON)"#);
        assert_eq!(expr.operation(), Some(Operation::CastJson));
    }

    #[test]
    fn test_cast_layout_matches_catalog_template() {
        let via_catalog = crate::catalog::Call::new(Operation::CastJson)
            .arg("[1]")
            .build()
            .unwrap();
        assert_eq!(cast_json_text("[1]".into()), via_catalog);
    }
}
