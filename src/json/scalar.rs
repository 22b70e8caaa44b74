use super::predicate::{compare, null_check, Comparison};
use super::{JsonDocument, Predicate};
use crate::catalog::{Call, Operation, ResultKind};
use crate::core::{ExprError, Result, Value};
use crate::expression::{Argument, SqlExpression};

expression_wrapper!(
    /// A scalar result: extracted text, a number, or a quoted JSON string.
    JsonScalar
);

impl JsonScalar {
    /// `JSON_UNQUOTE(x)`
    pub fn unquote(&self) -> Result<JsonScalar> {
        self.call(Operation::JsonUnquote).map(JsonScalar::wrap)
    }

    pub fn json_type(&self) -> Result<JsonScalar> {
        self.call(Operation::JsonType).map(JsonScalar::wrap)
    }

    pub fn is_valid(&self) -> Result<Predicate> {
        self.call(Operation::JsonValid).map(Predicate::wrap)
    }

    /// `(x MEMBER OF(array))`
    pub fn member_of(&self, array: impl Into<Argument>) -> Result<Predicate> {
        Call::new(Operation::MemberOf)
            .arg(self.composite())
            .arg(array)
            .build()
            .map(Predicate::wrap)
    }

    /// Reinterprets the scalar as JSON, e.g. the text of `JSON_QUOTE`.
    pub fn as_document(&self) -> JsonDocument {
        JsonDocument::wrap(self.0.clone().with_kind(ResultKind::Json))
    }

    /// `(x = rhs)`; a `NULL` right-hand side renders `(x IS NULL)`.
    #[allow(clippy::should_implement_trait)]
    pub fn eq(&self, rhs: impl Into<Argument>) -> Predicate {
        match rhs.into() {
            Argument::Literal(Value::Null) => self.is_null(),
            rhs => compare(self.argument(), Comparison::Eq, rhs),
        }
    }

    /// `(x <> rhs)`; a `NULL` right-hand side renders `(x IS NOT NULL)`.
    #[allow(clippy::should_implement_trait)]
    pub fn ne(&self, rhs: impl Into<Argument>) -> Predicate {
        match rhs.into() {
            Argument::Literal(Value::Null) => self.is_not_null(),
            rhs => compare(self.argument(), Comparison::Ne, rhs),
        }
    }

    pub fn gt(&self, rhs: impl Into<Argument>) -> Result<Predicate> {
        self.order(Comparison::Gt, rhs)
    }

    pub fn ge(&self, rhs: impl Into<Argument>) -> Result<Predicate> {
        self.order(Comparison::Ge, rhs)
    }

    pub fn lt(&self, rhs: impl Into<Argument>) -> Result<Predicate> {
        self.order(Comparison::Lt, rhs)
    }

    pub fn le(&self, rhs: impl Into<Argument>) -> Result<Predicate> {
        self.order(Comparison::Le, rhs)
    }

    pub fn is_null(&self) -> Predicate {
        null_check(self.argument(), false)
    }

    pub fn is_not_null(&self) -> Predicate {
        null_check(self.argument(), true)
    }

    pub fn is_true(&self) -> Predicate {
        compare(self.argument(), Comparison::Eq, Value::Integer(1).into())
    }

    pub fn is_false(&self) -> Predicate {
        compare(self.argument(), Comparison::Eq, Value::Integer(0).into())
    }

    fn argument(&self) -> Argument {
        Argument::from(self.composite())
    }

    fn call(&self, operation: Operation) -> Result<crate::expression::CompositeExpression> {
        Call::new(operation).arg(self.composite()).build()
    }

    /// Ordering against `NULL` is never true, so it is refused.
    fn order(&self, op: Comparison, rhs: impl Into<Argument>) -> Result<Predicate> {
        match rhs.into() {
            Argument::Literal(Value::Null) => {
                Err(ExprError::shape(op.symbol(), "a non-NULL right-hand side", "NULL"))
            }
            rhs => Ok(compare(self.argument(), op, rhs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{column, json_array, json_quote, JsonOperand};

    #[test]
    fn test_comparisons() {
        let age = column("doc").value("$.age").unwrap();
        assert_eq!(age.ge(18i64).unwrap().to_sql(), "(JSON_VALUE(`doc`, '$.age') >= 18)");
        assert_eq!(age.lt(65i64).unwrap().to_sql(), "(JSON_VALUE(`doc`, '$.age') < 65)");
        assert_eq!(age.is_null().to_sql(), "(JSON_VALUE(`doc`, '$.age') IS NULL)");
    }

    #[test]
    fn test_null_comparisons() {
        let x = column("doc").value("$.x").unwrap();
        assert_eq!(x.eq(Value::Null).to_sql(), "(JSON_VALUE(`doc`, '$.x') IS NULL)");
        assert_eq!(x.ne(Value::Null).to_sql(), "(JSON_VALUE(`doc`, '$.x') IS NOT NULL)");
        assert_eq!(x.eq(Value::Null), x.is_null());

        for result in [x.gt(Value::Null), x.ge(Value::Null), x.lt(Value::Null), x.le(Value::Null)] {
            assert!(matches!(result, Err(ExprError::IllegalArgumentShape { .. })));
        }
    }

    #[test]
    fn test_text_comparison_quotes_once() {
        let name = column("doc").get_text("$.name").unwrap();
        assert_eq!(name.eq("O'Brien").to_sql(), "(`doc`->>'$.name' = 'O\\'Brien')");
    }

    #[test]
    fn test_flags() {
        let active = column("doc").value("$.active").unwrap();
        assert_eq!(active.is_true().to_sql(), "(JSON_VALUE(`doc`, '$.active') = 1)");
        assert_eq!(active.is_false().to_sql(), "(JSON_VALUE(`doc`, '$.active') = 0)");
    }

    #[test]
    fn test_quote_round_trip() {
        let quoted = json_quote("x").unwrap();
        assert_eq!(quoted.unquote().unwrap().to_sql(), "JSON_UNQUOTE(JSON_QUOTE('x'))");
        assert_eq!(quoted.as_document().result_kind(), ResultKind::Json);
    }

    #[test]
    fn test_membership() {
        let tag = column("doc").get_text("$.tag").unwrap();
        let allowed = json_array(["a", "b"]).unwrap();
        assert_eq!(
            tag.member_of(allowed).unwrap().to_sql(),
            "(`doc`->>'$.tag' MEMBER OF(JSON_ARRAY('a', 'b')))"
        );
    }
}
