//! Boolean conditions for `WHERE`/`HAVING`/`ON` positions.
//!
//! Connectives and comparisons are host SQL operators, not catalog
//! operations, so their templates live here and are checked on first use.

use lazy_static::lazy_static;

use crate::catalog::template::FixedTemplate;
use crate::catalog::ResultKind;
use crate::expression::{Argument, SqlExpression};

expression_wrapper!(
    /// A boolean SQL condition.
    Predicate
);

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparison {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }
}

lazy_static! {
    static ref AND: FixedTemplate<2> = FixedTemplate::new("({0} AND {1})");
    static ref OR: FixedTemplate<2> = FixedTemplate::new("({0} OR {1})");
    static ref NOT: FixedTemplate<1> = FixedTemplate::new("(NOT {0})");
    static ref IS_TRUE: FixedTemplate<1> = FixedTemplate::new("({0} = 1)");
    static ref IS_FALSE: FixedTemplate<1> = FixedTemplate::new("({0} = 0)");
    static ref IS_NULL: FixedTemplate<1> = FixedTemplate::new("({0} IS NULL)");
    static ref IS_NOT_NULL: FixedTemplate<1> = FixedTemplate::new("({0} IS NOT NULL)");
    static ref COMPARISONS: [FixedTemplate<2>; 6] = [
        FixedTemplate::new("({0} = {1})"),
        FixedTemplate::new("({0} <> {1})"),
        FixedTemplate::new("({0} > {1})"),
        FixedTemplate::new("({0} >= {1})"),
        FixedTemplate::new("({0} < {1})"),
        FixedTemplate::new("({0} <= {1})"),
    ];
}

pub(crate) fn compare(lhs: Argument, op: Comparison, rhs: Argument) -> Predicate {
    Predicate::wrap(COMPARISONS[op as usize].apply([lhs, rhs], ResultKind::Boolean))
}

pub(crate) fn null_check(operand: Argument, negated: bool) -> Predicate {
    let template = if negated { &*IS_NOT_NULL } else { &*IS_NULL };
    Predicate::wrap(template.apply([operand], ResultKind::Boolean))
}

impl Predicate {
    pub fn and(&self, other: impl Into<Predicate>) -> Predicate {
        self.binary(&AND, other.into())
    }

    pub fn or(&self, other: impl Into<Predicate>) -> Predicate {
        self.binary(&OR, other.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Predicate {
        self.unary(&NOT)
    }

    /// `(p = 1)`; MySQL presence functions return 0 or 1.
    pub fn is_true(&self) -> Predicate {
        self.unary(&IS_TRUE)
    }

    pub fn is_false(&self) -> Predicate {
        self.unary(&IS_FALSE)
    }

    /// Folds conditions with `AND`; `None` when there are none.
    pub fn all<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Predicate>,
    {
        predicates.into_iter().reduce(|acc, next| acc.and(next))
    }

    /// Folds conditions with `OR`; `None` when there are none.
    pub fn any<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Predicate>,
    {
        predicates.into_iter().reduce(|acc, next| acc.or(next))
    }

    fn binary(&self, template: &FixedTemplate<2>, other: Predicate) -> Predicate {
        let args = [Argument::from(self.composite()), Argument::from(other)];
        Predicate::wrap(template.apply(args, ResultKind::Boolean))
    }

    fn unary(&self, template: &FixedTemplate<1>) -> Predicate {
        Predicate::wrap(template.apply([Argument::from(self.composite())], ResultKind::Boolean))
    }
}
