//! The substitution engine.
//!
//! Rendering only happens on a [`BoundTemplate`], which exists only after the
//! template's arity was checked against its arguments, so rendering itself
//! cannot fail.

use crate::catalog::{Operation, ResultKind, Segment, Template};
use crate::expression::composite::{CompositeExpression, Fragment};
use crate::expression::Argument;

/// Separator inserted between spliced arguments.
pub const SPLICE_SEPARATOR: &str = ", ";

/// A template paired with arity-checked arguments.
#[derive(Debug)]
pub struct BoundTemplate<'a> {
    template: &'a Template,
    args: Vec<Argument>,
    operation: Option<Operation>,
    kind: ResultKind,
}

impl<'a> BoundTemplate<'a> {
    pub(crate) fn new(template: &'a Template, args: Vec<Argument>) -> Self {
        Self {
            template,
            args,
            operation: None,
            kind: ResultKind::Json,
        }
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn kind(mut self, kind: ResultKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn render(self) -> CompositeExpression {
        render(self)
    }
}

/// Substitutes the bound arguments into the template.
pub fn render(bound: BoundTemplate<'_>) -> CompositeExpression {
    let BoundTemplate {
        template,
        args,
        operation,
        kind,
    } = bound;

    let mut out = FragmentWriter::default();
    for segment in template.segments() {
        match segment {
            Segment::Text(text) => out.push_sql(text),
            Segment::Arg(index) => {
                if let Some(arg) = args.get(*index) {
                    out.push_argument(arg);
                }
            }
            Segment::Splice(start) => {
                let rest = args.get(*start..).unwrap_or(&[]);
                if rest.is_empty() {
                    out.trim_trailing(SPLICE_SEPARATOR);
                }
                for (n, arg) in rest.iter().enumerate() {
                    if n > 0 {
                        out.push_sql(SPLICE_SEPARATOR);
                    }
                    out.push_argument(arg);
                }
            }
        }
    }

    let nested: Vec<CompositeExpression> = args
        .into_iter()
        .filter_map(|arg| match arg {
            Argument::Expression(expr) => Some(expr),
            _ => None,
        })
        .collect();

    let expr = CompositeExpression::from_parts(operation, kind, out.fragments, nested);
    log::trace!("Rendered {} -> {}", template, expr.to_sql());
    expr
}

#[derive(Default)]
struct FragmentWriter {
    fragments: Vec<Fragment>,
}

impl FragmentWriter {
    fn push_sql(&mut self, sql: &str) {
        if sql.is_empty() {
            return;
        }
        if let Some(Fragment::Sql(last)) = self.fragments.last_mut() {
            last.push_str(sql);
        } else {
            self.fragments.push(Fragment::Sql(sql.to_string()));
        }
    }

    fn push_argument(&mut self, arg: &Argument) {
        match arg {
            Argument::Expression(expr) => {
                for fragment in expr.fragments() {
                    match fragment {
                        Fragment::Sql(sql) => self.push_sql(sql),
                        Fragment::Literal(value) => self.fragments.push(Fragment::Literal(value.clone())),
                    }
                }
            }
            Argument::Literal(value) => self.fragments.push(Fragment::Literal(value.clone())),
            Argument::Raw(sql) => self.push_sql(sql),
        }
    }

    /// Drops a separator that would otherwise dangle before an empty splice.
    fn trim_trailing(&mut self, suffix: &str) {
        if let Some(Fragment::Sql(last)) = self.fragments.last_mut() {
            if last.ends_with(suffix) {
                last.truncate(last.len() - suffix.len());
                if last.is_empty() {
                    self.fragments.pop();
                }
            }
        }
    }
}
