//! Parameterized text templates.
//!
//! `{i}` substitutes argument `i`; `{n*}` splices arguments `n..` joined by
//! `", "`. A splice must be the last placeholder that can reach its
//! arguments, so every fixed index is below the splice start.

use std::fmt;

use crate::catalog::ResultKind;
use crate::core::{ExprError, Result};
use crate::expression::{Argument, CompositeExpression};
use crate::expression::render::BoundTemplate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Arg(usize),
    Splice(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let malformed = |why: &str| ExprError::SyntaxError(format!("template '{}': {}", source, why));

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '{' {
                if c == '}' {
                    return Err(malformed("unmatched '}'"));
                }
                text.push(c);
                continue;
            }

            let mut digits = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(d);
                chars.next();
            }
            let splice = chars.next_if_eq(&'*').is_some();
            if chars.next() != Some('}') || digits.is_empty() {
                return Err(malformed("placeholders must look like {0} or {0*}"));
            }
            let index: usize = digits
                .parse()
                .map_err(|_| malformed("placeholder index out of range"))?;

            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(if splice { Segment::Splice(index) } else { Segment::Arg(index) });
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        let template = Self {
            source: source.to_string(),
            segments,
        };
        template.check_layout()?;
        Ok(template)
    }

    fn check_layout(&self) -> Result<()> {
        let splices: Vec<usize> = self
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Splice(start) => Some(*start),
                _ => None,
            })
            .collect();

        match splices.as_slice() {
            [] => Ok(()),
            [start] => match self.max_fixed_index() {
                Some(index) if index >= *start => Err(ExprError::SyntaxError(format!(
                    "template '{}': fixed placeholder {{{}}} overlaps splice {{{}*}}",
                    self.source, index, start
                ))),
                _ => Ok(()),
            },
            _ => Err(ExprError::SyntaxError(format!(
                "template '{}': at most one splice marker is allowed",
                self.source
            ))),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn splice_start(&self) -> Option<usize> {
        self.segments.iter().find_map(|s| match s {
            Segment::Splice(start) => Some(*start),
            _ => None,
        })
    }

    fn max_fixed_index(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Arg(index) => Some(*index),
                _ => None,
            })
            .max()
    }

    /// Smallest argument count every placeholder can be satisfied with.
    pub fn required_args(&self) -> usize {
        let fixed = self.max_fixed_index().map_or(0, |i| i + 1);
        fixed.max(self.splice_start().unwrap_or(0))
    }

    /// Fails with `TemplateArityMismatch` when a placeholder has no argument.
    pub fn check_arity(&self, available: usize) -> Result<()> {
        for segment in &self.segments {
            let index = match segment {
                Segment::Arg(index) if *index >= available => *index,
                Segment::Splice(start) if *start > available => *start,
                _ => continue,
            };
            return Err(ExprError::TemplateArityMismatch {
                template: self.source.clone(),
                index,
                available,
            });
        }
        if self.splice_start().is_none() && available > self.required_args() {
            return Err(ExprError::TemplateArityMismatch {
                template: self.source.clone(),
                index: available - 1,
                available: self.required_args(),
            });
        }
        Ok(())
    }

    /// Checks arity and pairs the template with its arguments for rendering.
    pub fn bind(&self, args: Vec<Argument>) -> Result<BoundTemplate<'_>> {
        self.check_arity(args.len())?;
        Ok(BoundTemplate::new(self, args))
    }
}

/// Template with a fixed argument count, checked once when it is built.
/// Used for host-side operator templates that are not catalog operations.
pub(crate) struct FixedTemplate<const N: usize> {
    template: Template,
}

impl<const N: usize> FixedTemplate<N> {
    pub(crate) fn new(source: &str) -> Self {
        let template = Template::parse(source)
            .and_then(|t| t.check_arity(N).map(|_| t))
            .unwrap_or_else(|e| panic!("built-in template '{}' is malformed: {}", source, e));
        Self { template }
    }

    pub(crate) fn apply(&self, args: [Argument; N], kind: ResultKind) -> CompositeExpression {
        BoundTemplate::new(&self.template, Vec::from(args)).kind(kind).render()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let template = Template::parse("JSON_EXTRACT({0}, {1*})").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::Text("JSON_EXTRACT(".into()),
                Segment::Arg(0),
                Segment::Text(", ".into()),
                Segment::Splice(1),
                Segment::Text(")".into()),
            ]
        );
        assert_eq!(template.splice_start(), Some(1));
        assert_eq!(template.required_args(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Template::parse("F({})").is_err());
        assert!(Template::parse("F({a})").is_err());
        assert!(Template::parse("F({0)").is_err());
        assert!(Template::parse("F(0})").is_err());
        assert!(Template::parse("F({0*}, {1*})").is_err());
        assert!(Template::parse("F({1*}, {1})").is_err());
    }

    #[test]
    fn test_check_arity() {
        let fixed = Template::parse("JSON_OVERLAPS({0}, {1})").unwrap();
        assert!(fixed.check_arity(2).is_ok());
        assert!(matches!(
            fixed.check_arity(1),
            Err(ExprError::TemplateArityMismatch { index: 1, available: 1, .. })
        ));
        assert!(fixed.check_arity(3).is_err());

        let spliced = Template::parse("JSON_ARRAY({0*})").unwrap();
        assert!(spliced.check_arity(0).is_ok());
        assert!(spliced.check_arity(9).is_ok());

        let prefixed = Template::parse("JSON_CONTAINS_PATH({0}, {1}, {2*})").unwrap();
        assert!(prefixed.check_arity(2).is_ok());
        assert!(prefixed.check_arity(1).is_err());
    }

    #[test]
    fn test_fixed_template() {
        let eq: FixedTemplate<2> = FixedTemplate::new("({0} = {1})");
        let expr = eq.apply([Argument::raw("x"), Argument::literal(1i64)], ResultKind::Boolean);
        assert_eq!(expr.to_sql(), "(x = 1)");
        assert_eq!(expr.kind(), ResultKind::Boolean);
    }

    #[test]
    #[should_panic]
    fn test_fixed_template_rejects_wrong_arity() {
        let _: FixedTemplate<1> = FixedTemplate::new("({0} = {1})");
    }
}
