//! Field constraints declared as data.
//!
//! Each entity lists its constraints once as `TextRule` / `RangeRule`
//! constants and implements [`Validate`] by running them through a
//! [`Violations`] collector. Every violated field is reported, not just the
//! first one.
//!
//! ```
//! use quill_kernel::validation::{RangeRule, TextRule, Violations};
//!
//! const NAME: TextRule = TextRule::new("name", 1, Some(10));
//! const AGE: RangeRule = RangeRule::new("age", 0, 150);
//!
//! let mut violations = Violations::new();
//! NAME.check("", &mut violations);
//! AGE.check(200, &mut violations);
//! let err = violations.finish().unwrap_err();
//! assert_eq!(err.violations.len(), 2);
//! ```

use serde::Serialize;
use thiserror::Error;

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A payload failed one or more field constraints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} field(s) failed validation", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, reason)],
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }
}

/// Implemented by every request schema accepted on a create or update path.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Accumulates violations while a payload is checked.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, reason: impl Into<String>) {
        self.0.push(FieldViolation::new(field, reason));
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations: self.0 })
        }
    }
}

/// Length bounds on a string field, counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub field: &'static str,
    pub min_chars: usize,
    pub max_chars: Option<usize>,
}

impl TextRule {
    pub const fn new(field: &'static str, min_chars: usize, max_chars: Option<usize>) -> Self {
        Self {
            field,
            min_chars,
            max_chars,
        }
    }

    pub fn check(&self, value: &str, violations: &mut Violations) {
        let len = value.chars().count();
        if len < self.min_chars {
            violations.push(
                self.field,
                format!("must be at least {} character(s) long", self.min_chars),
            );
        }
        if let Some(max) = self.max_chars {
            if len > max {
                violations.push(self.field, format!("must be at most {max} characters long"));
            }
        }
    }

    /// Optional fields are only checked when present.
    pub fn check_optional(&self, value: Option<&str>, violations: &mut Violations) {
        if let Some(value) = value {
            self.check(value, violations);
        }
    }
}

/// Inclusive bounds on an integer field.
#[derive(Debug, Clone, Copy)]
pub struct RangeRule {
    pub field: &'static str,
    pub min: i64,
    pub max: i64,
}

impl RangeRule {
    pub const fn new(field: &'static str, min: i64, max: i64) -> Self {
        Self { field, min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn check(&self, value: i64, violations: &mut Violations) {
        if !self.contains(value) {
            violations.push(
                self.field,
                format!("must be between {} and {}", self.min, self.max),
            );
        }
    }
}
