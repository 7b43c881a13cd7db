//! Validator for reedline - validates line completeness

use reedline::{ValidationResult, Validator};

/// Treats a line as incomplete while a string or a parenthesis is open
pub struct QueryValidator;

impl QueryValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check if input has balanced parentheses and closed strings
    fn is_balanced(&self, input: &str) -> bool {
        let mut depth = 0i32;
        let mut in_string = false;
        let mut escape_next = false;

        for ch in input.chars() {
            if in_string {
                match ch {
                    _ if escape_next => escape_next = false,
                    '\\' => escape_next = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            match ch {
                '"' => in_string = true,
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }

        !in_string && depth <= 0
    }
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for QueryValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        if line.trim().is_empty() || self.is_balanced(line) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}
