//! Output formatting for the command-line surface
//!
//! Renders suggestions and token streams either as plain text (optionally
//! coloured) or as JSON for scripting.

use serde_json::json;

use crate::completion::{CompletionContext, Suggestions};
use crate::config::{DisplayConfig, OutputFormat};
use crate::error::{FilterqError, Result};
use crate::parser::Token;
use crate::repl::token_style;

/// Formatter for command results
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Enable colored output
    use_colors: bool,
}

impl Formatter {
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            format_type,
            use_colors,
        }
    }

    /// Create a formatter from display configuration
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.format, config.color_output)
    }

    /// Format pipeline output
    ///
    /// Plain output lists one suggestion per line; JSON output is the
    /// `{"prefix", "suggestions"}` object.
    pub fn format_suggestions(&self, suggestions: &Suggestions) -> Result<String> {
        match self.format_type {
            OutputFormat::Json => to_json(suggestions),
            OutputFormat::Plain => Ok(suggestions.suggestions.join("\n")),
        }
    }

    /// Format a resolved context (scope, model, field, prefix)
    pub fn format_context(&self, context: &CompletionContext) -> Result<String> {
        let field = context.field_ref().map(|f| f.name.as_str());
        match self.format_type {
            OutputFormat::Json => to_json(&json!({
                "scope": context.scope().as_str(),
                "model": context.model(),
                "field": field,
                "prefix": context.prefix(),
            })),
            OutputFormat::Plain => Ok(format!(
                "scope={} model={} field={} prefix={:?}",
                context.scope(),
                context.model().unwrap_or("-"),
                field.unwrap_or("-"),
                context.prefix()
            )),
        }
    }

    /// Format a token stream, one token per line in plain mode
    pub fn format_tokens(&self, tokens: &[Token]) -> Result<String> {
        match self.format_type {
            OutputFormat::Json => {
                let tokens: Vec<_> = tokens
                    .iter()
                    .map(|token| {
                        json!({
                            "kind": token.kind.as_str(),
                            "text": token.text,
                            "start": token.start(),
                            "end": token.end(),
                        })
                    })
                    .collect();
                to_json(&tokens)
            }
            OutputFormat::Plain => {
                let lines: Vec<String> = tokens
                    .iter()
                    .map(|token| {
                        let kind = format!("{:<14}", token.kind.as_str());
                        let kind = if self.use_colors {
                            token_style(token.kind).paint(kind).to_string()
                        } else {
                            kind
                        };
                        format!("{kind} {:>3}..{:<3} {}", token.start(), token.end(), token.text)
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| FilterqError::Generic(format!("JSON error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    fn suggestions() -> Suggestions {
        Suggestions {
            prefix: "na".to_string(),
            suggestions: vec!["name".to_string(), "nationality".to_string()],
        }
    }

    #[test]
    fn test_plain_suggestions() {
        let formatter = Formatter::new(OutputFormat::Plain, false);
        assert_eq!(
            formatter.format_suggestions(&suggestions()).unwrap(),
            "name\nnationality"
        );
    }

    #[test]
    fn test_json_suggestions() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        assert_eq!(
            formatter.format_suggestions(&suggestions()).unwrap(),
            r#"{"prefix":"na","suggestions":["name","nationality"]}"#
        );
    }

    #[test]
    fn test_plain_tokens() {
        let formatter = Formatter::new(OutputFormat::Plain, false);
        let output = formatter.format_tokens(&tokenize("total >= 10")).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[0].ends_with("total"));
        assert!(lines[1].starts_with("GREATER_EQUAL"));
        assert!(lines[2].contains("9..11"));
    }

    #[test]
    fn test_json_tokens() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_tokens(&tokenize("\"a\"")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            json!([{"kind": "STRING_VALUE", "text": "a", "start": 0, "end": 3}])
        );
    }

    #[test]
    fn test_plain_context() {
        let formatter = Formatter::new(OutputFormat::Plain, false);
        let ctx = CompletionContext::field("cu", Some("Order"));
        assert_eq!(
            formatter.format_context(&ctx).unwrap(),
            "scope=FIELD model=Order field=- prefix=\"cu\""
        );
    }
}
