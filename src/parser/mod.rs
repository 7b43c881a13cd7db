//! Lexical analysis for the filter query language
//!
//! Filters compare (possibly dotted) field paths against literal values and
//! combine the comparisons with logical connectors and parentheses:
//!
//! ```text
//! customer.name ~ "bo" and (total >= 10.5 or not paid = True)
//! ```
//!
//! Only a lexer lives here. Completion never needs a full parse tree: it looks at
//! the last one or two tokens before the cursor.
//!
//! # Examples
//!
//! ```
//! use filterq::parser::{tokenize, TokenKind};
//!
//! let tokens = tokenize("total >= 10");
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [TokenKind::Name, TokenKind::GreaterEqual, TokenKind::IntValue]);
//! ```

mod query_lexer;

pub use query_lexer::{QueryLexer, Token, TokenKind};

/// Tokenize a complete input string
///
/// Never fails; unrecognized characters are dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
    QueryLexer::tokenize(text)
}
