//! Token stream with cursor awareness for completion
//!
//! Only tokens that end strictly before the cursor count as completed. The
//! token being typed is re-derived from the raw trailing text instead, since the
//! lexer may not recognize it yet.

use crate::parser::{Token, TokenKind, tokenize};

/// Completed tokens before the cursor plus the raw text after them
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// Completed tokens, in order
    tokens: Vec<Token>,
    /// Raw text between the last completed token and the cursor
    trailing: String,
}

impl TokenStream {
    /// Create a token stream for `text` with the cursor at character `cursor`
    pub fn new(text: &str, cursor: usize) -> Self {
        let head: Vec<char> = text.chars().take(cursor).collect();
        let cursor = head.len();

        let mut tokens = tokenize(&head.iter().collect::<String>());
        if tokens.last().is_some_and(|token| token.end() >= cursor) {
            tokens.pop();
        }

        let start = tokens.last().map_or(0, Token::end);
        let trailing = head[start..].iter().collect();

        Self { tokens, trailing }
    }

    /// Get all completed tokens before the cursor
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Last completed token
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Completed token before the last one
    pub fn before_last(&self) -> Option<&Token> {
        self.tokens.iter().rev().nth(1)
    }

    pub fn last_kind(&self) -> Option<TokenKind> {
        self.last().map(|token| token.kind)
    }

    pub fn before_last_kind(&self) -> Option<TokenKind> {
        self.before_last().map(|token| token.kind)
    }

    /// Raw text from the end of the last completed token to the cursor
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    /// Whether whitespace separates the last completed token from the prefix
    pub fn has_leading_whitespace(&self) -> bool {
        self.trailing.starts_with(char::is_whitespace)
    }

    /// Get the text of the token currently being typed
    ///
    /// A lone opening parenthesis is structural and yields an empty prefix.
    pub fn prefix(&self) -> &str {
        let prefix = self.trailing.trim_start_matches(char::is_whitespace);
        if prefix == "(" { "" } else { prefix }
    }
}
