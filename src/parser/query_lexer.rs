//! Filter query lexer for error-tolerant tokenization
//!
//! The lexer runs on every keystroke against text the user is still typing, so it
//! is total: it never panics and never rejects input. Characters that no rule
//! recognizes are skipped without leaving a token behind.
//!
//! # Rule priority
//!
//! At each position the rules are tried in a fixed order and the first one that
//! matches wins:
//!
//! 1. whitespace (produces nothing)
//! 2. punctuation `.` `,` `(` `)`
//! 3. keywords `or and not in True False None`, only when not followed by a name character
//! 4. names, including dotted paths such as `customer.address.city`
//! 5. double-quoted strings
//! 6. floats, then 7. integers
//! 8. operators, two-character forms before their one-character prefixes
//!
//! Rules start on disjoint characters, so the scanner dispatches on the current
//! character and resolves the remaining ambiguities (keyword vs. name, float vs.
//! int, `>=` vs. `>`) inside each scanner. Offsets are character offsets.

use std::fmt;
use std::ops::Range;

/// Token type enumeration (keywords are case-sensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    Dot,
    Comma,
    ParenL,
    ParenR,

    // Keywords
    Or,
    And,
    Not,
    In,
    True,
    False,
    /// The `None` literal
    None,

    // Names and literals
    Name,
    StringValue,
    IntValue,
    FloatValue,

    // Operators
    Equals,
    NotEquals,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Contains,
    NotContains,
}

impl TokenKind {
    /// Check if this is a comparison operator that expects a value afterwards
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Contains
                | TokenKind::NotContains
                | TokenKind::GreaterEqual
                | TokenKind::Greater
                | TokenKind::LessEqual
                | TokenKind::Less
        )
    }

    /// Check if this is a logical connector (`and` / `or`)
    pub fn is_connector(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }

    /// Check if this token can close a comparison (`)`, numbers and strings)
    pub fn ends_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::ParenR
                | TokenKind::IntValue
                | TokenKind::FloatValue
                | TokenKind::StringValue
        )
    }

    /// Upper-case name used when printing token streams
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Dot => "DOT",
            TokenKind::Comma => "COMMA",
            TokenKind::ParenL => "PAREN_L",
            TokenKind::ParenR => "PAREN_R",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::Not => "NOT",
            TokenKind::In => "IN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::None => "NONE",
            TokenKind::Name => "NAME",
            TokenKind::StringValue => "STRING_VALUE",
            TokenKind::IntValue => "INT_VALUE",
            TokenKind::FloatValue => "FLOAT_VALUE",
            TokenKind::Equals => "EQUALS",
            TokenKind::NotEquals => "NOT_EQUALS",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Contains => "CONTAINS",
            TokenKind::NotContains => "NOT_CONTAINS",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token with position information
///
/// `span` is a half-open range of character offsets into the scanned text. For
/// strings, `text` is the body without the surrounding quotes, escapes kept as
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Start offset (inclusive)
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// End offset (exclusive)
    pub fn end(&self) -> usize {
        self.span.end
    }
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("or", TokenKind::Or),
    ("and", TokenKind::And),
    ("not", TokenKind::Not),
    ("in", TokenKind::In),
    ("True", TokenKind::True),
    ("False", TokenKind::False),
    ("None", TokenKind::None),
];

/// Filter query lexer - error-tolerant tokenizer
pub struct QueryLexer {
    input: Vec<char>,
    pos: usize,
}

impl QueryLexer {
    /// Create a new lexer from input string
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    /// Tokenize the entire input, skipping anything unrecognized
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Self::new(input);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }

        tokens
    }

    /// Get the next recognized token, or `None` once the input is exhausted
    pub fn next_token(&mut self) -> Option<Token> {
        while !self.is_at_end() {
            let start = self.pos;

            if let Some(token) = self.scan_token(start) {
                return Some(token);
            }

            // Nothing matched here (whitespace already moved the cursor)
            if self.pos == start {
                self.pos += 1;
            }
        }

        None
    }

    /// Try every rule at the current position
    fn scan_token(&mut self, start: usize) -> Option<Token> {
        let ch = self.input[start];

        match ch {
            ch if is_blank(ch) => {
                self.skip_whitespace();
                None
            }

            '.' => Some(self.single(TokenKind::Dot, start)),
            ',' => Some(self.single(TokenKind::Comma, start)),
            '(' => Some(self.single(TokenKind::ParenL, start)),
            ')' => Some(self.single(TokenKind::ParenR, start)),

            ch if is_name_start(ch) => Some(self.scan_word(start)),

            '"' => self.scan_string(start),

            '-' | '0'..='9' => self.scan_number(start),

            '=' | '!' | '>' | '<' | '~' => self.scan_operator(start),

            _ => None,
        }
    }

    /// Emit a one-character token
    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        self.pos = start + 1;
        Token::new(kind, self.slice(start, self.pos), start..self.pos)
    }

    /// Scan a keyword or a (possibly dotted) name
    fn scan_word(&mut self, start: usize) -> Token {
        let word_end = self.segment_end(start);
        let word = self.slice(start, word_end);

        // The word is maximal, so a keyword match is never followed by a name char
        if let Some(&(_, kind)) = KEYWORDS.iter().find(|(kw, _)| *kw == word) {
            self.pos = word_end;
            return Token::new(kind, word, start..word_end);
        }

        let mut end = word_end;
        while self.char_at(end) == Some('.')
            && self.char_at(end + 1).is_some_and(is_name_start)
        {
            end = self.segment_end(end + 1);
        }

        self.pos = end;
        Token::new(TokenKind::Name, self.slice(start, end), start..end)
    }

    /// Scan a double-quoted string; an unterminated or malformed one does not match
    fn scan_string(&mut self, start: usize) -> Option<Token> {
        let mut i = start + 1;

        loop {
            match self.char_at(i)? {
                '"' => break,
                '\\' => match self.char_at(i + 1)? {
                    '\\' | '"' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => i += 2,
                    'u' if (i + 2..i + 6)
                        .all(|j| self.char_at(j).is_some_and(|c| c.is_ascii_hexdigit())) =>
                    {
                        i += 6
                    }
                    _ => return None,
                },
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => return None,
                _ => i += 1,
            }
        }

        self.pos = i + 1;
        Some(Token::new(
            TokenKind::StringValue,
            self.slice(start + 1, i),
            start..self.pos,
        ))
    }

    /// Scan a float or an integer (optionally negative, no leading zeros)
    fn scan_number(&mut self, start: usize) -> Option<Token> {
        let mut i = start;
        if self.char_at(i) == Some('-') {
            i += 1;
        }

        let int_end = match self.char_at(i)? {
            '0' => i + 1,
            '1'..='9' => self.digits_end(i + 1),
            _ => return None,
        };

        let mut end = int_end;
        let mut kind = TokenKind::IntValue;

        // Fraction
        if self.char_at(end) == Some('.') && self.is_digit_at(end + 1) {
            end = self.digits_end(end + 1);
            kind = TokenKind::FloatValue;
        }

        // Exponent
        if let Some(exp_end) = self.exponent_end(end) {
            end = exp_end;
            kind = TokenKind::FloatValue;
        }

        self.pos = end;
        Some(Token::new(kind, self.slice(start, end), start..end))
    }

    /// Scan an operator (two characters first)
    fn scan_operator(&mut self, start: usize) -> Option<Token> {
        let (kind, len) = match (self.input[start], self.char_at(start + 1)) {
            ('!', Some('=')) => (TokenKind::NotEquals, 2),
            ('!', Some('~')) => (TokenKind::NotContains, 2),
            ('>', Some('=')) => (TokenKind::GreaterEqual, 2),
            ('<', Some('=')) => (TokenKind::LessEqual, 2),
            ('=', _) => (TokenKind::Equals, 1),
            ('>', _) => (TokenKind::Greater, 1),
            ('<', _) => (TokenKind::Less, 1),
            ('~', _) => (TokenKind::Contains, 1),
            // A lone '!' is not an operator
            _ => return None,
        };

        self.pos = start + len;
        Some(Token::new(kind, self.slice(start, self.pos), start..self.pos))
    }

    /// End of a `[A-Za-z_][A-Za-z0-9_]*` segment starting at `start`
    fn segment_end(&self, start: usize) -> usize {
        let mut end = start + 1;
        while self.char_at(end).is_some_and(is_name_char) {
            end += 1;
        }
        end
    }

    /// End of a run of ASCII digits starting at `start` (may be empty)
    fn digits_end(&self, start: usize) -> usize {
        let mut end = start;
        while self.is_digit_at(end) {
            end += 1;
        }
        end
    }

    /// End of an `[eE][+-]?\d+` exponent starting at `start`, if there is one
    fn exponent_end(&self, start: usize) -> Option<usize> {
        if !matches!(self.char_at(start), Some('e' | 'E')) {
            return None;
        }

        let mut i = start + 1;
        if matches!(self.char_at(i), Some('+' | '-')) {
            i += 1;
        }

        if !self.is_digit_at(i) {
            return None;
        }
        Some(self.digits_end(i))
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while self.char_at(self.pos).is_some_and(is_blank) {
            self.pos += 1;
        }
    }

    fn is_digit_at(&self, pos: usize) -> bool {
        self.char_at(pos).is_some_and(|c| c.is_ascii_digit())
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.input.get(pos).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

/// Whitespace the lexer consumes: space, tab, vertical tab, form feed, no-break space
fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{0B}' | '\u{0C}' | '\u{A0}')
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
