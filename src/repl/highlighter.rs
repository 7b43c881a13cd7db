//! Syntax highlighter for filter queries
//!
//! Colours each token by kind. Text the lexer skips (whitespace, stray
//! characters, an unterminated quote) is left unstyled.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::parser::{TokenKind, tokenize};

/// Style used for a token kind
pub fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::And | TokenKind::Or | TokenKind::Not | TokenKind::In => {
            Color::Magenta.bold()
        }
        TokenKind::True | TokenKind::False | TokenKind::None => Color::LightYellow.normal(),
        TokenKind::Name => Color::Cyan.normal(),
        TokenKind::StringValue => Color::Green.normal(),
        TokenKind::IntValue | TokenKind::FloatValue => Color::Yellow.normal(),
        kind if kind.is_comparison() => Color::LightRed.normal(),
        TokenKind::Dot | TokenKind::Comma | TokenKind::ParenL | TokenKind::ParenR => {
            Color::DarkGray.normal()
        }
        _ => Style::default(),
    }
}

/// Highlighter for the query input line
pub struct QueryHighlighter {
    enabled: bool,
}

impl QueryHighlighter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for QueryHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter for QueryHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        // Token spans are in characters; map them to byte offsets
        let offsets: Vec<usize> = line
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(line.len()))
            .collect();

        let mut last = 0;
        for token in tokenize(line) {
            let (start, end) = (offsets[token.start()], offsets[token.end()]);
            if start > last {
                styled.push((Style::default(), line[last..start].to_string()));
            }
            styled.push((token_style(token.kind), line[start..end].to_string()));
            last = end;
        }
        if last < line.len() {
            styled.push((Style::default(), line[last..].to_string()));
        }

        styled
    }
}
