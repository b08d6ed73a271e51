//! Line-oriented token scanner
//!
//! Tokens are maximal runs of non-whitespace characters. Lines holding no
//! token are skipped. Quoted strings are recovered from the raw line so
//! embedded whitespace survives.

use super::error::{LexResult, LexerError};
use crate::config::compile_time::lexical::MAX_TOKEN_LENGTH;
use crate::utils::{Position, Span};

/// A whitespace-delimited token borrowed from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// 1-based line number
    pub line: usize,
    /// 1-based character column
    pub column: usize,
    offset: usize,
}

impl<'a> Token<'a> {
    pub fn span(&self) -> Span {
        let start = Position::new(self.line, self.column);
        Span::new(start, start.advance_str(self.text))
    }
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    index: usize,
    offset: usize,
}

/// Token stream over one source text with a single pushback slot
#[derive(Debug)]
pub struct TokenScanner<'a> {
    lines: Vec<&'a str>,
    next_line: usize,
    cursor: Option<Cursor>,
    line_number: usize,
    pushback: Option<Token<'a>>,
}

fn skip_whitespace(text: &str, from: usize) -> Option<usize> {
    text[from..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| from + i)
}

fn token_end(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

impl<'a> TokenScanner<'a> {
    /// Create a scanner, rejecting any token longer than the compile-time limit
    pub fn new(source: &'a str) -> LexResult<Self> {
        let lines: Vec<&'a str> = source.lines().collect();

        for (index, line) in lines.iter().enumerate() {
            if let Some(length) = line
                .split_whitespace()
                .map(|t| t.chars().count())
                .find(|len| *len > MAX_TOKEN_LENGTH)
            {
                return Err(LexerError::TokenTooLong {
                    line: index + 1,
                    length,
                    max: MAX_TOKEN_LENGTH,
                });
            }
        }

        Ok(Self {
            lines,
            next_line: 0,
            cursor: None,
            line_number: 0,
            pushback: None,
        })
    }

    /// Line of the most recently loaded source line
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Position the cursor on the next token, loading lines as needed
    fn fill(&mut self) -> Option<Cursor> {
        if let Some(cursor) = self.cursor {
            let line = self.lines[cursor.index];
            if let Some(offset) = skip_whitespace(line, cursor.offset) {
                let cursor = Cursor {
                    index: cursor.index,
                    offset,
                };
                self.cursor = Some(cursor);
                return Some(cursor);
            }
            self.cursor = None;
        }

        while self.next_line < self.lines.len() {
            let index = self.next_line;
            self.next_line += 1;
            self.line_number = index + 1;
            if let Some(offset) = skip_whitespace(self.lines[index], 0) {
                let cursor = Cursor { index, offset };
                self.cursor = Some(cursor);
                return Some(cursor);
            }
        }

        None
    }

    fn token_at(&self, cursor: Cursor) -> Token<'a> {
        let line = self.lines[cursor.index];
        let end = token_end(line, cursor.offset);
        Token {
            text: &line[cursor.offset..end],
            line: cursor.index + 1,
            column: line[..cursor.offset].chars().count() + 1,
            offset: cursor.offset,
        }
    }

    /// Read the next token, taking the pushed-back one first
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pushback.take() {
            return Some(token);
        }

        let cursor = self.fill()?;
        let token = self.token_at(cursor);
        self.cursor = Some(Cursor {
            index: cursor.index,
            offset: cursor.offset + token.text.len(),
        });
        Some(token)
    }

    /// Look at the next token without consuming it or loading new lines
    pub fn peek(&self) -> Option<&'a str> {
        if let Some(token) = &self.pushback {
            return Some(token.text);
        }

        let mut index = match self.cursor {
            Some(cursor) => {
                let line = self.lines[cursor.index];
                if let Some(offset) = skip_whitespace(line, cursor.offset) {
                    return Some(&line[offset..token_end(line, offset)]);
                }
                cursor.index + 1
            }
            None => self.next_line,
        };

        while index < self.lines.len() {
            let line = self.lines[index];
            if let Some(offset) = skip_whitespace(line, 0) {
                return Some(&line[offset..token_end(line, offset)]);
            }
            index += 1;
        }

        None
    }

    pub fn has_token(&self) -> bool {
        self.peek().is_some()
    }

    /// Whether the next token starts with `prefix`
    pub fn peek_starts_with(&self, prefix: char) -> bool {
        self.peek().is_some_and(|t| t.starts_with(prefix))
    }

    /// Return a token to the stream; only one may be pending
    pub fn push_back(&mut self, token: Token<'a>) -> LexResult<()> {
        if self.pushback.is_some() {
            return Err(LexerError::PushbackOccupied {
                line: self.line_number,
            });
        }
        self.pushback = Some(token);
        Ok(())
    }

    /// Next token as a decimal integer, if it parses as one
    pub fn peek_int(&self) -> Option<i32> {
        self.peek().and_then(|t| t.parse().ok())
    }

    pub fn next_int(&mut self) -> LexResult<i32> {
        let token = self.next_token();
        let text = token.map(|t| t.text).unwrap_or_default();
        text.parse().map_err(|_| LexerError::NotAnInteger {
            token: text.to_string(),
            line: self.line_number,
        })
    }

    /// Read a `"..."` string from the next non-empty line position.
    ///
    /// Returns `None` when the line holds no complete quoted string; nothing
    /// is consumed in that case.
    pub fn next_quoted(&mut self) -> Option<&'a str> {
        if let Some(token) = self.pushback.take() {
            self.cursor = Some(Cursor {
                index: token.line - 1,
                offset: token.offset,
            });
            self.line_number = token.line;
        }

        let cursor = self.fill()?;
        let line = self.lines[cursor.index];
        let rest = &line[cursor.offset..];
        let open = rest.find('"')?;
        let body = &rest[open + 1..];
        let close = body.find('"')?;

        self.cursor = Some(Cursor {
            index: cursor.index,
            offset: cursor.offset + open + 1 + close + 1,
        });
        Some(&body[..close])
    }

    /// Discard whatever remains of the current line
    pub fn skip_comment_line(&mut self) {
        self.cursor = None;
    }
}
