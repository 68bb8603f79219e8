// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive-descent parser turning a JSONPath string into segments.

use crate::{JsonPathError, Segment, Selector};

pub(crate) fn parse(source: &str) -> Result<Vec<Segment>, JsonPathError> {
    Parser::new(source).parse()
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> JsonPathError {
        JsonPathError::Syntax {
            position: self.pos,
            message: message.into(),
        }
    }

    fn parse(mut self) -> Result<Vec<Segment>, JsonPathError> {
        let trimmed_start = self.chars.iter().take_while(|c| c.is_whitespace()).count();
        self.pos = trimmed_start;
        while self.chars.last().is_some_and(|c| c.is_whitespace()) {
            self.chars.pop();
        }

        if self.pos >= self.chars.len() {
            return Err(JsonPathError::Empty);
        }

        let mut segments = Vec::new();

        // A bare `a.b` is read as `$.a.b`.
        if !self.eat('$') && self.peek().is_some_and(is_name_char) {
            segments.push(Segment::Child(Selector::Name(self.dot_name()?)));
        }

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.pos += 1;
                    if self.eat('.') {
                        segments.push(Segment::Descendant(self.after_descendant()?));
                    } else if self.eat('*') {
                        segments.push(Segment::Child(Selector::Wildcard));
                    } else {
                        segments.push(Segment::Child(Selector::Name(self.dot_name()?)));
                    }
                }
                '[' => {
                    segments.push(Segment::Child(self.bracket()?));
                }
                other => return Err(self.error(format!("unexpected character `{other}`"))),
            }
        }

        Ok(segments)
    }

    /// Parses what follows `..`: a name, `*`, or a bracketed selector.
    fn after_descendant(&mut self) -> Result<Selector, JsonPathError> {
        match self.peek() {
            Some('*') => {
                self.pos += 1;
                Ok(Selector::Wildcard)
            }
            Some('[') => self.bracket(),
            Some(_) => Ok(Selector::Name(self.dot_name()?)),
            None => Err(self.error("expected a name, `*` or `[` after `..`")),
        }
    }

    fn dot_name(&mut self) -> Result<String, JsonPathError> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected a member name"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn bracket(&mut self) -> Result<Selector, JsonPathError> {
        let open = self.pos;
        if !self.eat('[') {
            return Err(self.error("expected `[`"));
        }
        self.skip_whitespace();

        match self.peek() {
            Some('?') => {
                return Err(JsonPathError::Unsupported {
                    position: self.pos,
                    feature: "filter expressions",
                });
            }
            Some('(') => {
                return Err(JsonPathError::Unsupported {
                    position: self.pos,
                    feature: "script expressions",
                });
            }
            _ => {}
        }

        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.bracket_item()?);
            self.skip_whitespace();
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                break;
            }
            return match self.peek() {
                Some(c) => Err(self.error(format!("expected `,` or `]`, found `{c}`"))),
                None => Err(JsonPathError::Syntax {
                    position: open,
                    message: "unclosed `[`".to_string(),
                }),
            };
        }

        if selectors.len() == 1 {
            Ok(selectors.remove(0))
        } else {
            Ok(Selector::Union(selectors))
        }
    }

    fn bracket_item(&mut self) -> Result<Selector, JsonPathError> {
        match self.peek() {
            Some('*') => {
                self.pos += 1;
                Ok(Selector::Wildcard)
            }
            Some(q @ ('\'' | '"')) => {
                self.pos += 1;
                Ok(Selector::Name(self.quoted(q)?))
            }
            Some(c) if c == '-' || c == ':' || c.is_ascii_digit() => self.index_or_slice(),
            Some(c) => Err(self.error(format!("unexpected character `{c}` in brackets"))),
            None => Err(self.error("unexpected end of path inside brackets")),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, JsonPathError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('b') => out.push('\u{8}'),
                    Some('f') => out.push('\u{c}'),
                    Some('u') => out.push(self.unicode_escape()?),
                    Some(c @ ('\\' | '/' | '\'' | '"')) => out.push(c),
                    Some(c) => return Err(self.error(format!("invalid escape `\\{c}`"))),
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, JsonPathError> {
        let start = self.pos;
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("expected four hex digits after `\\u`"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or(JsonPathError::Syntax {
            position: start,
            message: format!("`\\u{code:04x}` is not a scalar value"),
        })
    }

    fn index_or_slice(&mut self) -> Result<Selector, JsonPathError> {
        let first = self.integer()?;
        self.skip_whitespace();
        if !self.eat(':') {
            return match first {
                Some(index) => Ok(Selector::Index(index)),
                None => Err(self.error("expected an index")),
            };
        }

        self.skip_whitespace();
        let end = self.integer()?;
        self.skip_whitespace();
        let step = if self.eat(':') {
            self.skip_whitespace();
            self.integer()?
        } else {
            None
        };

        Ok(Selector::Slice {
            start: first,
            end,
            step,
        })
    }

    fn integer(&mut self) -> Result<Option<i64>, JsonPathError> {
        let start = self.pos;
        self.eat('-');
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        match text.as_str() {
            "" => Ok(None),
            "-" => Err(self.error("expected digits after `-`")),
            _ => text.parse::<i64>().map(Some).map_err(|e| JsonPathError::Syntax {
                position: start,
                message: format!("invalid integer `{text}`: {e}"),
            }),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '$' | '@')
}
