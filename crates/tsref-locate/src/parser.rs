//! Recursive-descent parser retaining source byte offsets
//!
//! Implements a minimal object-literal grammar: standard JSON values plus
//! line/block comments and trailing commas. No attempt at general JSON5
//! compliance; keys must be double-quoted strings.

use crate::error::{Error, Result};

/// A byte-offset range into the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A parsed value with the span of its own token(s).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: Value,
    pub span: Span,
}

/// Value forms of the dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(Vec<Property>),
}

/// An object property.
///
/// `pos` starts immediately after the previous structural token (`{` or
/// `,`), so the span `pos..end` owns the property's leading trivia; `end`
/// is one past the last byte of the value. These are the offsets a caller
/// needs to replace the whole key-colon-value region in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub pos: usize,
    pub end: usize,
    pub value: Node,
}

/// Parse a complete document: one value, surrounded only by trivia.
pub fn parse_text(text: &str) -> Result<Node> {
    let mut parser = Parser::new(text);
    parser.skip_trivia()?;
    let node = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.offset != text.len() {
        return Err(Error::parse(parser.offset, "unexpected trailing content"));
    }
    Ok(node)
}

struct Parser<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.offset).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() == Some(byte) {
            self.offset += 1;
            Ok(())
        } else {
            Err(Error::parse(
                self.offset,
                format!("expected '{}'", byte as char),
            ))
        }
    }

    /// Skip whitespace, `//` comments, and `/* */` comments.
    fn skip_trivia(&mut self) -> Result<()> {
        let bytes = self.text.as_bytes();
        loop {
            match bytes.get(self.offset) {
                Some(b) if b.is_ascii_whitespace() => self.offset += 1,
                Some(b'/') => match bytes.get(self.offset + 1) {
                    Some(b'/') => {
                        while self.offset < bytes.len() && bytes[self.offset] != b'\n' {
                            self.offset += 1;
                        }
                    }
                    Some(b'*') => {
                        let close = self.text[self.offset + 2..].find("*/").ok_or_else(|| {
                            Error::parse(self.offset, "unterminated block comment")
                        })?;
                        self.offset += 2 + close + 2;
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Parse a value starting at the current offset (trivia already skipped).
    fn parse_value(&mut self) -> Result<Node> {
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => {
                let start = self.offset;
                let string = self.parse_string()?;
                Ok(Node {
                    value: Value::String(string),
                    span: Span {
                        start,
                        end: self.offset,
                    },
                })
            }
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(other) => Err(Error::parse(
                self.offset,
                format!("unexpected character '{}'", other as char),
            )),
            None => Err(Error::parse(self.offset, "unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Node> {
        let start = self.offset;
        self.expect(b'{')?;
        let mut properties = Vec::new();
        loop {
            // pos is recorded before the leading trivia, pos/end-style
            let pos = self.offset;
            self.skip_trivia()?;
            if self.peek() == Some(b'}') {
                self.offset += 1;
                break;
            }
            let key = self.parse_string()?;
            self.skip_trivia()?;
            self.expect(b':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            let end = value.span.end;
            properties.push(Property {
                key,
                pos,
                end,
                value,
            });
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.offset += 1,
                Some(b'}') => {
                    self.offset += 1;
                    break;
                }
                _ => {
                    return Err(Error::parse(self.offset, "expected ',' or '}' in object"));
                }
            }
        }
        Ok(Node {
            value: Value::Object(properties),
            span: Span {
                start,
                end: self.offset,
            },
        })
    }

    fn parse_array(&mut self) -> Result<Node> {
        let start = self.offset;
        self.expect(b'[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b']') {
                self.offset += 1;
                break;
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.offset += 1,
                Some(b']') => {
                    self.offset += 1;
                    break;
                }
                _ => {
                    return Err(Error::parse(self.offset, "expected ',' or ']' in array"));
                }
            }
        }
        Ok(Node {
            value: Value::Array(items),
            span: Span {
                start,
                end: self.offset,
            },
        })
    }

    fn parse_string(&mut self) -> Result<String> {
        self.expect(b'"')?;
        let bytes = self.text.as_bytes();
        let mut out = String::new();
        let mut segment_start = self.offset;
        loop {
            match bytes.get(self.offset) {
                None => return Err(Error::parse(self.offset, "unterminated string")),
                Some(b'"') => {
                    out.push_str(&self.text[segment_start..self.offset]);
                    self.offset += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[segment_start..self.offset]);
                    self.offset += 1;
                    self.parse_escape(&mut out)?;
                    segment_start = self.offset;
                }
                Some(_) => self.offset += 1,
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let escape_offset = self.offset - 1;
        let byte = self
            .peek()
            .ok_or_else(|| Error::parse(escape_offset, "unterminated escape"))?;
        self.offset += 1;
        match byte {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let high = self.parse_hex4()?;
                let code_point = if (0xD800..0xDC00).contains(&high) {
                    if self.text[self.offset..].starts_with("\\u") {
                        self.offset += 2;
                        let low = self.parse_hex4()?;
                        if !(0xDC00..0xE000).contains(&low) {
                            return Err(Error::parse(escape_offset, "invalid surrogate pair"));
                        }
                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                    } else {
                        return Err(Error::parse(escape_offset, "unpaired surrogate"));
                    }
                } else if (0xDC00..0xE000).contains(&high) {
                    return Err(Error::parse(escape_offset, "unpaired surrogate"));
                } else {
                    high
                };
                let ch = char::from_u32(code_point)
                    .ok_or_else(|| Error::parse(escape_offset, "invalid unicode escape"))?;
                out.push(ch);
            }
            other => {
                return Err(Error::parse(
                    escape_offset,
                    format!("invalid escape '\\{}'", other as char),
                ));
            }
        }
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let digits = self
            .text
            .get(self.offset..self.offset + 4)
            .ok_or_else(|| Error::parse(self.offset, "truncated unicode escape"))?;
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| Error::parse(self.offset, "invalid unicode escape"))?;
        self.offset += 4;
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<Node> {
        let start = self.offset;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E'))
        {
            self.offset += 1;
        }
        let literal = &self.text[start..self.offset];
        let number: f64 = literal
            .parse()
            .map_err(|_| Error::parse(start, format!("invalid number '{}'", literal)))?;
        Ok(Node {
            value: Value::Number(number),
            span: Span {
                start,
                end: self.offset,
            },
        })
    }

    fn parse_literal(&mut self, literal: &str, value: Value) -> Result<Node> {
        let start = self.offset;
        if self.text[self.offset..].starts_with(literal) {
            self.offset += literal.len();
            Ok(Node {
                value,
                span: Span {
                    start,
                    end: self.offset,
                },
            })
        } else {
            Err(Error::parse(start, format!("expected '{}'", literal)))
        }
    }
}
