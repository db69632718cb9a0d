//! Best-effort recovery of JSON objects embedded in model output.
//!
//! Models wrap JSON in prose or code fences and regularly emit trailing
//! commas, unquoted keys, single quotes or truncated documents. The span from
//! the first `{` to the last `}` is extracted, parsed as-is when possible and
//! otherwise run through a single-pass repair before parsing. Whether a
//! failure is fatal is up to the caller.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::ResearchError;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("JSON not found in response")]
    JsonNotFound,

    #[error("malformed JSON after repair: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Parses the first brace-delimited span of `text` into a JSON value.
///
/// # Errors
///
/// Returns [`NormalizeError::JsonNotFound`] when `text` has no `{...}` span and
/// [`NormalizeError::Parse`] when the span cannot be repaired into valid JSON.
pub fn normalize_json(text: &str) -> Result<Value, NormalizeError> {
    let span = json_span(text).ok_or(NormalizeError::JsonNotFound)?;

    if let Ok(value) = serde_json::from_str(span) {
        return Ok(value);
    }

    let repaired = repair_json(span);
    serde_json::from_str(&repaired).map_err(NormalizeError::Parse)
}

/// Normalizes `text` and deserializes it into `T`.
///
/// # Errors
///
/// Returns [`ResearchError::Normalize`] if no JSON can be recovered, or
/// [`ResearchError::Deserialize`] if it does not match `T`.
pub fn decode_json<T: DeserializeOwned>(text: &str, context: &str) -> Result<T, ResearchError> {
    let value = normalize_json(text)?;
    serde_json::from_value(value).map_err(|e| ResearchError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Greedy match: from the first `{` to the last `}`.
#[must_use]
pub fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Rewrites a loosely-formed JSON object into strict JSON.
///
/// Does not validate: the output may still fail to parse when the input is
/// too damaged.
#[must_use]
pub fn repair_json(input: &str) -> String {
    Repairer::new(input).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
}

/// The last significant token written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    Open,
    Key,
    Colon,
    Value,
    Comma,
}

struct Repairer {
    chars: Vec<char>,
    pos: usize,
    out: String,
    stack: Vec<Frame>,
    last: Last,
    done: bool,
}

impl Repairer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            out: String::with_capacity(input.len()),
            stack: Vec::new(),
            last: Last::Start,
            done: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn run(mut self) -> String {
        while !self.done {
            let Some(c) = self.peek() else {
                break;
            };
            match c {
                '{' => {
                    self.pos += 1;
                    self.open(Frame::Object);
                }
                '[' => {
                    self.pos += 1;
                    self.open(Frame::Array);
                }
                '}' => {
                    self.pos += 1;
                    self.close(Frame::Object);
                }
                ']' => {
                    self.pos += 1;
                    self.close(Frame::Array);
                }
                ':' => {
                    self.pos += 1;
                    if self.last == Last::Key {
                        self.out.push(':');
                        self.last = Last::Colon;
                    }
                }
                ',' => {
                    self.pos += 1;
                    // Separators are written lazily by `begin_token`, which
                    // drops trailing and repeated commas. A comma right after a
                    // key or colon ends a pair whose value is missing.
                    match self.last {
                        Last::Value => self.last = Last::Comma,
                        Last::Key => {
                            self.out.push_str(":null");
                            self.last = Last::Comma;
                        }
                        Last::Colon => {
                            self.out.push_str("null");
                            self.last = Last::Comma;
                        }
                        Last::Start | Last::Open | Last::Comma => {}
                    }
                }
                '"' | '\'' | '\u{201c}' | '\u{2018}' => {
                    let s = self.read_quoted();
                    self.emit_string(&s);
                }
                '/' if matches!(self.peek_at(1), Some('/' | '*')) => self.skip_comment(),
                c if c.is_ascii_digit()
                    || (c == '.' && matches!(self.peek_at(1), Some('0'..='9')))
                    || (c == '-' && matches!(self.peek_at(1), Some('0'..='9' | '.'))) =>
                {
                    self.number();
                }
                c if c.is_alphabetic() || c == '_' || c == '$' => self.word(),
                _ => self.pos += 1,
            }
        }

        while !self.stack.is_empty() {
            self.close_top();
        }
        self.out
    }

    /// Writes whatever separator the next token needs and reports whether the
    /// token sits in object-key position.
    fn begin_token(&mut self) -> bool {
        match self.stack.last() {
            None => false,
            Some(Frame::Array) => {
                if matches!(self.last, Last::Value | Last::Comma) {
                    self.out.push(',');
                }
                false
            }
            Some(Frame::Object) => match self.last {
                Last::Key => {
                    self.out.push(':');
                    false
                }
                Last::Colon => false,
                Last::Value | Last::Comma => {
                    self.out.push(',');
                    true
                }
                Last::Start | Last::Open => true,
            },
        }
    }

    fn open(&mut self, frame: Frame) {
        self.begin_token();
        self.out.push(match frame {
            Frame::Object => '{',
            Frame::Array => '[',
        });
        self.stack.push(frame);
        self.last = Last::Open;
    }

    /// Closes `frame` and anything left open inside it. Stray closers with no
    /// matching opener are dropped.
    fn close(&mut self, frame: Frame) {
        let Some(depth) = self.stack.iter().rposition(|f| *f == frame) else {
            return;
        };
        while self.stack.len() > depth {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Object => {
                match self.last {
                    Last::Key => self.out.push_str(":null"),
                    Last::Colon => self.out.push_str("null"),
                    _ => {}
                }
                self.out.push('}');
            }
            Frame::Array => self.out.push(']'),
        }
        self.last = Last::Value;
        if self.stack.is_empty() {
            self.done = true;
        }
    }

    fn emit_string(&mut self, s: &str) {
        let is_key = self.begin_token();
        self.out.push_str(&Value::String(s.to_owned()).to_string());
        self.last = if is_key { Last::Key } else { Last::Value };
    }

    fn read_quoted(&mut self) -> String {
        let open = self.chars[self.pos];
        self.pos += 1;
        let close = match open {
            '\u{201c}' => '\u{201d}',
            '\u{2018}' => '\u{2019}',
            c => c,
        };

        let mut s = String::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == '\\' {
                let Some(escaped) = self.peek() else {
                    break;
                };
                self.pos += 1;
                self.unescape(escaped, &mut s);
            } else if c == close && self.at_string_end() {
                return s;
            } else {
                s.push(c);
            }
        }
        // Unterminated string: the document was truncated.
        s
    }

    /// A closing quote only ends the string when followed by a delimiter, so
    /// unescaped inner quotes (`"the "Herbal" line"`) survive.
    fn at_string_end(&self) -> bool {
        let mut i = self.pos;
        while let Some(&c) = self.chars.get(i) {
            match c {
                '\n' | '\r' => return true,
                c if c.is_whitespace() => i += 1,
                ',' | ':' | '}' | ']' | '"' => return true,
                _ => return false,
            }
        }
        true
    }

    fn unescape(&mut self, escaped: char, s: &mut String) {
        match escaped {
            'n' => s.push('\n'),
            't' => s.push('\t'),
            'r' => s.push('\r'),
            'b' => s.push('\u{8}'),
            'f' => s.push('\u{c}'),
            'u' => {
                let decoded = self.read_unicode_escape();
                s.push(decoded);
            }
            other => s.push(other),
        }
    }

    /// Decodes the four hex digits after `\u`, joining surrogate pairs.
    fn read_unicode_escape(&mut self) -> char {
        let Some(high) = self.read_hex4() else {
            return char::REPLACEMENT_CHARACTER;
        };
        if (0xD800..0xDC00).contains(&high)
            && self.peek() == Some('\\')
            && self.peek_at(1) == Some('u')
        {
            let resume = self.pos;
            self.pos += 2;
            match self.read_hex4() {
                Some(low) if (0xDC00..0xE000).contains(&low) => {
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                }
                _ => self.pos = resume,
            }
        }
        char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn read_hex4(&mut self) -> Option<u32> {
        let digits: String = self.chars.get(self.pos..self.pos + 4)?.iter().collect();
        let code = u32::from_str_radix(&digits, 16).ok()?;
        self.pos += 4;
        Some(code)
    }

    fn skip_comment(&mut self) {
        let block = self.peek_at(1) == Some('*');
        self.pos += 2;
        while let Some(c) = self.peek() {
            if block {
                if c == '*' && self.peek_at(1) == Some('/') {
                    self.pos += 2;
                    return;
                }
            } else if c == '\n' {
                return;
            }
            self.pos += 1;
        }
    }

    fn number(&mut self) {
        let is_key = self.begin_token();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                self.pos += 1;
            } else {
                break;
            }
        }

        // `1997년`, `50ml`: a number glued to text is a string.
        if matches!(self.peek(), Some(c) if c.is_alphabetic()) {
            self.read_bare(is_key);
            let raw = self.collect(start);
            self.push_bare(raw.trim(), is_key);
            return;
        }

        let raw = self.collect(start);
        if is_key {
            self.out.push_str(&Value::String(raw).to_string());
            self.last = Last::Key;
            return;
        }

        // `.5` and `-.5` need a leading zero to be valid JSON.
        let trimmed = raw.trim_end_matches('.');
        let padded = match trimmed.strip_prefix('-') {
            Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
            _ if trimmed.starts_with('.') => format!("0{trimmed}"),
            _ => trimmed.to_owned(),
        };
        if serde_json::from_str::<serde_json::Number>(&padded).is_ok() {
            self.out.push_str(&padded);
        } else {
            self.out.push_str(&Value::String(raw).to_string());
        }
        self.last = Last::Value;
    }

    /// Unquoted keys, unquoted string values and Python/JS constants.
    fn word(&mut self) {
        let is_key = self.begin_token();
        let start = self.pos;
        self.read_bare(is_key);
        let raw = self.collect(start);
        self.push_bare(raw.trim(), is_key);
    }

    fn read_bare(&mut self, is_key: bool) {
        while let Some(c) = self.peek() {
            let stop = match c {
                ',' | '{' | '}' | '[' | ']' | '"' | '\n' | '\r' => true,
                ':' => is_key,
                _ => false,
            };
            if stop {
                break;
            }
            self.pos += 1;
        }
    }

    fn push_bare(&mut self, raw: &str, is_key: bool) {
        if is_key {
            self.out.push_str(&Value::String(raw.to_owned()).to_string());
            self.last = Last::Key;
            return;
        }
        match raw {
            "true" | "True" | "TRUE" => self.out.push_str("true"),
            "false" | "False" | "FALSE" => self.out.push_str("false"),
            "null" | "None" | "NULL" | "undefined" | "NaN" => self.out.push_str("null"),
            other => self.out.push_str(&Value::String(other.to_owned()).to_string()),
        }
        self.last = Last::Value;
    }

    fn collect(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
