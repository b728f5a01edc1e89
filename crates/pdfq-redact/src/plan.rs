// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redaction plan parsing (spec §4.3): a minimal hand-rolled JSON reader for
//! exactly one shape, `{"redactions": ["...", ...]}`. No general-purpose
//! JSON value model — the wire contract is this one object.

use crate::error::{RedactError, RedactResult};

pub const MAX_PATTERNS: usize = 32;
pub const MAX_PATTERN_LEN: usize = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionPlan {
    pub patterns: Vec<Vec<u8>>,
}

impl RedactionPlan {
    pub fn longest_pattern_len(&self) -> usize {
        self.patterns.iter().map(Vec::len).max().unwrap_or(0)
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Cursor { bytes: s.as_bytes(), pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, b: u8) -> RedactResult<()> {
        match self.bump() {
            Some(x) if x == b => Ok(()),
            Some(x) => Err(RedactError::Parse(format!(
                "expected '{}' at byte {}, found '{}'",
                b as char,
                self.pos - 1,
                x as char
            ))),
            None => Err(RedactError::Parse(format!("unexpected end of input, expected '{}'", b as char))),
        }
    }

    /// Parses a JSON string, supporting only the escapes `\" \\ \n \r \t`.
    fn parse_string(&mut self) -> RedactResult<Vec<u8>> {
        self.expect(b'"')?;
        let mut out = Vec::new();
        loop {
            match self.bump() {
                None => return Err(RedactError::Parse("unterminated string".into())),
                Some(b'"') => break,
                Some(b'\\') => {
                    let esc = self
                        .bump()
                        .ok_or_else(|| RedactError::Parse("unterminated escape".into()))?;
                    let byte = match esc {
                        b'"' => b'"',
                        b'\\' => b'\\',
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        other => {
                            return Err(RedactError::Parse(format!(
                                "unsupported escape '\\{}'",
                                other as char
                            )))
                        }
                    };
                    out.push(byte);
                }
                Some(b) => out.push(b),
            }
        }
        Ok(out)
    }
}

/// Skips over one arbitrary JSON value (string, number, `true`/`false`/
/// `null`, array, or object), without building a value model. Used to
/// tolerate metadata keys other than `"redactions"` (spec §4.3: "other keys
/// tolerated") — e.g. the upload endpoint's `output_dir` key sharing the
/// same metadata document as the redaction plan.
fn skip_value(cur: &mut Cursor<'_>) -> RedactResult<()> {
    cur.skip_ws();
    match cur.peek() {
        Some(b'"') => {
            cur.parse_string()?;
        }
        Some(b'{') => {
            cur.bump();
            cur.skip_ws();
            if cur.peek() != Some(b'}') {
                loop {
                    cur.skip_ws();
                    cur.parse_string()?;
                    cur.skip_ws();
                    cur.expect(b':')?;
                    skip_value(cur)?;
                    cur.skip_ws();
                    match cur.peek() {
                        Some(b',') => {
                            cur.bump();
                            continue;
                        }
                        Some(b'}') => break,
                        _ => return Err(RedactError::Parse("expected ',' or '}' in object".into())),
                    }
                }
            }
            cur.expect(b'}')?;
        }
        Some(b'[') => {
            cur.bump();
            cur.skip_ws();
            if cur.peek() != Some(b']') {
                loop {
                    skip_value(cur)?;
                    cur.skip_ws();
                    match cur.peek() {
                        Some(b',') => {
                            cur.bump();
                            continue;
                        }
                        Some(b']') => break,
                        _ => return Err(RedactError::Parse("expected ',' or ']' in array".into())),
                    }
                }
            }
            cur.expect(b']')?;
        }
        Some(b't') | Some(b'f') | Some(b'n') | Some(b'0'..=b'9') | Some(b'-') => {
            while matches!(cur.peek(), Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'+' | b'.')) {
                cur.bump();
            }
        }
        Some(other) => {
            return Err(RedactError::Parse(format!("unexpected byte '{}' in value", other as char)))
        }
        None => return Err(RedactError::Parse("unexpected end of input in value".into())),
    }
    Ok(())
}

fn parse_redactions_array(cur: &mut Cursor<'_>) -> RedactResult<Vec<Vec<u8>>> {
    cur.expect(b'[')?;
    cur.skip_ws();
    let mut patterns = Vec::new();
    if cur.peek() != Some(b']') {
        loop {
            cur.skip_ws();
            let pattern = cur.parse_string()?;
            if pattern.is_empty() {
                return Err(RedactError::Parse("redaction pattern must not be empty".into()));
            }
            if pattern.len() > MAX_PATTERN_LEN {
                return Err(RedactError::Parse(format!(
                    "redaction pattern exceeds {MAX_PATTERN_LEN} bytes"
                )));
            }
            patterns.push(pattern);
            if patterns.len() > MAX_PATTERNS {
                return Err(RedactError::Parse(format!("more than {MAX_PATTERNS} redaction patterns")));
            }
            cur.skip_ws();
            match cur.peek() {
                Some(b',') => {
                    cur.bump();
                    continue;
                }
                Some(b']') => break,
                _ => return Err(RedactError::Parse("expected ',' or ']' in redactions array".into())),
            }
        }
    }
    cur.expect(b']')?;
    Ok(patterns)
}

/// Parses a redaction plan document of the shape
/// `{"redactions": ["literal one", "literal two"], ...}`. Keys other than
/// `"redactions"`, in any position, are tolerated and skipped (spec §4.3).
pub fn parse_plan(input: &str) -> RedactResult<RedactionPlan> {
    let mut cur = Cursor::new(input);
    cur.skip_ws();
    cur.expect(b'{')?;
    cur.skip_ws();

    let mut patterns: Option<Vec<Vec<u8>>> = None;
    if cur.peek() != Some(b'}') {
        loop {
            cur.skip_ws();
            let key = cur.parse_string()?;
            cur.skip_ws();
            cur.expect(b':')?;
            cur.skip_ws();
            if key == b"redactions" {
                patterns = Some(parse_redactions_array(&mut cur)?);
            } else {
                skip_value(&mut cur)?;
            }
            cur.skip_ws();
            match cur.peek() {
                Some(b',') => {
                    cur.bump();
                    continue;
                }
                Some(b'}') => break,
                _ => return Err(RedactError::Parse("expected ',' or '}' in plan object".into())),
            }
        }
    }
    cur.expect(b'}')?;
    cur.skip_ws();
    if cur.peek().is_some() {
        return Err(RedactError::Parse("trailing data after plan document".into()));
    }

    let patterns = patterns.ok_or_else(|| RedactError::Parse("missing key \"redactions\"".into()))?;
    Ok(RedactionPlan { patterns })
}
