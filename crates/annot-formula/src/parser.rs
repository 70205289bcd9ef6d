//! Recursive-descent formula parser.
//!
//! Grammar (whitespace around the whole input is ignored):
//!
//! ```text
//! formula  := '[' sequence ']' charge? | sequence charge?
//! sequence := (element count? | '(' sequence ')' count?)+
//! element  := Uppercase Lowercase?
//! charge   := sign+ | sign digits | digits sign      (digits form only after ']')
//! ```

use std::collections::BTreeMap;

use crate::element::element_symbol;
use crate::error::{FormulaError, ParseIssue, Result};
use crate::formula::CanonicalFormula;

/// Parse a formula string and canonicalize it.
///
/// Identical input always yields the identical result, and harmonizing the
/// rendered canonical string yields the same formula again.
///
/// # Errors
///
/// Returns [`FormulaError::Unparseable`] for empty input, unknown element
/// symbols, zero or overflowing counts, unbalanced groups, or a malformed
/// charge suffix.
pub fn harmonize(input: &str) -> Result<CanonicalFormula> {
    let text = input.trim();
    if text.is_empty() {
        return Err(FormulaError::unparseable(input, 0, ParseIssue::Empty));
    }
    let leading = input.chars().take_while(|ch| ch.is_whitespace()).count();
    harmonize_trimmed(input, text).map_err(|err| err.offset_by(leading))
}

/// Returns true if [`harmonize`] accepts the input.
pub fn is_valid_formula(input: &str) -> bool {
    harmonize(input).is_ok()
}

/// Positions in errors are char offsets into `text`.
fn harmonize_trimmed(input: &str, text: &str) -> Result<CanonicalFormula> {
    let chars: Vec<char> = text.chars().collect();
    let (start, end, charge) = split_charge(input, &chars)?;
    let mut parser = Parser {
        input,
        chars: &chars[..end],
        pos: start,
    };
    let counts = parser.parse_sequence(0)?;
    if counts.is_empty() {
        return Err(FormulaError::unparseable(input, start, ParseIssue::Empty));
    }
    Ok(CanonicalFormula::new(counts, charge))
}

/// Locate the element body and decode the trailing charge.
///
/// Returns `(body_start, body_end, charge)` as char offsets.
fn split_charge(input: &str, chars: &[char]) -> Result<(usize, usize, i64)> {
    if chars.first() == Some(&'[') {
        let close = chars
            .iter()
            .rposition(|ch| *ch == ']')
            .ok_or_else(|| FormulaError::unparseable(input, 0, ParseIssue::UnbalancedBracket))?;
        let charge = parse_charge(input, &chars[close + 1..], close + 1)?;
        return Ok((1, close, charge));
    }
    match chars.iter().position(|&ch| matches!(ch, '+' | '-')) {
        Some(idx) => Ok((0, idx, parse_charge(input, &chars[idx..], idx)?)),
        None => Ok((0, chars.len(), 0)),
    }
}

fn parse_charge(input: &str, tail: &[char], offset: usize) -> Result<i64> {
    let Some(&first) = tail.first() else {
        return Ok(0);
    };
    let text: String = tail.iter().collect();
    let malformed = || {
        FormulaError::unparseable(input, offset, ParseIssue::MalformedCharge(text.clone()))
    };

    let (sign, digits) = if matches!(first, '+' | '-') {
        let rest = &tail[1..];
        if rest.iter().all(|ch| *ch == first) {
            let magnitude = i64::try_from(tail.len()).map_err(|_| malformed())?;
            return Ok(signed(first, magnitude));
        }
        (first, rest)
    } else {
        let Some((&last, rest)) = tail.split_last() else {
            return Err(malformed());
        };
        if !matches!(last, '+' | '-') {
            return Err(malformed());
        }
        (last, rest)
    };

    if digits.is_empty() || !digits.iter().all(char::is_ascii_digit) {
        return Err(malformed());
    }
    let magnitude: i64 = digits
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| malformed())?;
    if magnitude == 0 {
        return Err(malformed());
    }
    Ok(signed(sign, magnitude))
}

fn signed(sign: char, magnitude: i64) -> i64 {
    if sign == '-' { -magnitude } else { magnitude }
}

struct Parser<'a> {
    input: &'a str,
    chars: &'a [char],
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, position: usize, reason: ParseIssue) -> FormulaError {
        FormulaError::unparseable(self.input, position, reason)
    }

    fn parse_sequence(&mut self, depth: usize) -> Result<BTreeMap<&'static str, u64>> {
        let mut counts = BTreeMap::new();
        while let Some(&ch) = self.chars.get(self.pos) {
            match ch {
                '(' => {
                    let open = self.pos;
                    self.pos += 1;
                    let inner = self.parse_sequence(depth + 1)?;
                    if self.chars.get(self.pos) != Some(&')') {
                        return Err(self.error(open, ParseIssue::UnbalancedParenthesis));
                    }
                    self.pos += 1;
                    if inner.is_empty() {
                        return Err(self.error(open, ParseIssue::Empty));
                    }
                    let multiplier = self.parse_count()?;
                    for (symbol, count) in inner {
                        let scaled = count
                            .checked_mul(multiplier)
                            .ok_or_else(|| self.error(open, ParseIssue::CountOverflow))?;
                        self.add(&mut counts, symbol, scaled, open)?;
                    }
                }
                ')' => {
                    if depth == 0 {
                        return Err(self.error(self.pos, ParseIssue::UnbalancedParenthesis));
                    }
                    return Ok(counts);
                }
                '[' | ']' => return Err(self.error(self.pos, ParseIssue::UnbalancedBracket)),
                c if c.is_ascii_uppercase() => {
                    let start = self.pos;
                    let symbol = self.parse_symbol()?;
                    let count = self.parse_count()?;
                    self.add(&mut counts, symbol, count, start)?;
                }
                other => return Err(self.error(self.pos, ParseIssue::UnexpectedChar(other))),
            }
        }
        Ok(counts)
    }

    fn add(
        &self,
        counts: &mut BTreeMap<&'static str, u64>,
        symbol: &'static str,
        count: u64,
        position: usize,
    ) -> Result<()> {
        let entry = counts.entry(symbol).or_insert(0);
        *entry = entry
            .checked_add(count)
            .ok_or_else(|| self.error(position, ParseIssue::CountOverflow))?;
        Ok(())
    }

    /// Two-letter symbols win over one-letter ones (`Co` is cobalt, `CO` is C + O).
    fn parse_symbol(&mut self) -> Result<&'static str> {
        let start = self.pos;
        let first = self.chars[start];
        if let Some(&second) = self.chars.get(start + 1)
            && second.is_ascii_lowercase()
        {
            let candidate: String = [first, second].iter().collect();
            return match element_symbol(&candidate) {
                Some(symbol) => {
                    self.pos += 2;
                    Ok(symbol)
                }
                None => Err(self.error(start, ParseIssue::UnknownElement(candidate))),
            };
        }
        let candidate = first.to_string();
        match element_symbol(&candidate) {
            Some(symbol) => {
                self.pos += 1;
                Ok(symbol)
            }
            None => Err(self.error(start, ParseIssue::UnknownElement(candidate))),
        }
    }

    fn parse_count(&mut self) -> Result<u64> {
        let start = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(char::is_ascii_digit)
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(1);
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        let count: u64 = digits
            .parse()
            .map_err(|_| self.error(start, ParseIssue::CountOverflow))?;
        if count == 0 {
            return Err(self.error(start, ParseIssue::ZeroCount));
        }
        Ok(count)
    }
}
