//! Textual duration grammar.
//!
//! Two shapes are accepted, selected by the presence of a colon:
//! - colon delimited `[-]H:M:S`, `[-]M:S` or `[-]S`,
//! - unit suffixed `[-]<n>d<n>h<n>m<n>s`, units in any order and combination.

use derive_more::{Display, Error};
use std::num::{IntErrorKind, ParseIntError};

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Mode {
    /// Unknown characters are skipped, dangling numbers are dropped.
    #[default]
    Lenient,
    /// Every character must belong to the grammar.
    Strict,
}

#[derive(Clone, PartialEq, Eq, Display, Error, Debug)]
pub enum ParseError {
    #[display("invalid integer {part:?}")]
    InvalidInteger { part: String, source: ParseIntError },
    #[display("expected at most 3 colon delimited fields, got {count}")]
    TooManyFields { count: usize },
    #[display("value out of range")]
    Overflow,
    #[display("unexpected character {character:?} at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[display("unit {unit:?} is not preceded by a number")]
    MissingNumber { unit: char },
    #[display("number {digits:?} is not followed by a unit")]
    DanglingNumber { digits: String },
    #[display("no units found")]
    Empty,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Unit {
    Day,
    Hour,
    Minute,
    Second,
}
impl Unit {
    pub fn from_char(character: char) -> Option<Self> {
        match character {
            'd' => Some(Self::Day),
            'h' => Some(Self::Hour),
            'm' => Some(Self::Minute),
            's' => Some(Self::Second),
            _ => None,
        }
    }
    pub fn as_char(&self) -> char {
        match self {
            Self::Day => 'd',
            Self::Hour => 'h',
            Self::Minute => 'm',
            Self::Second => 's',
        }
    }
    pub fn seconds(&self) -> i64 {
        match self {
            Self::Day => 86400,
            Self::Hour => 3600,
            Self::Minute => 60,
            Self::Second => 1,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Format {
    Colon,
    UnitSuffixed,
}
impl Format {
    fn detect(body: &str) -> Self {
        if body.contains(':') {
            Self::Colon
        } else {
            Self::UnitSuffixed
        }
    }
}

/// Returns total number of seconds represented by `input`.
pub fn parse(
    input: &str,
    mode: Mode,
) -> Result<i64, ParseError> {
    // every leading '-' belongs to the sign
    let body = input.trim_start_matches('-');
    let offset = input.len() - body.len();
    let sign = if offset > 0 { -1i128 } else { 1i128 };

    // intermediate values are kept wider, so i64::MIN is still reachable
    let magnitude = match Format::detect(body) {
        Format::Colon => parse_colon(body, offset, mode)?,
        Format::UnitSuffixed => Scanner::new(body, offset, mode).run()?,
    };

    let total = magnitude.checked_mul(sign).ok_or(ParseError::Overflow)?;
    i64::try_from(total).map_err(|_| ParseError::Overflow)
}

fn parse_colon(
    body: &str,
    offset: usize,
    mode: Mode,
) -> Result<i128, ParseError> {
    let mut fields = [0i128; 3];

    let count = body.split(':').count();
    if count > fields.len() {
        return Err(ParseError::TooManyFields { count });
    }
    let fields_offset = fields.len() - count;

    let mut position = offset;
    for (index, part) in body.split(':').enumerate() {
        if mode == Mode::Strict
            && let Some((part_index, character)) = part
                .char_indices()
                .find(|(_, character)| !character.is_ascii_digit())
        {
            return Err(ParseError::UnexpectedCharacter {
                character,
                position: position + part_index,
            });
        }

        fields[fields_offset + index] = parse_field(part)?;
        position += part.len() + 1;
    }

    let [hours, minutes, seconds] = fields;
    hours
        .checked_mul(Unit::Hour.seconds().into())
        .zip(minutes.checked_mul(Unit::Minute.seconds().into()))
        .and_then(|(hours, minutes)| hours.checked_add(minutes))
        .and_then(|total| total.checked_add(seconds))
        .ok_or(ParseError::Overflow)
}
fn parse_field(part: &str) -> Result<i128, ParseError> {
    part.trim()
        .parse::<i128>()
        .map_err(|source| match source.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::Overflow,
            _ => ParseError::InvalidInteger {
                part: part.to_owned(),
                source,
            },
        })
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Idle,
    Number { start: usize, value: i128 },
}

/// Unit suffixed format state machine.
///
/// Digits are collected into a buffer, a unit letter flushes the buffer into the total.
struct Scanner<'a> {
    body: &'a str,
    offset: usize,
    mode: Mode,

    state: State,
    units: usize,
    total: i128,
}
impl<'a> Scanner<'a> {
    fn new(
        body: &'a str,
        offset: usize,
        mode: Mode,
    ) -> Self {
        Self {
            body,
            offset,
            mode,

            state: State::Idle,
            units: 0,
            total: 0,
        }
    }

    fn run(mut self) -> Result<i128, ParseError> {
        for (index, character) in self.body.char_indices() {
            self.step(index, character)?;
        }
        self.finish()
    }

    fn step(
        &mut self,
        index: usize,
        character: char,
    ) -> Result<(), ParseError> {
        if let Some(digit) = character.to_digit(10) {
            return self.push_digit(index, digit);
        }

        match Unit::from_char(character) {
            Some(unit) => self.flush(unit),
            None => self.skip(index, character),
        }
    }
    fn push_digit(
        &mut self,
        index: usize,
        digit: u32,
    ) -> Result<(), ParseError> {
        let (start, value) = match self.state {
            State::Idle => (index, 0),
            State::Number { start, value } => (start, value),
        };
        let value = value
            .checked_mul(10)
            .and_then(|value| value.checked_add(digit.into()))
            .ok_or(ParseError::Overflow)?;

        self.state = State::Number { start, value };
        Ok(())
    }
    fn flush(
        &mut self,
        unit: Unit,
    ) -> Result<(), ParseError> {
        self.units += 1;

        match self.state {
            State::Idle => match self.mode {
                Mode::Lenient => Ok(()),
                Mode::Strict => Err(ParseError::MissingNumber {
                    unit: unit.as_char(),
                }),
            },
            State::Number { value, .. } => {
                self.state = State::Idle;

                let amount = value
                    .checked_mul(unit.seconds().into())
                    .ok_or(ParseError::Overflow)?;
                self.total = self
                    .total
                    .checked_add(amount)
                    .ok_or(ParseError::Overflow)?;
                Ok(())
            }
        }
    }
    fn skip(
        &mut self,
        index: usize,
        character: char,
    ) -> Result<(), ParseError> {
        let position = self.offset + index;
        match self.mode {
            Mode::Lenient => {
                log::trace!("skipping character {character:?} at position {position}");
                Ok(())
            }
            Mode::Strict => Err(ParseError::UnexpectedCharacter {
                character,
                position,
            }),
        }
    }
    fn finish(self) -> Result<i128, ParseError> {
        if let State::Number { start, .. } = self.state {
            let digits = &self.body[start..];
            match self.mode {
                Mode::Lenient => log::trace!("dropping number {digits:?} without unit"),
                Mode::Strict => {
                    return Err(ParseError::DanglingNumber {
                        digits: digits.to_owned(),
                    });
                }
            }
        }
        if self.mode == Mode::Strict && self.units == 0 {
            return Err(ParseError::Empty);
        }

        Ok(self.total)
    }
}

#[cfg(test)]
mod tests_parser {
    use super::{Mode, ParseError, parse};

    #[test]
    fn colon_1() {
        assert_eq!(parse("1:30:15", Mode::Lenient).unwrap(), 5415);
    }
    #[test]
    fn colon_2() {
        assert_eq!(parse("01:30:30", Mode::Lenient).unwrap(), 5430);
    }
    #[test]
    fn colon_3() {
        assert_eq!(parse("-2:15:30", Mode::Lenient).unwrap(), -8130);
    }
    #[test]
    fn colon_4() {
        // right aligned, M:S
        assert_eq!(parse("5:07", Mode::Lenient).unwrap(), 307);
    }
    #[test]
    fn colon_5() {
        // fields are additive, not range checked
        assert_eq!(parse("0:90:75", Mode::Lenient).unwrap(), 5475);
    }
    #[test]
    fn colon_6() {
        assert_eq!(parse(" 1 : 02 : 03 ", Mode::Lenient).unwrap(), 3723);
    }
    #[test]
    fn colon_7() {
        assert_eq!(
            parse("-2562047788015215:30:08", Mode::Lenient).unwrap(),
            i64::MIN
        );
    }
    #[test]
    fn colon_8() {
        // repeated leading '-' is a single sign
        assert_eq!(parse("--1:30:00", Mode::Lenient).unwrap(), -5400);
        assert_eq!(parse("---0:01", Mode::Lenient).unwrap(), -1);
    }

    #[test]
    fn colon_invalid_1() {
        match parse("45:", Mode::Lenient).unwrap_err() {
            ParseError::InvalidInteger { part, .. } => assert_eq!(part, ""),
            error => panic!("unexpected error: {error:?}"),
        }
    }
    #[test]
    fn colon_invalid_2() {
        match parse("1:xx:00", Mode::Lenient).unwrap_err() {
            ParseError::InvalidInteger { part, .. } => assert_eq!(part, "xx"),
            error => panic!("unexpected error: {error:?}"),
        }
    }
    #[test]
    fn colon_invalid_3() {
        assert_eq!(
            parse("1:2:3:4", Mode::Lenient).unwrap_err(),
            ParseError::TooManyFields { count: 4 }
        );
    }
    #[test]
    fn colon_invalid_4() {
        assert!(matches!(
            parse("1::3", Mode::Lenient).unwrap_err(),
            ParseError::InvalidInteger { .. }
        ));
    }
    #[test]
    fn colon_invalid_5() {
        // unit letters do not mix with the colon format
        assert!(matches!(
            parse("5m:30", Mode::Lenient).unwrap_err(),
            ParseError::InvalidInteger { .. }
        ));
    }
    #[test]
    fn colon_invalid_6() {
        assert_eq!(
            parse("2562047788015215:30:08", Mode::Lenient).unwrap_err(),
            ParseError::Overflow
        );
    }
    #[test]
    fn colon_invalid_7() {
        assert_eq!(
            parse("99999999999999999999999999999999999999999:00", Mode::Lenient).unwrap_err(),
            ParseError::Overflow
        );
    }

    #[test]
    fn unit_1() {
        assert_eq!(parse("2h15m45s", Mode::Lenient).unwrap(), 8145);
    }
    #[test]
    fn unit_2() {
        assert_eq!(parse("10h5m30s", Mode::Lenient).unwrap(), 36330);
    }
    #[test]
    fn unit_3() {
        assert_eq!(parse("5m", Mode::Lenient).unwrap(), 300);
    }
    #[test]
    fn unit_4() {
        assert_eq!(parse("-1h2m3s", Mode::Lenient).unwrap(), -3723);
    }
    #[test]
    fn unit_5() {
        assert_eq!(parse("1d", Mode::Lenient).unwrap(), 86400);
    }
    #[test]
    fn unit_6() {
        // any order, repeated units accumulate
        assert_eq!(parse("30s1h30s", Mode::Lenient).unwrap(), 3660);
    }
    #[test]
    fn unit_7() {
        assert_eq!(parse("", Mode::Lenient).unwrap(), 0);
        assert_eq!(parse("-", Mode::Lenient).unwrap(), 0);
        assert_eq!(parse("hello", Mode::Lenient).unwrap(), 0);
        assert_eq!(parse("abc", Mode::Lenient).unwrap(), 0);
    }

    #[test]
    fn unit_lenient_1() {
        // dangling number is dropped
        assert_eq!(parse("5m30", Mode::Lenient).unwrap(), 300);
    }
    #[test]
    fn unit_lenient_2() {
        // unknown characters do not break the digit run
        assert_eq!(parse("1 5m", Mode::Lenient).unwrap(), 900);
        assert_eq!(parse("2 h 3 m", Mode::Lenient).unwrap(), 7380);
    }
    #[test]
    fn unit_lenient_3() {
        assert_eq!(parse("h5m", Mode::Lenient).unwrap(), 300);
    }
    #[test]
    fn unit_lenient_4() {
        // units are lowercase only
        assert_eq!(parse("2H", Mode::Lenient).unwrap(), 0);
    }
    #[test]
    fn unit_lenient_5() {
        assert_eq!(parse("--5m", Mode::Lenient).unwrap(), -300);
    }

    #[test]
    fn unit_invalid_1() {
        assert_eq!(
            parse("99999999999999999999999999999999999999999s", Mode::Lenient).unwrap_err(),
            ParseError::Overflow
        );
    }
    #[test]
    fn unit_invalid_2() {
        assert_eq!(
            parse("9223372036854775807s1s", Mode::Lenient).unwrap_err(),
            ParseError::Overflow
        );
    }

    #[test]
    fn strict_1() {
        assert_eq!(parse("2h15m45s", Mode::Strict).unwrap(), 8145);
        assert_eq!(parse("-1:02:03", Mode::Strict).unwrap(), -3723);
    }
    #[test]
    fn strict_2() {
        assert_eq!(
            parse("5m30", Mode::Strict).unwrap_err(),
            ParseError::DanglingNumber {
                digits: "30".to_owned()
            }
        );
    }
    #[test]
    fn strict_3() {
        assert_eq!(
            parse("-1 5m", Mode::Strict).unwrap_err(),
            ParseError::UnexpectedCharacter {
                character: ' ',
                position: 2
            }
        );
    }
    #[test]
    fn strict_4() {
        assert_eq!(
            parse("h5m", Mode::Strict).unwrap_err(),
            ParseError::MissingNumber { unit: 'h' }
        );
    }
    #[test]
    fn strict_5() {
        assert_eq!(parse("", Mode::Strict).unwrap_err(), ParseError::Empty);
        assert_eq!(parse("-", Mode::Strict).unwrap_err(), ParseError::Empty);
    }
    #[test]
    fn strict_6() {
        assert_eq!(
            parse("1:+2:03", Mode::Strict).unwrap_err(),
            ParseError::UnexpectedCharacter {
                character: '+',
                position: 2
            }
        );
    }
    #[test]
    fn strict_7() {
        assert_eq!(
            parse("1:x:00", Mode::Strict).unwrap_err(),
            ParseError::UnexpectedCharacter {
                character: 'x',
                position: 2
            }
        );
        assert_eq!(
            parse("--1: 2:03", Mode::Strict).unwrap_err(),
            ParseError::UnexpectedCharacter {
                character: ' ',
                position: 4
            }
        );
    }
}
