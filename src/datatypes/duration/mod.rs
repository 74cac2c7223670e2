pub mod parser;

use anyhow::{Context, Error, ensure};
use derive_more::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use parser::{Mode, ParseError, Unit};
use serde::{Deserialize, Serialize};
use std::{fmt, iter::Sum, str::FromStr};

/// Signed duration in whole seconds.
///
/// Canonical text form is `[-]H:MM:SS`, see [`parser`] for accepted inputs.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Neg,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "DurationSerde")]
#[serde(into = "DurationSerde")]
pub struct Duration {
    total_seconds: i64,
}
impl Duration {
    pub const fn zero() -> Self {
        Self { total_seconds: 0 }
    }

    pub const fn from_seconds(total_seconds: i64) -> Self {
        Self { total_seconds }
    }
    /// Fields are additive, `minutes` and `seconds` may exceed 59 or be negative.
    ///
    /// Panics on overflow in debug builds, same as `+`, `-` and `*` on [`Duration`].
    /// Use [`Duration::checked_add`], [`Duration::checked_sub`] or [`Duration::checked_mul`]
    /// where operands are not trusted.
    pub const fn from_components(
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Self {
        let total_seconds = hours * 3600 + minutes * 60 + seconds;
        Self { total_seconds }
    }
    pub fn parse(
        input: &str,
        mode: Mode,
    ) -> Result<Self, ParseError> {
        let total_seconds = parser::parse(input, mode)?;
        Ok(Self::from_seconds(total_seconds))
    }

    pub const fn total_seconds(&self) -> i64 {
        self.total_seconds
    }
    pub fn to_components(&self) -> Components {
        let hour = Unit::Hour.seconds().unsigned_abs();
        let minute = Unit::Minute.seconds().unsigned_abs();

        let absolute = self.total_seconds.unsigned_abs();
        let hours = absolute / hour;
        let minutes = (absolute % hour) / minute;
        let seconds = absolute % minute;

        Components {
            negative: self.is_negative(),
            hours,
            // both below 60
            minutes: minutes as u8,
            seconds: seconds as u8,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.total_seconds == 0
    }
    pub const fn is_negative(&self) -> bool {
        self.total_seconds < 0
    }
    /// Panics on overflow in debug builds, same as [`i64::abs`].
    pub const fn abs(&self) -> Self {
        Self::from_seconds(self.total_seconds.abs())
    }

    pub fn checked_add(
        self,
        rhs: Self,
    ) -> Option<Self> {
        self.total_seconds
            .checked_add(rhs.total_seconds)
            .map(Self::from_seconds)
    }
    pub fn checked_sub(
        self,
        rhs: Self,
    ) -> Option<Self> {
        self.total_seconds
            .checked_sub(rhs.total_seconds)
            .map(Self::from_seconds)
    }
    pub fn checked_mul(
        self,
        rhs: i64,
    ) -> Option<Self> {
        self.total_seconds.checked_mul(rhs).map(Self::from_seconds)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Components {
    pub negative: bool,
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl fmt::Display for Duration {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let Components {
            negative,
            hours,
            minutes,
            seconds,
        } = self.to_components();
        let sign = if negative { "-" } else { "" };
        write!(f, "{sign}{hours}:{minutes:02}:{seconds:02}")
    }
}
impl fmt::Debug for Duration {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Duration('{self}')")
    }
}
impl FromStr for Duration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Mode::Lenient)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |total, item| total + item)
    }
}
impl<'a> Sum<&'a Duration> for Duration {
    fn sum<I: Iterator<Item = &'a Duration>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum DurationSerde {
    Seconds(i64),
    Text(String),
}
impl TryFrom<DurationSerde> for Duration {
    type Error = ParseError;

    fn try_from(value: DurationSerde) -> Result<Self, Self::Error> {
        match value {
            DurationSerde::Seconds(total_seconds) => Ok(Self::from_seconds(total_seconds)),
            DurationSerde::Text(text) => text.parse(),
        }
    }
}
impl From<Duration> for DurationSerde {
    fn from(value: Duration) -> Self {
        DurationSerde::Text(value.to_string())
    }
}

// From/To for external types
impl TryFrom<Duration> for std::time::Duration {
    type Error = Error;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        let seconds =
            u64::try_from(value.total_seconds()).context("value must not be negative")?;
        Ok(Self::from_secs(seconds))
    }
}
impl TryFrom<std::time::Duration> for Duration {
    type Error = Error;

    fn try_from(value: std::time::Duration) -> Result<Self, Self::Error> {
        ensure!(value.subsec_nanos() == 0, "value must be whole seconds");
        let total_seconds = i64::try_from(value.as_secs()).context("as_secs")?;
        Ok(Self::from_seconds(total_seconds))
    }
}
impl TryFrom<Duration> for chrono::TimeDelta {
    type Error = Error;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        Self::try_seconds(value.total_seconds()).context("value out of range")
    }
}
impl TryFrom<chrono::TimeDelta> for Duration {
    type Error = Error;

    fn try_from(value: chrono::TimeDelta) -> Result<Self, Self::Error> {
        ensure!(value.subsec_nanos() == 0, "value must be whole seconds");
        Ok(Self::from_seconds(value.num_seconds()))
    }
}
