use super::datatypes::duration::Duration;
use anyhow::{Context, Error};
use serde::Serialize;
use std::{cmp::Ordering, fmt};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Show(Duration),
    Add(Duration, Duration),
    Subtract(Duration, Duration),
    Multiply(Duration, i64),
    Compare(Duration, Duration),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Report {
    Duration(Duration),
    Ordering(Ordering),
}
impl Report {
    pub fn to_json(&self) -> Result<String, Error> {
        let json = match self {
            Report::Duration(duration) => serde_json::to_string(&ReportDurationJson {
                duration: *duration,
                total_seconds: duration.total_seconds(),
            }),
            Report::Ordering(ordering) => serde_json::to_string(&ReportOrderingJson {
                ordering: ordering_name(*ordering),
            }),
        }
        .context("to_string")?;
        Ok(json)
    }
}
impl fmt::Display for Report {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Report::Duration(duration) => write!(f, "{}", duration),
            Report::Ordering(ordering) => f.write_str(ordering_name(*ordering)),
        }
    }
}

#[derive(Serialize)]
struct ReportDurationJson {
    duration: Duration,
    total_seconds: i64,
}

#[derive(Serialize)]
struct ReportOrderingJson {
    ordering: &'static str,
}

fn ordering_name(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

pub fn run(operation: Operation) -> Result<Report, Error> {
    let report = match operation {
        Operation::Show(duration) => Report::Duration(duration),
        Operation::Add(left, right) => Report::Duration(
            left.checked_add(right)
                .with_context(|| format!("{} + {} is out of range", left, right))?,
        ),
        Operation::Subtract(left, right) => Report::Duration(
            left.checked_sub(right)
                .with_context(|| format!("{} - {} is out of range", left, right))?,
        ),
        Operation::Multiply(duration, multiplier) => Report::Duration(
            duration
                .checked_mul(multiplier)
                .with_context(|| format!("{} * {} is out of range", duration, multiplier))?,
        ),
        Operation::Compare(left, right) => Report::Ordering(left.cmp(&right)),
    };

    log::debug!("{:?} => {:?}", operation, report);
    Ok(report)
}
