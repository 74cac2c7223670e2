use anyhow::{Context, Error, bail};
use clap::{Parser, Subcommand};
use hms_duration::{
    app::{self, Operation},
    datatypes::duration::{Duration, parser::Mode},
    util::logging,
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
enum ArgumentsFormat {
    Text,
    Json,
}
impl FromStr for ArgumentsFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s {
            "text" => Self::Text,
            "json" => Self::Json,
            _ => bail!("unsupported format. supported values: text, json"),
        };

        Ok(format)
    }
}

#[derive(Debug, Parser)]
#[clap(name = "hms-duration", version)]
struct Arguments {
    /// Reject unknown characters and numbers without unit
    #[clap(long)]
    strict: bool,

    #[clap(long, default_value = "text")]
    format: ArgumentsFormat,

    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    subcommand: ArgumentsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ArgumentsSubcommand {
    /// Print duration in canonical form
    Show {
        #[clap(allow_hyphen_values = true)]
        duration: String,
    },
    Add {
        #[clap(allow_hyphen_values = true)]
        left: String,
        #[clap(allow_hyphen_values = true)]
        right: String,
    },
    Sub {
        #[clap(allow_hyphen_values = true)]
        left: String,
        #[clap(allow_hyphen_values = true)]
        right: String,
    },
    Mul {
        #[clap(allow_hyphen_values = true)]
        duration: String,
        #[clap(allow_hyphen_values = true)]
        multiplier: i64,
    },
    /// Print whether left is less, equal or greater than right
    Cmp {
        #[clap(allow_hyphen_values = true)]
        left: String,
        #[clap(allow_hyphen_values = true)]
        right: String,
    },
}

fn parse_duration(
    input: &str,
    mode: Mode,
) -> Result<Duration, Error> {
    let duration = Duration::parse(input, mode).with_context(|| format!("parse {:?}", input))?;
    Ok(duration)
}

fn main() -> Result<(), Error> {
    let arguments = Arguments::parse();

    logging::configure(arguments.verbose);

    let mode = if arguments.strict {
        Mode::Strict
    } else {
        Mode::Lenient
    };

    let operation = match &arguments.subcommand {
        ArgumentsSubcommand::Show { duration } => {
            Operation::Show(parse_duration(duration, mode).context("duration")?)
        }
        ArgumentsSubcommand::Add { left, right } => Operation::Add(
            parse_duration(left, mode).context("left")?,
            parse_duration(right, mode).context("right")?,
        ),
        ArgumentsSubcommand::Sub { left, right } => Operation::Subtract(
            parse_duration(left, mode).context("left")?,
            parse_duration(right, mode).context("right")?,
        ),
        ArgumentsSubcommand::Mul {
            duration,
            multiplier,
        } => Operation::Multiply(
            parse_duration(duration, mode).context("duration")?,
            *multiplier,
        ),
        ArgumentsSubcommand::Cmp { left, right } => Operation::Compare(
            parse_duration(left, mode).context("left")?,
            parse_duration(right, mode).context("right")?,
        ),
    };

    let report = app::run(operation).context("run")?;
    match arguments.format {
        ArgumentsFormat::Text => println!("{}", report),
        ArgumentsFormat::Json => println!("{}", report.to_json().context("to_json")?),
    }

    Ok(())
}
