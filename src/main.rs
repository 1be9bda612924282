use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use reggie::{DEFAULT_BACKTRACK_LIMIT, EngineOptions, Validator, Validators};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backtracking steps allowed per search
    #[arg(long, global = true, value_name = "STEPS", default_value_t = DEFAULT_BACKTRACK_LIMIT)]
    backtrack_limit: usize,

    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a personal name
    Name { name: String },
    /// Check a telephone number and print it without styling
    Phone { phone: String },
    /// Print the pattern text of a validator
    Show {
        #[arg(value_enum)]
        validator: ValidatorArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ValidatorArg {
    Name,
    StyledPhone,
    PhoneDestyler,
    StandardizedPhone,
}

impl From<ValidatorArg> for Validator {
    fn from(arg: ValidatorArg) -> Self {
        match arg {
            ValidatorArg::Name => Validator::Name,
            ValidatorArg::StyledPhone => Validator::StyledPhone,
            ValidatorArg::PhoneDestyler => Validator::PhoneDestyler,
            ValidatorArg::StandardizedPhone => Validator::StandardizedPhone,
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

/// Print the accepted form of the input, or report that it was rejected.
fn report(kind: &str, input: &str, accepted: Option<String>) -> ExitCode {
    match accepted {
        Some(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("Invalid {kind}: {input:?}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let options = EngineOptions {
        backtrack_limit: args.backtrack_limit,
        ..EngineOptions::default()
    };

    match args.command {
        Command::Show { validator } => {
            let rendered = Validator::from(validator)
                .expression()
                .render()
                .context("Validator has no pattern text")?;
            println!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Name { name } => {
            let validators = Validators::with_options(&options)?;
            let accepted = validators
                .process_name(&name)
                .with_context(|| format!("Failed to check name {name:?}"))?;
            Ok(report("name", &name, accepted))
        }
        Command::Phone { phone } => {
            let validators = Validators::with_options(&options)?;
            let accepted = validators
                .process_phone(&phone)
                .with_context(|| format!("Failed to check phone number {phone:?}"))?;
            Ok(report("phone number", &phone, accepted))
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    run(args).unwrap_or_else(|err| {
        eprintln!("{err:#}");
        ExitCode::from(2)
    })
}
