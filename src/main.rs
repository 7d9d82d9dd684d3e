mod fmt;

use std::{
    env,
    io::{self, Write},
};

use anyhow::Context;
use argh::{EarlyExit, FromArgs};
use tracing::{error, warn, Level};

use crate::fmt::Formatter;

/// Print the brightness of the main display as a percentage. Prints 0 when
/// the brightness can't be read.
#[derive(Debug, Default, FromArgs, PartialEq)]
struct Args {
    /// log each query step to stderr
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// print the version and exit
    #[argh(switch)]
    version: bool,
}

#[derive(Debug, PartialEq)]
enum Invocation {
    Run(Args),
    /// `--help` output, printed to stdout.
    Help(String),
    /// Arguments argh rejected. The query still runs with the defaults.
    Invalid(String),
}

fn parse_args(args: &[String]) -> Invocation {
    let (command, rest) = match args.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => ("brite", args),
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    match Args::from_args(&[command], &rest) {
        Ok(args) => Invocation::Run(args),
        Err(EarlyExit {
            output,
            status: Ok(()),
        }) => Invocation::Help(output),
        Err(EarlyExit {
            output,
            status: Err(()),
        }) => Invocation::Invalid(output),
    }
}

fn run<W: io::Write>(stdout: W) -> anyhow::Result<()> {
    let percent = brite::main_display_brightness_percent();
    brite::write_percent(stdout, percent)
        .context("failed to write the brightness to stdout")
}

fn init_tracing(verbose: bool) {
    let max_level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .event_format(Formatter::new())
        .init();
}

// Every path exits with status 0, including bad arguments and a closed
// stdout.
fn main() {
    let args: Vec<String> = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let (args, rejected) = match parse_args(&args) {
        Invocation::Run(args) => (args, None),
        Invocation::Help(output) => {
            let _ = writeln!(io::stdout().lock(), "{output}");
            return;
        }
        Invocation::Invalid(output) => (Args::default(), Some(output)),
    };

    if args.version {
        let _ = writeln!(
            io::stdout().lock(),
            "brite {}",
            env!("CARGO_PKG_VERSION")
        );
        return;
    }

    init_tracing(args.verbose);
    if let Some(output) = rejected {
        warn!("ignoring arguments: {}", output.trim_end());
    }
    finish(run(io::stdout().lock()));
}

fn finish(result: anyhow::Result<()>) {
    if let Err(err) = result {
        error!("{err:#}");
    }
}
