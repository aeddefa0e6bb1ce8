use std::io;
use std::process::ExitCode;

use clap::Parser;
use ppm_disguise_cli::{run, ErrorCode, Opt};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
  let opt = Opt::parse();

  let default_level = if opt.verbose { "debug" } else { "warn" };
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(io::stderr))
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .init();

  match run(&opt) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("error: {}", e);
      ErrorCode::from(&e).into()
    }
  }
}
