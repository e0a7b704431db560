#[macro_use]
extern crate clap;
#[macro_use]
extern crate quick_error;

use std::io::{self, Write};
use std::process;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod tools;
mod utils;


quick_error! {
    #[derive(Debug)]
    pub enum Error {
        Bedline(err: bedline::Error) {
            display("{}", err)
            from()
            source(err)
        }
        Clap(err: clap::Error) {
            display("{}", err)
            from()
            source(err)
        }
        Io(err: io::Error) {
            display("{}", err)
            from()
            source(err)
        }
        Open(path: String, err: io::Error) {
            display("can not open {}: {}", path, err)
            source(err)
        }
    }
}

impl Error {

    /// Whether the error comes from writing into a closed pipe, e.g. when piped into `head`.
    fn is_broken_pipe(&self) -> bool {
        match self {
            Error::Bedline(err) => err.is_broken_pipe(),
            Error::Io(err) => err.kind() == io::ErrorKind::BrokenPipe,
            Error::Clap(_) | Error::Open(..) => false,
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Installs the stderr logger, with its level raised by each `-v`.
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let matches = cli::build_cli().get_matches();
    init_logging(cli::verbosity(&matches));

    match cli::run(&matches) {
        Ok(()) => process::exit(0),
        Err(ref err) if err.is_broken_pipe() => process::exit(0),
        Err(Error::Clap(err)) => err.exit(),
        Err(err) => {
            let _ = writeln!(io::stderr(), "error: {}", err);
            process::exit(1);
        },
    }
}
