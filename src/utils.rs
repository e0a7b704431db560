//! Input and output streams of the subcommands.
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use tracing::debug;


/// Path argument value standing for stdin or stdout.
const STDIO: &str = "-";

pub type Input = Box<dyn BufRead>;
pub type Output = Box<dyn Write>;

/// Opens the file at `path` for buffered reading, or stdin for `-`.
pub fn open_input(path: &str) -> crate::Result<Input> {
    if path == STDIO {
        debug!("reading from stdin");
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)
        .map_err(|err| crate::Error::Open(path.to_owned(), err))?;
    debug!(path, "reading from file");
    Ok(Box::new(BufReader::new(file)))
}

/// Creates the file at `path` for buffered writing, or uses stdout for `-`.
pub fn open_output(path: &str) -> crate::Result<Output> {
    if path == STDIO {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = File::create(path)
        .map_err(|err| crate::Error::Open(path.to_owned(), err))?;
    debug!(path, "writing to file");
    Ok(Box::new(BufWriter::new(file)))
}
