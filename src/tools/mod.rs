//! Functions invoked by the subcommands.

use clap::{Arg, ArgMatches};
use tracing::info;

use bedline::{BedReader, BedRecord, BedWriter};

use crate::utils::{open_input, open_output, Input, Output};

pub mod utr;
pub mod cds;
pub mod promoter;
pub mod introns;
pub mod bed12_to_bed6;
pub mod convert_chr;
pub mod validate;
pub mod filter;
pub mod join;
pub mod gtf_to_bed;

const TEMPLATE_SUBCMD: &str = "
USAGE:
    {usage}

ARGS:
{positionals}

OPTIONS:
{unified}";

/// Positional input argument shared by all subcommands.
fn input_arg<'a, 'b>(help: &'b str) -> Arg<'a, 'b> {
    Arg::with_name("input")
        .value_name("input")
        .help(help)
        .takes_value(true)
        .default_value("-")
}

/// Output argument shared by all subcommands.
fn output_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("output")
        .short("o")
        .long("output")
        .value_name("output")
        .help("Path to output file or '-' for stdout")
        .takes_value(true)
        .default_value("-")
}

/// Annotation file arguments of the filter and join subcommands.
fn annotation_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("annotation")
            .short("a")
            .long("annotation")
            .value_name("file")
            .help("Path to the tab-separated annotation file")
            .takes_value(true)
            .required(true),
        Arg::with_name("column")
            .short("c")
            .long("column")
            .value_name("N")
            .help("1-based column of the annotation file holding the record names")
            .takes_value(true)
            .default_value("1"),
    ]
}

/// Opens the input and output of the subcommand.
fn resolve_io(args: &ArgMatches) -> crate::Result<(BedReader<Input>, BedWriter<Output>)> {
    let input = open_input(args.value_of("input").unwrap_or("-"))?;
    let output = open_output(args.value_of("output").unwrap_or("-"))?;
    Ok((BedReader::from_reader(input), BedWriter::from_writer(output)))
}

/// Writes every record derived from the validated input records.
///
/// The first invalid record aborts the run.
fn map_records<F, I>(args: &ArgMatches, mut derive: F) -> crate::Result<()>
    where F: FnMut(BedRecord) -> bedline::Result<I>,
          I: IntoIterator<Item=BedRecord>
{
    let (mut reader, mut writer) = resolve_io(args)?;
    let (mut n_read, mut n_written) = (0usize, 0usize);
    for result in reader.records() {
        let record = result?;
        n_read += 1;
        for derived in derive(record)? {
            writer.write_record(&derived)?;
            n_written += 1;
        }
    }
    writer.flush()?;
    info!(read = n_read, written = n_written, "done");
    Ok(())
}
