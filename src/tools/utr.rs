use clap::{App, ArgMatches, SubCommand};

use bedline::UtrEnd;

use super::{input_arg, map_records, output_arg, TEMPLATE_SUBCMD};

pub const NAME_3P: &str = "3putr";

pub const NAME_5P: &str = "5putr";


pub fn build_cli<'a, 'b>(which: UtrEnd) -> App<'a, 'b> {
    let (name, about) = match which {
        UtrEnd::Five => (NAME_5P, "Prints the 5' UTR of coding transcripts"),
        UtrEnd::Three => (NAME_3P, "Prints the 3' UTR of coding transcripts"),
    };
    SubCommand::with_name(name)
        .about(about)
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED12 file or '-' for stdin"))
        .arg(output_arg())
}

pub fn run(args: &ArgMatches, which: UtrEnd) -> crate::Result<()> {
    map_records(args, |record| record.utr(which))
}
