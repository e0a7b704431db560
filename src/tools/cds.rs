use clap::{App, Arg, ArgMatches, SubCommand};

use super::{input_arg, map_records, output_arg, TEMPLATE_SUBCMD};

pub const NAME: &str = "cds";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Prints the coding region of coding transcripts")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED12 file or '-' for stdin"))
        .arg(output_arg())
        .arg(Arg::with_name("ignore_cds_only")
                .long("ignore-cds-only")
                .help("Skips transcripts that are entirely coding"))
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    let ignore_cds_only = args.is_present("ignore_cds_only");
    map_records(args, |record| record.cds(ignore_cds_only))
}
