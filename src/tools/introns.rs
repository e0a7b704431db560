use clap::{App, ArgMatches, SubCommand};

use super::{input_arg, map_records, output_arg, TEMPLATE_SUBCMD};

pub const NAME: &str = "introns";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Prints the introns of each transcript as a single BED12 record")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED12 file or '-' for stdin"))
        .arg(output_arg())
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    map_records(args, |record| record.introns())
}
