use clap::{App, Arg, ArgMatches, SubCommand};

use bedline::ExonSelection;

use super::{input_arg, map_records, output_arg, TEMPLATE_SUBCMD};

pub const NAME: &str = "bed12-to-bed6";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Splits BED12 records into one BED6 record per exon")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED12 file or '-' for stdin"))
        .arg(output_arg())
        .arg(Arg::with_name("append_exon_number")
                .short("n")
                .long("append-exon-number")
                .help("Appends the exon number, in genomic order, to the record name"))
        .arg(Arg::with_name("which")
                .short("w")
                .long("which")
                .value_name("exons")
                .help("Exons to print; first and last follow the strand of the transcript")
                .takes_value(true)
                .possible_values(&["all", "first", "last"])
                .default_value("all"))
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    let append_index = args.is_present("append_exon_number");
    let which = match args.value_of("which") {
        Some("first") => ExonSelection::First,
        Some("last") => ExonSelection::Last,
        _ => ExonSelection::All,
    };
    map_records(args, |record| record.block_split(append_index, which))
}
