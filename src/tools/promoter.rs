use clap::{App, Arg, ArgMatches, SubCommand};

use super::{input_arg, map_records, output_arg, TEMPLATE_SUBCMD};

pub const NAME: &str = "promoter";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Prints the promoter region of each record as BED4")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED file or '-' for stdin"))
        .arg(output_arg())
        .arg(Arg::with_name("up")
                .long("up")
                .value_name("N")
                .help("Number of bases upstream of the 5' end")
                .takes_value(true)
                .default_value("500"))
        .arg(Arg::with_name("down")
                .long("down")
                .value_name("N")
                .help("Number of bases downstream of the 5' end")
                .takes_value(true)
                .default_value("500"))
        .arg(Arg::with_name("unstranded")
                .long("unstranded")
                .help("Uses the start coordinate as the 5' end regardless of strand"))
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    let up = value_t!(args, "up", u64)?;
    let down = value_t!(args, "down", u64)?;
    let use_strand = !args.is_present("unstranded");
    map_records(args, |record| record.promoter(up, down, use_strand).map(Some))
}
