use clap::{App, Arg, ArgMatches, SubCommand};

use bedline::{Assembly, ChromStyle, ChromTranslator, MissingChrom};

use super::{input_arg, map_records, output_arg, TEMPLATE_SUBCMD};

pub const NAME: &str = "convert-chr";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Converts chromosome names between the UCSC and Ensembl conventions")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED file or '-' for stdin"))
        .arg(output_arg())
        .arg(Arg::with_name("assembly")
                .long("assembly")
                .value_name("assembly")
                .help("Assembly of the input records")
                .takes_value(true)
                .possible_values(&["hg38", "mm10"])
                .required(true))
        .arg(Arg::with_name("target")
                .long("target")
                .value_name("convention")
                .help("Naming convention to convert to")
                .takes_value(true)
                .possible_values(&["ucsc", "ens"])
                .required(true))
        .arg(Arg::with_name("allow_missing")
                .short("a")
                .long("allow-missing")
                .help("Prints records with unknown chromosomes with NA as chromosome"))
        .arg(Arg::with_name("suppress_missing")
                .short("s")
                .long("suppress-missing")
                .help("Skips records with unknown chromosomes"))
        .arg(Arg::with_name("patches")
                .long("patches")
                .help("Also converts the names of patch scaffolds"))
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    let assembly = value_t!(args, "assembly", Assembly)?;
    let target = value_t!(args, "target", ChromStyle)?;
    let missing = MissingChrom::from_flags(
        args.is_present("allow_missing"), args.is_present("suppress_missing"))
        .map_err(bedline::Error::from)?;
    let translator = ChromTranslator::new(assembly, target, missing, args.is_present("patches"));
    map_records(args, |record| translator.translate(record))
}
