use clap::{App, Arg, ArgMatches, SubCommand};

use bedline::{BedWriter, GtfConverter};

use crate::utils::{open_input, open_output};

use super::{input_arg, output_arg, TEMPLATE_SUBCMD};

pub const NAME: &str = "gtf-to-bed";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Converts the transcripts of a GTF file to BED12")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input GTF file or '-' for stdin"))
        .arg(output_arg())
        .arg(Arg::with_name("extra_fields")
                .long("extra-fields")
                .value_name("attributes")
                .help("Comma-separated transcript attributes appended as extra columns")
                .takes_value(true))
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    let mut converter = GtfConverter::new();
    if let Some(fields) = args.value_of("extra_fields") {
        let _ = converter.extra_fields(fields.split(','));
    }
    let input = open_input(args.value_of("input").unwrap_or("-"))?;
    let output = open_output(args.value_of("output").unwrap_or("-"))?;
    let mut writer = BedWriter::from_writer(output);
    for transcript in converter.convert(input)? {
        writer.write_record_with(transcript.record(), transcript.extra())?;
    }
    writer.flush()?;
    Ok(())
}
