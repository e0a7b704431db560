use clap::{App, Arg, ArgMatches, SubCommand};
use tracing::info;

use bedline::BedRecord;

use super::{input_arg, output_arg, resolve_io, TEMPLATE_SUBCMD};

pub const NAME: &str = "validate";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Checks every record and prints it in canonical form")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED file or '-' for stdin"))
        .arg(output_arg())
        .arg(Arg::with_name("fix_separators")
                .short("f")
                .long("fix-separators")
                .help("Splits columns on runs of any whitespace instead of single tabs"))
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    let fix_separators = args.is_present("fix_separators");
    let (mut reader, mut writer) = resolve_io(args)?;
    let mut n_records = 0usize;
    for result in reader.raw_rows() {
        let row = result?;
        let line;
        let fields =
            if fix_separators {
                line = row.iter().collect::<Vec<&str>>().join("\t");
                line.split_whitespace().collect::<Vec<&str>>()
            } else {
                row.iter().collect::<Vec<&str>>()
            };
        let record = BedRecord::from_fields(&fields).map_err(bedline::Error::from)?;
        writer.write_record(&record)?;
        n_records += 1;
    }
    writer.flush()?;
    info!(records = n_records, "all records are valid");
    Ok(())
}
