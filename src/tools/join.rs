use clap::{App, Arg, ArgMatches, SubCommand};
use tracing::{debug, info};

use bedline::Annotation;

use super::{annotation_args, input_arg, output_arg, resolve_io, TEMPLATE_SUBCMD};

pub const NAME: &str = "join";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Appends the columns of an annotation file to the records, matching by name")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED file or '-' for stdin"))
        .arg(output_arg())
        .args(&annotation_args())
        .arg(Arg::with_name("empty")
                .short("e")
                .long("empty")
                .value_name("value")
                .help("Value appended to records without annotation")
                .takes_value(true)
                .default_value("NA"))
        .arg(Arg::with_name("no_unmatched")
                .short("n")
                .long("no-unmatched")
                .help("Skips records without annotation"))
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    let column = value_t!(args, "column", usize)?;
    let annot = Annotation::from_file(args.value_of("annotation").unwrap_or_default(), column)?;
    let empty = args.value_of("empty").unwrap_or("NA");
    let no_unmatched = args.is_present("no_unmatched");

    let (mut reader, mut writer) = resolve_io(args)?;
    let (mut n_matched, mut n_unmatched) = (0usize, 0usize);
    for result in reader.raw_rows() {
        let row = result?;
        let mut fields = row.iter().collect::<Vec<&str>>();
        match row.get(3).and_then(|name| annot.get(name)) {
            Some(extra) => {
                fields.extend(extra.iter().map(|v| v.as_str()));
                n_matched += 1;
            },
            None if no_unmatched => {
                debug!(name = ?row.get(3), "skipping record without annotation");
                continue;
            },
            None => {
                fields.push(empty);
                n_unmatched += 1;
            },
        }
        writer.write_fields(&fields)?;
    }
    writer.flush()?;
    info!(matched = n_matched, unmatched = n_unmatched, "done");
    Ok(())
}
