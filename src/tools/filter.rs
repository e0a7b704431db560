use clap::{App, Arg, ArgMatches, SubCommand};
use tracing::info;

use bedline::Annotation;

use super::{annotation_args, input_arg, output_arg, resolve_io, TEMPLATE_SUBCMD};

pub const NAME: &str = "filter";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Keeps the records whose name is present in a column of an annotation file")
        .template(TEMPLATE_SUBCMD)
        .arg(input_arg("Path to input BED file or '-' for stdin"))
        .arg(output_arg())
        .args(&annotation_args())
        .arg(Arg::with_name("inverse")
                .long("inverse")
                .help("Keeps the records whose name is not present instead"))
}

pub fn run(args: &ArgMatches) -> crate::Result<()> {
    let column = value_t!(args, "column", usize)?;
    let annot = Annotation::from_file(args.value_of("annotation").unwrap_or_default(), column)?;
    let inverse = args.is_present("inverse");

    let (mut reader, mut writer) = resolve_io(args)?;
    let mut n_kept = 0usize;
    for result in reader.raw_rows() {
        let row = result?;
        let matched = row.get(3).map_or(false, |name| annot.contains(name));
        if matched != inverse {
            writer.write_fields(&row)?;
            n_kept += 1;
        }
    }
    writer.flush()?;
    info!(kept = n_kept, "done");
    Ok(())
}
