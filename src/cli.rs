use clap::{App, AppSettings, Arg, ArgMatches};

use bedline::UtrEnd;

use crate::tools;

const TEMPLATE: &str = "
{bin} {version}
{about}


USAGE:
    {usage}

SUBCOMMANDS:
{subcommands}

OPTIONS:
{unified}";

const ABOUT: &str = "
bedlinetools is a collection of tools for validating BED files and deriving
promoters, UTRs, coding regions, introns and exons from their records.";

/// Constructs a new `clap::App` for argument parsing.
pub fn build_cli() -> App<'static, 'static> {
    App::new("bedlinetools")
        .version(crate_version!())
        .author(crate_authors!())
        .about(ABOUT)
        .template(TEMPLATE)
        .max_term_width(80)
        .settings(&[AppSettings::GlobalVersion,
                    AppSettings::SubcommandRequiredElseHelp,
                    AppSettings::DisableHelpSubcommand,
                    AppSettings::VersionlessSubcommands])
        .arg(Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increases logging verbosity, may be repeated")
                .multiple(true)
                .global(true))
        .subcommand(tools::utr::build_cli(UtrEnd::Three))
        .subcommand(tools::utr::build_cli(UtrEnd::Five))
        .subcommand(tools::cds::build_cli())
        .subcommand(tools::promoter::build_cli())
        .subcommand(tools::introns::build_cli())
        .subcommand(tools::bed12_to_bed6::build_cli())
        .subcommand(tools::convert_chr::build_cli())
        .subcommand(tools::validate::build_cli())
        .subcommand(tools::filter::build_cli())
        .subcommand(tools::join::build_cli())
        .subcommand(tools::gtf_to_bed::build_cli())
}

/// Number of `-v` flags given before or after the subcommand.
pub fn verbosity(matches: &ArgMatches) -> u64 {
    let sub = matches.subcommand().1
        .map_or(0, |m| m.occurrences_of("verbose"));
    matches.occurrences_of("verbose").max(sub)
}

/// Runs the appropriate tool given the subcommand argument matches.
pub fn run(matches: &ArgMatches) -> crate::Result<()> {
    match matches.subcommand() {
        (tools::utr::NAME_3P, Some(m)) => tools::utr::run(m, UtrEnd::Three),
        (tools::utr::NAME_5P, Some(m)) => tools::utr::run(m, UtrEnd::Five),
        (tools::cds::NAME, Some(m)) => tools::cds::run(m),
        (tools::promoter::NAME, Some(m)) => tools::promoter::run(m),
        (tools::introns::NAME, Some(m)) => tools::introns::run(m),
        (tools::bed12_to_bed6::NAME, Some(m)) => tools::bed12_to_bed6::run(m),
        (tools::convert_chr::NAME, Some(m)) => tools::convert_chr::run(m),
        (tools::validate::NAME, Some(m)) => tools::validate::run(m),
        (tools::filter::NAME, Some(m)) => tools::filter::run(m),
        (tools::join::NAME, Some(m)) => tools::join::run(m),
        (tools::gtf_to_bed::NAME, Some(m)) => tools::gtf_to_bed::run(m),
        // Subcommands are required by the app settings.
        (other, _) => Err(crate::Error::from(clap::Error::with_description(
            &format!("unexpected subcommand: {}", other), clap::ErrorKind::InvalidSubcommand))),
    }
}
