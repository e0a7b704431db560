//! Translation of chromosome names between the UCSC and Ensembl naming conventions.
//!
//! The tables are embedded in the library and parsed once. A translator merges the base table of
//! an assembly with its patch table into its own map, leaving the shared tables untouched.
use std::collections::HashMap;
use std::str::FromStr;

use tracing::debug;

use crate::BedRecord;
use crate::consts::NA_STR;


quick_error! {
    /// Errors that occur when translating chromosome names.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ChromError {
        /// Occurs when both missing-name policies are requested.
        ConflictingOptions {
            display("only one of allowing and suppressing missing chromosomes may be set")
        }
        /// Occurs when a chromosome name is not present in the translation table.
        UnknownChromosome(chrom: String, name: String) {
            display("chromosome {} can not be found in the translation table, record: {}",
                    chrom, name)
        }
        /// Occurs when the assembly name is not supported.
        UnsupportedAssembly(value: String) {
            display("unsupported assembly: {}", value)
        }
        /// Occurs when the naming convention is not supported.
        UnsupportedStyle(value: String) {
            display("unsupported chromosome naming convention: {}", value)
        }
    }
}

/// Genome assemblies with translation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assembly {
    Hg38,
    Mm10,
}

impl FromStr for Assembly {
    type Err = ChromError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hg38" => Ok(Assembly::Hg38),
            "mm10" => Ok(Assembly::Mm10),
            otherwise => Err(ChromError::UnsupportedAssembly(otherwise.to_owned())),
        }
    }
}

/// Chromosome naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromStyle {
    /// `chr1`, `chrM`, `chrUn_GL000195v1`, ...
    Ucsc,
    /// `1`, `MT`, `GL000195.1`, ...
    Ensembl,
}

impl FromStr for ChromStyle {
    type Err = ChromError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ucsc" => Ok(ChromStyle::Ucsc),
            "ens" | "ensembl" => Ok(ChromStyle::Ensembl),
            otherwise => Err(ChromError::UnsupportedStyle(otherwise.to_owned())),
        }
    }
}

/// What to do with records whose chromosome is not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingChrom {
    /// Return an error.
    Fail,
    /// Keep the record, with `NA` as its chromosome.
    SetNa,
    /// Drop the record.
    Drop,
}

impl MissingChrom {

    /// Resolves the policy from the allow-missing and suppress-missing switches.
    pub fn from_flags(set_na: bool, drop: bool) -> Result<MissingChrom, ChromError> {
        match (set_na, drop) {
            (true, true) => Err(ChromError::ConflictingOptions),
            (true, false) => Ok(MissingChrom::SetNa),
            (false, true) => Ok(MissingChrom::Drop),
            (false, false) => Ok(MissingChrom::Fail),
        }
    }
}

/// Pairs of Ensembl and UCSC names.
struct ChromTable {
    pairs: Vec<(&'static str, &'static str)>,
}

impl ChromTable {

    fn parse(raw: &'static str) -> ChromTable {
        let pairs = raw.lines()
            .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
            .filter_map(|line| {
                let mut cols = line.split('\t');
                match (cols.next(), cols.next()) {
                    (Some(ens), Some(ucsc)) => Some((ens.trim(), ucsc.trim())),
                    _ => None,
                }
            })
            .collect();
        ChromTable { pairs }
    }

    fn extend_map(&self, map: &mut HashMap<String, String>, target: ChromStyle) {
        for &(ens, ucsc) in self.pairs.iter() {
            let (from, to) = match target {
                ChromStyle::Ucsc => (ens, ucsc),
                ChromStyle::Ensembl => (ucsc, ens),
            };
            let _ = map.insert(from.to_owned(), to.to_owned());
        }
    }
}

lazy_static! {
    static ref HG38: ChromTable =
        ChromTable::parse(include_str!("../data/chrnames/hg38.tsv"));
    static ref HG38_PATCHES: ChromTable =
        ChromTable::parse(include_str!("../data/chrnames/hg38_patches.tsv"));
    static ref MM10: ChromTable =
        ChromTable::parse(include_str!("../data/chrnames/mm10.tsv"));
    static ref MM10_PATCHES: ChromTable =
        ChromTable::parse(include_str!("../data/chrnames/mm10_patches.tsv"));
}

/// Translates the chromosome names of records.
#[derive(Debug, Clone)]
pub struct ChromTranslator {
    names: HashMap<String, String>,
    missing: MissingChrom,
}

impl ChromTranslator {

    /// Creates a translator into the `target` convention for the given assembly.
    ///
    /// If `patches` is set, patch scaffold names are translated as well.
    pub fn new(assembly: Assembly, target: ChromStyle, missing: MissingChrom, patches: bool)
        -> ChromTranslator
    {
        let (base, overlay): (&ChromTable, &ChromTable) = match assembly {
            Assembly::Hg38 => (&HG38, &HG38_PATCHES),
            Assembly::Mm10 => (&MM10, &MM10_PATCHES),
        };
        let mut names = HashMap::new();
        base.extend_map(&mut names, target);
        if patches {
            overlay.extend_map(&mut names, target);
        }
        ChromTranslator { names, missing }
    }

    /// Returns the translated name of the given chromosome, if known.
    pub fn lookup(&self, chrom: &str) -> Option<&str> {
        self.names.get(chrom).map(|v| v.as_str())
    }

    /// Returns the record with its chromosome name translated.
    ///
    /// Nothing is returned when the chromosome is unknown and the policy is to drop the record.
    pub fn translate(&self, record: BedRecord) -> crate::Result<Option<BedRecord>> {
        if let Some(chrom) = self.lookup(record.chrom()) {
            let chrom = chrom.to_owned();
            return Ok(Some(record.with_chrom(chrom)));
        }
        match self.missing {
            MissingChrom::SetNa => Ok(Some(record.with_chrom(NA_STR))),
            MissingChrom::Drop => {
                debug!(chrom = record.chrom(), name = record.name(), "dropping record");
                Ok(None)
            },
            MissingChrom::Fail => Err(crate::Error::from(ChromError::UnknownChromosome(
                record.chrom().to_owned(), record.name().to_owned()))),
        }
    }
}

impl BedRecord {

    /// Returns the record with its chromosome name translated into the `target` convention.
    ///
    /// This builds the translation table on every call; use a [`ChromTranslator`] for many
    /// records.
    pub fn translate_chrom(self, assembly: Assembly, target: ChromStyle, missing: MissingChrom,
                           patches: bool)
        -> crate::Result<Option<BedRecord>>
    {
        ChromTranslator::new(assembly, target, missing, patches).translate(self)
    }
}
