/*! Validated BED records and the block-aware interval operations derived from them.

A [`BedRecord`] is built from the columns of a BED3, BED4, BED6 or BED12 line and is checked
against the invariants of its schema on construction. Every operation that derives a new record
(promoters, UTRs, CDS, introns, single exons) goes through the same validating constructor.
*/
#![deny(unsafe_code, unstable_features)]
#![warn(
        trivial_casts, trivial_numeric_casts,
        unused_import_braces, unused_qualifications,
        unused_results)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate quick_error;

use std::io;

pub use bio_types::strand::Strand;
use csv::Error as CsvError;
use regex::Error as RegexError;

mod blocks;
pub use crate::blocks::{Block, Blocks};

mod record;
pub use crate::record::{BedBuilder, BedError, BedKind, BedRecord};

mod transform;
pub use crate::transform::{ExonSelection, TransformError, UtrEnd};

mod chrom;
pub use crate::chrom::{Assembly, ChromError, ChromStyle, ChromTranslator, MissingChrom};

mod io_bed;
pub use crate::io_bed::{Reader as BedReader, Writer as BedWriter,
                        BedRecordsStream, BedRawRows};

mod gtf;
pub use crate::gtf::{GtfConverter, GtfError, GtfTranscript};

mod annotation;
pub use crate::annotation::{Annotation, AnnotationError};


quick_error! {
    #[derive(Debug)]
    pub enum Error {
        Bed(err: BedError) {
            display("{}", err)
            from()
            source(err)
        }
        Transform(err: TransformError) {
            display("{}", err)
            from()
            source(err)
        }
        Chrom(err: ChromError) {
            display("{}", err)
            from()
            source(err)
        }
        Gtf(err: GtfError) {
            display("{}", err)
            from()
            source(err)
        }
        Annotation(err: AnnotationError) {
            display("{}", err)
            from()
            source(err)
        }
        Regex(err: RegexError) {
            display("{}", err)
            from()
            source(err)
        }
        Csv(err: CsvError) {
            display("{}", err)
            from()
            source(err)
        }
        Io(err: io::Error) {
            display("{}", err)
            from()
            source(err)
        }
    }
}

impl Error {

    /// Whether the error comes from writing into a closed pipe.
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            Error::Io(err) => err.kind() == io::ErrorKind::BrokenPipe,
            Error::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(ioerr) => ioerr.kind() == io::ErrorKind::BrokenPipe,
                _ => false,
            },
            _ => false,
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Helper type for raw half-open coordinates.
pub type Coord<T> = (T, T);

// Crate-wide constants
mod consts {
    // Name given to records whose schema has no name column.
    pub(crate) const NO_NAME: &str = "NoName";

    // Values written by the serializer.
    pub(crate) const STRAND_FORWARD: &str = "+";
    pub(crate) const STRAND_REVERSE: &str = "-";
    pub(crate) const UNK_STR: &str = ".";

    // Separator of block-list fields.
    pub(crate) const BLOCK_SEP: char = ',';

    // Placeholder for missing chromosome names and annotation values.
    pub(crate) const NA_STR: &str = "NA";
}
