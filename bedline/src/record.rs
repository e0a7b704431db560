/*! BED record model.

A BED record has 3, 4, 6 or 12 columns. [`BedBuilder`] is the only way of creating a
[`BedRecord`]: it is used both for records parsed from text columns and for records derived by
the transformations, so every record carries the same guarantees:

* `start <= end`
* for BED12, `start <= cds_start <= cds_end <= end`
* for BED12, one block length and one block start per block

All coordinates are zero-based, half-open.
*/
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::{Coord, Strand};
use crate::blocks::Blocks;
use crate::consts::{NO_NAME, STRAND_FORWARD, STRAND_REVERSE, UNK_STR};


quick_error! {
    /// Errors that occur when creating a record.
    #[derive(Debug, Clone, PartialEq)]
    pub enum BedError {
        /// Occurs when the number of columns is not 3, 4, 6 or 12.
        UnsupportedSchema(width: usize, name: String) {
            display("only BED3, BED4, BED6 and BED12 are supported, found {} columns, record: {}",
                    width, name)
        }
        /// Occurs when a coordinate or count column is not a non-negative integer.
        NotAnInteger(field: &'static str, name: String) {
            display("{} is not a non-negative integer, record: {}", field, name)
        }
        /// Occurs when the record or its coding region has inconsistent coordinates.
        InvalidRange(reason: &'static str, name: String) {
            display("{}, record: {}", reason, name)
        }
        /// Occurs when the strand column is not any of '+', '-', '.' or ''.
        InvalidStrand(value: String, name: String) {
            display("strand '{}' is not any of '+', '-', '.' or '', record: {}", value, name)
        }
        /// Occurs when the block columns are malformed or disagree with the block count.
        InvalidBlockList(reason: &'static str, name: String) {
            display("{}, record: {}", reason, name)
        }
    }
}

/// Schema of a BED record, i.e. its number of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BedKind {
    Bed3,
    Bed4,
    Bed6,
    Bed12,
}

impl BedKind {

    /// Returns the schema of a record with the given number of columns.
    pub fn from_width(width: usize) -> Option<BedKind> {
        match width {
            3 => Some(BedKind::Bed3),
            4 => Some(BedKind::Bed4),
            6 => Some(BedKind::Bed6),
            12 => Some(BedKind::Bed12),
            _ => None,
        }
    }

    /// Number of columns of the schema.
    pub fn width(&self) -> usize {
        match self {
            BedKind::Bed3 => 3,
            BedKind::Bed4 => 4,
            BedKind::Bed6 => 6,
            BedKind::Bed12 => 12,
        }
    }
}

/// A validated BED record.
///
/// Columns not present in the record's schema hold placeholder values and are not exposed by
/// the optional accessors.
#[derive(Debug, Clone)]
pub struct BedRecord {
    kind: BedKind,
    chrom: String,
    start: u64,
    end: u64,
    name: String,
    score: String,
    strand: Strand,
    cds_start: u64,
    cds_end: u64,
    color: String,
    blocks: Blocks,
}

impl BedRecord {

    /// Creates a record from its columns, validating all of them.
    ///
    /// The block columns may or may not carry their trailing comma.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<BedRecord, BedError> {
        let width = fields.len();
        let col = |idx: usize| column(fields, idx);
        let name = if width >= 4 { col(3) } else { NO_NAME };

        let kind = BedKind::from_width(width)
            .ok_or_else(|| BedError::UnsupportedSchema(width, name.to_owned()))?;

        let start = parse_int(col(1), "start", name)?;
        let end = parse_int(col(2), "end", name)?;
        let mut builder = BedBuilder::new(col(0), start, end);

        if kind >= BedKind::Bed4 {
            builder = builder.name(name);
        }
        if kind >= BedKind::Bed6 {
            builder = builder
                .score(col(4))
                .strand(parse_strand(col(5), name)?);
        }
        if kind == BedKind::Bed12 {
            let cds_start = parse_int(col(6), "cdsStart", name)?;
            let cds_end = parse_int(col(7), "cdsEnd", name)?;
            let count = col(9).parse::<usize>()
                .map_err(|_| BedError::NotAnInteger("blockCount", name.to_owned()))?;
            let blocks = Blocks::parse(count, col(10), col(11))
                .map_err(|reason| BedError::InvalidBlockList(reason, name.to_owned()))?;
            builder = builder
                .cds_coord((cds_start, cds_end))
                .color(col(8))
                .blocks(blocks);
        }

        builder.build(kind)
    }

    pub fn kind(&self) -> BedKind {
        self.kind
    }

    pub fn chrom(&self) -> &str {
        self.chrom.as_str()
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    #[inline]
    pub fn span(&self) -> u64 {
        self.end - self.start
    }

    /// Name of the record, or `NoName` for BED3 records.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Score column value, never interpreted.
    pub fn score(&self) -> Option<&str> {
        if self.kind >= BedKind::Bed6 {
            Some(self.score.as_str())
        } else {
            None
        }
    }

    /// Strand of the record; always `Unknown` for BED3 and BED4 records.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn is_stranded(&self) -> bool {
        match self.strand {
            Strand::Forward | Strand::Reverse => true,
            Strand::Unknown => false,
        }
    }

    pub fn cds_start(&self) -> u64 {
        self.cds_start
    }

    pub fn cds_end(&self) -> u64 {
        self.cds_end
    }

    /// Whether the record is a BED12 record with a non-empty coding region.
    pub fn has_cds(&self) -> bool {
        self.kind == BedKind::Bed12 && self.cds_start != self.cds_end
    }

    /// Coding region coordinates, if the record has any.
    pub fn cds_coord(&self) -> Option<Coord<u64>> {
        if self.has_cds() {
            Some((self.cds_start, self.cds_end))
        } else {
            None
        }
    }

    /// Color column value, never interpreted.
    pub fn color(&self) -> Option<&str> {
        if self.kind == BedKind::Bed12 {
            Some(self.color.as_str())
        } else {
            None
        }
    }

    /// Blocks of the record; empty unless the record is BED12.
    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Genomic start of the block at `idx`.
    pub fn block_genome_start(&self, idx: usize) -> Option<u64> {
        self.blocks.genome_offset_of(self.start, idx)
    }

    /// Returns the same record with only the chromosome name replaced.
    pub(crate) fn with_chrom<T: Into<String>>(mut self, chrom: T) -> BedRecord {
        self.chrom = chrom.into();
        self
    }

    /// Returns the columns of the record in BED order, as they are written.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.chrom.clone(),
            self.start.to_string(),
            self.end.to_string()];
        if self.kind >= BedKind::Bed4 {
            fields.push(self.name.clone());
        }
        if self.kind >= BedKind::Bed6 {
            fields.push(self.score.clone());
            fields.push(strand_str(self.strand).to_owned());
        }
        if self.kind == BedKind::Bed12 {
            fields.push(self.cds_start.to_string());
            fields.push(self.cds_end.to_string());
            fields.push(self.color.clone());
            fields.push(self.blocks.len().to_string());
            fields.push(self.blocks.lengths_field());
            fields.push(self.blocks.starts_field());
        }
        fields
    }

    /// Starts a builder that copies the descriptive columns of this record.
    pub(crate) fn derive(&self, start: u64, end: u64) -> BedBuilder {
        BedBuilder::new(self.chrom.as_str(), start, end)
            .name(self.name.as_str())
            .score(self.score.as_str())
            .strand(self.strand)
            .color(self.color.as_str())
    }
}

// `Strand::Unknown` never equals itself, so strands are compared by their column value.
impl PartialEq for BedRecord {
    fn eq(&self, other: &BedRecord) -> bool {
        self.kind == other.kind
            && self.chrom == other.chrom
            && self.start == other.start
            && self.end == other.end
            && self.name == other.name
            && self.score == other.score
            && strand_str(self.strand) == strand_str(other.strand)
            && self.cds_start == other.cds_start
            && self.cds_end == other.cds_end
            && self.color == other.color
            && self.blocks == other.blocks
    }
}

impl fmt::Display for BedRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_fields().iter().join("\t"))
    }
}

impl FromStr for BedRecord {
    type Err = BedError;

    /// Parses a single tab-separated line.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields = line.trim_end_matches(|c| c == '\n' || c == '\r')
            .split('\t')
            .collect::<Vec<&str>>();
        BedRecord::from_fields(&fields)
    }
}

/// Validating constructor of records.
pub struct BedBuilder {
    chrom: String,
    start: u64,
    end: u64,
    name: Option<String>,
    score: Option<String>,
    strand: Option<Strand>,
    cds_coord: Option<Coord<u64>>,
    color: Option<String>,
    blocks: Option<Blocks>,
}

impl BedBuilder {

    pub fn new<T>(chrom: T, start: u64, end: u64) -> Self
        where T: Into<String>
    {
        BedBuilder {
            chrom: chrom.into(),
            start,
            end,
            name: None,
            score: None,
            strand: None,
            cds_coord: None,
            color: None,
            blocks: None,
        }
    }

    pub fn name<T>(mut self, name: T) -> Self
        where T: Into<String>
    {
        self.name = Some(name.into());
        self
    }

    pub fn score<T>(mut self, score: T) -> Self
        where T: Into<String>
    {
        self.score = Some(score.into());
        self
    }

    pub fn strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    pub fn cds_coord(mut self, coord: Coord<u64>) -> Self {
        self.cds_coord = Some(coord);
        self
    }

    pub fn color<T>(mut self, color: T) -> Self
        where T: Into<String>
    {
        self.color = Some(color.into());
        self
    }

    pub fn blocks(mut self, blocks: Blocks) -> Self {
        self.blocks = Some(blocks);
        self
    }

    /// Validates the collected values and creates a record of the given schema.
    ///
    /// Values of columns outside the schema are discarded.
    pub fn build(self, kind: BedKind) -> Result<BedRecord, BedError> {
        let name = match self.name {
            Some(name) if kind >= BedKind::Bed4 => name,
            _ => NO_NAME.to_owned(),
        };
        if self.start > self.end {
            return Err(BedError::InvalidRange("start is greater than end", name));
        }

        let (score, strand) =
            if kind >= BedKind::Bed6 {
                (self.score.unwrap_or_else(|| "0".to_owned()),
                 self.strand.unwrap_or(Strand::Unknown))
            } else {
                (String::new(), Strand::Unknown)
            };

        let (cds_start, cds_end, color, blocks) =
            if kind == BedKind::Bed12 {
                let (cds_start, cds_end) = self.cds_coord.unwrap_or((self.end, self.end));
                if cds_start > cds_end {
                    return Err(BedError::InvalidRange("cdsStart is greater than cdsEnd", name));
                }
                if cds_start < self.start || cds_end > self.end {
                    return Err(BedError::InvalidRange(
                        "the coding region lies outside the record", name));
                }
                let span = self.end - self.start;
                let blocks = self.blocks.unwrap_or_else(|| Blocks::single(span));
                if !blocks.fit_within(span) {
                    return Err(BedError::InvalidBlockList(
                        "blocks extend past the end of the record", name));
                }
                (cds_start, cds_end, self.color.unwrap_or_else(|| "0".to_owned()), blocks)
            } else {
                (self.start, self.start, String::new(), Blocks::default())
            };

        Ok(BedRecord {
            kind,
            chrom: self.chrom,
            start: self.start,
            end: self.end,
            name,
            score,
            strand,
            cds_start,
            cds_end,
            color,
            blocks,
        })
    }
}

/// Parses a strand column value.
pub(crate) fn parse_strand(value: &str, name: &str) -> Result<Strand, BedError> {
    match value {
        STRAND_FORWARD => Ok(Strand::Forward),
        STRAND_REVERSE => Ok(Strand::Reverse),
        UNK_STR | "" => Ok(Strand::Unknown),
        otherwise => Err(BedError::InvalidStrand(otherwise.to_owned(), name.to_owned())),
    }
}

/// Strand column value of the given strand.
pub(crate) fn strand_str(strand: Strand) -> &'static str {
    match strand {
        Strand::Forward => STRAND_FORWARD,
        Strand::Reverse => STRAND_REVERSE,
        Strand::Unknown => UNK_STR,
    }
}

#[inline]
fn column<S: AsRef<str>>(fields: &[S], idx: usize) -> &str {
    fields[idx].as_ref()
}

#[inline]
fn parse_int(value: &str, field: &'static str, name: &str) -> Result<u64, BedError> {
    value.parse::<u64>()
        .map_err(|_| BedError::NotAnInteger(field, name.to_owned()))
}
