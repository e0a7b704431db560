/*! Conversion of GTF annotations into BED12 records.

Each transcript of the GTF file becomes one BED12 record. Only the `transcript`, `exon`, `CDS`,
`start_codon` and `stop_codon` features are used; everything else is ignored.

An unofficial specification of the format can be found [here](http://mblab.wustl.edu/GTF22.html).
*/
use std::cmp::{max, min};
use std::collections::HashMap;
use std::io;

use csv::StringRecord;
use linked_hash_map::LinkedHashMap;
use multimap::MultiMap;
use regex::Regex;
use tracing::{debug, info};

use crate::{BedBuilder, BedKind, BedRecord, Coord, Strand};
use crate::blocks::BlockChain;
use crate::consts::NA_STR;
use crate::io_bed::tsv_reader;


/// Name for transcript features.
const TRANSCRIPT_STR: &str = "transcript";

/// Name for exon features.
const EXON_STR: &str = "exon";

/// Name for CDS features.
const CDS_STR: &str = "CDS";

/// Name for start codon features.
const START_CODON_STR: &str = "start_codon";

/// Name for stop codon features.
const STOP_CODON_STR: &str = "stop_codon";

/// Name for attribute key of transcript identifiers.
const TRANSCRIPT_ID_STR: &str = "transcript_id";

/// Number of columns of a GTF row.
const GTF_WIDTH: usize = 9;

quick_error! {
    /// Errors that occur when converting GTF files.
    #[derive(Debug, Clone, PartialEq)]
    pub enum GtfError {
        /// Occurs when a row has less than 9 columns.
        MalformedRow(line: u64) {
            display("GTF row has less than {} columns, line: {}", GTF_WIDTH, line)
        }
        /// Occurs when the start or end column of a row is not a valid 1-based coordinate.
        InvalidCoordinate(line: u64) {
            display("GTF row has invalid coordinates, line: {}", line)
        }
        /// Occurs when a used feature has no transcript identifier attribute.
        MissingTranscriptId(line: u64) {
            display("transcript identifier attribute not found, line: {}", line)
        }
        /// Occurs when a transcript feature is not on the '+' or '-' strand.
        UnrecognizedStrand(tid: String) {
            display("transcript with unrecognized strand: {}", tid)
        }
        /// Occurs when a feature appears before the transcript feature it belongs to.
        MissingTranscript(tid: String) {
            display("no 'transcript' feature precedes the features of transcript: {}", tid)
        }
        /// Occurs when a feature is on a different strand than its transcript.
        StrandMismatch(feature: String, tid: String) {
            display("{} has different strand from parent transcript: {}", feature, tid)
        }
        /// Occurs when an exon starts before its transcript.
        ExonOutsideTranscript(tid: String) {
            display("exon starts before its parent transcript: {}", tid)
        }
        /// Occurs when a transcript has no exon features.
        MissingExons(tid: String) {
            display("transcript has no 'exon' features: {}", tid)
        }
    }
}

/// A transcript converted from GTF.
#[derive(Debug, Clone, PartialEq)]
pub struct GtfTranscript {
    record: BedRecord,
    extra: Vec<String>,
}

impl GtfTranscript {

    /// The BED12 record of the transcript.
    pub fn record(&self) -> &BedRecord {
        &self.record
    }

    /// Values of the requested extra attributes, in the requested order.
    pub fn extra(&self) -> &[String] {
        self.extra.as_slice()
    }

    pub fn into_parts(self) -> (BedRecord, Vec<String>) {
        (self.record, self.extra)
    }
}

/// Values taken from the transcript feature.
#[derive(Debug)]
struct TrxHead {
    chrom: String,
    coord: Coord<u64>,
    strand: Strand,
    extra: Vec<String>,
}

/// GTF to BED12 converter.
#[derive(Debug, Default)]
pub struct GtfConverter {
    extra_fields: Vec<String>,
}

impl GtfConverter {

    pub fn new() -> GtfConverter {
        GtfConverter::default()
    }

    /// Sets the converter to append the values of the given transcript attributes to each
    /// record.
    pub fn extra_fields<I, T>(&mut self, fields: I) -> &mut Self
        where I: IntoIterator<Item=T>, T: Into<String>
    {
        self.extra_fields = fields.into_iter()
            .map(|v| v.into())
            .filter(|v: &String| !v.is_empty())
            .collect();
        self
    }

    /// Reads all GTF rows and returns the transcripts in order of appearance.
    pub fn convert<R: io::Read>(&self, in_reader: R) -> crate::Result<Vec<GtfTranscript>> {
        let tid_regex = make_gtf_attr_regex(TRANSCRIPT_ID_STR)?;
        let extra_regexes = self.extra_fields.iter()
            .map(|field| make_gtf_attr_regex(field))
            .collect::<crate::Result<Vec<Regex>>>()?;

        let mut heads: LinkedHashMap<String, TrxHead> = LinkedHashMap::new();
        let mut exons: MultiMap<String, Coord<u64>> = MultiMap::new();
        let mut cds_coords: HashMap<String, Coord<u64>> = HashMap::new();

        let mut reader = tsv_reader(in_reader);
        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            if row.len() < GTF_WIDTH {
                return Err(crate::Error::from(GtfError::MalformedRow(line)));
            }
            let feature = &row[2];
            match feature {
                TRANSCRIPT_STR | EXON_STR | CDS_STR | START_CODON_STR | STOP_CODON_STR => {},
                _ => continue,
            }
            let tid = extract_attr(&tid_regex, &row[8])
                .ok_or(GtfError::MissingTranscriptId(line))?;
            let coord = parse_coord(&row, line)?;

            if feature == TRANSCRIPT_STR {
                let strand = match &row[6] {
                    "+" => Strand::Forward,
                    "-" => Strand::Reverse,
                    _ => return Err(crate::Error::from(GtfError::UnrecognizedStrand(tid))),
                };
                let extra = extra_regexes.iter()
                    .map(|re| extract_attr(re, &row[8]).unwrap_or_else(|| NA_STR.to_owned()))
                    .collect();
                let head = TrxHead { chrom: row[0].to_owned(), coord, strand, extra };
                let _ = heads.insert(tid, head);
                continue;
            }

            let head = heads.get(&tid)
                .ok_or_else(|| GtfError::MissingTranscript(tid.clone()))?;
            if row[6].trim() != crate::record::strand_str(head.strand) {
                return Err(crate::Error::from(
                    GtfError::StrandMismatch(feature.to_owned(), tid)));
            }
            if feature == EXON_STR {
                exons.insert(tid, coord);
            } else {
                let merged = cds_coords.get(&tid)
                    .map_or(coord, |&(s, e)| (min(s, coord.0), max(e, coord.1)));
                let _ = cds_coords.insert(tid, merged);
            }
        }

        let mut transcripts = Vec::with_capacity(heads.len());
        for (tid, head) in heads {
            let mut trx_exons = exons.remove(&tid)
                .ok_or_else(|| GtfError::MissingExons(tid.clone()))?;
            trx_exons.sort();
            let (start, end) = head.coord;

            let mut chain = BlockChain::new();
            for (exon_start, exon_end) in trx_exons {
                let rel_start = exon_start.checked_sub(start)
                    .ok_or_else(|| GtfError::ExonOutsideTranscript(tid.clone()))?;
                chain.push(rel_start, exon_end - exon_start);
            }
            let cds_coord = cds_coords.get(&tid).cloned().unwrap_or_else(|| {
                debug!(tid = tid.as_str(), "transcript has no coding features");
                (end, end)
            });

            let record = BedBuilder::new(head.chrom, start, end)
                .name(tid)
                .score("0")
                .strand(head.strand)
                .cds_coord(cds_coord)
                .color("0")
                .blocks(chain.finish())
                .build(BedKind::Bed12)?;
            transcripts.push(GtfTranscript { record, extra: head.extra });
        }
        info!(transcripts = transcripts.len(), "converted GTF transcripts");

        Ok(transcripts)
    }
}

/// Creates a regex that captures the value of the given GTF attribute.
fn make_gtf_attr_regex(attr_name: &str) -> crate::Result<Regex> {
    let pat = format!(r#"(?:^|[;\s]){attr_name} "?(?P<value>[^";]+)"?;?"#,
                      attr_name=regex::escape(attr_name));
    Regex::new(&pat).map_err(crate::Error::from)
}

#[inline]
fn extract_attr(re: &Regex, attrs: &str) -> Option<String> {
    re.captures(attrs)
        .and_then(|cap| cap.name("value"))
        .map(|v| v.as_str().trim().to_owned())
}

/// Parses the 1-based, fully-closed coordinates of a row into zero-based, half-open ones.
#[inline]
fn parse_coord(row: &StringRecord, line: u64) -> Result<Coord<u64>, GtfError> {
    let start = row[3].parse::<u64>().map_err(|_| GtfError::InvalidCoordinate(line))?;
    let end = row[4].parse::<u64>().map_err(|_| GtfError::InvalidCoordinate(line))?;
    if start == 0 || end < start {
        return Err(GtfError::InvalidCoordinate(line));
    }
    Ok((start - 1, end))
}
