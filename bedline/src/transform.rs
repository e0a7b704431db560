/*! Records derived from other records.

All derived records are created through [`BedBuilder`](crate::BedBuilder), so they are validated
exactly like parsed records. Operations that may legitimately produce nothing (a transcript
without a 5'UTR, a single-exon transcript without introns) return `Ok(None)`; errors are reserved
for records that can not be used with the operation.
*/
use tracing::debug;

use crate::{BedBuilder, BedKind, BedRecord, Strand};
use crate::blocks::{Blocks, BlockChain};
use crate::record::BedError;


quick_error! {
    /// Errors that occur when deriving records.
    #[derive(Debug, Clone, PartialEq)]
    pub enum TransformError {
        /// Occurs when an operation that needs a strand is called on an unstranded record.
        UnstrandedOperation(op: &'static str, name: String) {
            display("{} requires a stranded record, record: {}", op, name)
        }
        /// Occurs when a transcript coordinate lies outside of the transcript.
        CoordinateOutOfRange(coord: i64, len: u64, name: String) {
            display("coordinate {} does not exist in a transcript of length {}, record: {}",
                    coord, len, name)
        }
        /// Occurs when an operation requires a different schema.
        WrongSchema(op: &'static str, name: String) {
            display("{} is only supported for BED12 records, record: {}", op, name)
        }
    }
}

/// Which of the two untranslated regions to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtrEnd {
    Five,
    Three,
}

/// Which blocks to keep when splitting a record into its blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExonSelection {
    All,
    /// The block closest to the transcription start site.
    First,
    /// The block farthest from the transcription start site.
    Last,
}

/// Genomic side of the coding region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl BedRecord {

    /// Returns the promoter region of the record as a BED4 record.
    ///
    /// The region spans `upstream` bases before and `downstream` bases after the 5' end of the
    /// record. When `use_strand` is false, the start coordinate is treated as the 5' end. The
    /// start is clipped at 0; the end is not clipped.
    pub fn promoter(&self, upstream: u64, downstream: u64, use_strand: bool)
        -> crate::Result<BedRecord>
    {
        let window = match self.strand() {
            _ if !use_strand => forward_window(self.start(), upstream, downstream),
            Strand::Forward => forward_window(self.start(), upstream, downstream),
            Strand::Reverse => self.end().checked_add(upstream)
                .map(|end| (self.end().saturating_sub(downstream), end)),
            Strand::Unknown => return Err(self.unstranded("promoter")),
        };
        let (start, end) = window.ok_or_else(|| BedError::InvalidRange(
            "the promoter extends past the largest coordinate", self.name().to_owned()))?;
        BedBuilder::new(self.chrom(), start, end)
            .name(self.name())
            .build(BedKind::Bed4)
            .map_err(crate::Error::from)
    }

    /// Returns the 5' or 3' untranslated region of the record.
    ///
    /// Nothing is returned for records without a coding region, for records that are entirely
    /// coding, and when the requested region is empty.
    pub fn utr(&self, which: UtrEnd) -> crate::Result<Option<BedRecord>> {
        self.require_coding("utr")?;
        if !self.has_cds() || (self.cds_start() == self.start() && self.cds_end() == self.end()) {
            debug!(name = self.name(), "no untranslated region");
            return Ok(None);
        }
        let side = match (self.strand(), which) {
            (Strand::Forward, UtrEnd::Five) | (Strand::Reverse, UtrEnd::Three) => Side::Left,
            _ => Side::Right,
        };
        let coords = match side {
            Side::Left => self.left_utr(),
            Side::Right => self.right_utr(),
        };
        match coords {
            Some((start, end, blocks)) if start != end => {
                self.derive(start, end)
                    .cds_coord((start, start))
                    .blocks(blocks)
                    .build(BedKind::Bed12)
                    .map(Some)
                    .map_err(crate::Error::from)
            },
            _ => Ok(None),
        }
    }

    /// Untranslated region on the left of the coding region.
    fn left_utr(&self) -> Option<(u64, u64, Blocks)> {
        if self.start() == self.cds_start() {
            return None;
        }
        let rel_end = self.cds_start() - self.start();
        let mut chain = BlockChain::new();
        for block in self.blocks() {
            if rel_end <= block.end() {
                if rel_end > block.start() {
                    chain.push(block.start(), rel_end - block.start());
                }
                break;
            }
            chain.push(block.start(), block.len());
        }
        // The end is taken from the blocks and not from the coding start, as the coding region
        // may begin exactly at the start of a block.
        let end = self.start() + chain.last()?.end();
        Some((self.start(), end, chain.finish()))
    }

    /// Untranslated region on the right of the coding region.
    fn right_utr(&self) -> Option<(u64, u64, Blocks)> {
        if self.end() == self.cds_end() {
            return None;
        }
        let mut rel_start = self.cds_end() - self.start();
        let blocks = self.blocks().as_slice();
        let mut chain = BlockChain::new();
        for (idx, block) in blocks.iter().enumerate() {
            if rel_start > block.end() {
                continue;
            } else if rel_start == block.end() {
                // Skip to the next block instead of emitting an empty leading block.
                rel_start = blocks.get(idx + 1)?.start();
            } else if block.start() <= rel_start {
                chain.push(0, block.end() - rel_start);
            } else {
                chain.push(block.start() - rel_start, block.len());
            }
        }
        let extent = chain.last()?.end();
        let start = self.end().checked_sub(extent)?;
        Some((start, self.end(), chain.finish()))
    }

    /// Returns the coding region of the record.
    ///
    /// Nothing is returned for records without a coding region, or, if `ignore_cds_only` is set,
    /// for records that are entirely coding.
    pub fn cds(&self, ignore_cds_only: bool) -> crate::Result<Option<BedRecord>> {
        self.require_coding("cds")?;
        let (cds_start, cds_end) = match self.cds_coord() {
            Some(coord) => coord,
            None => {
                debug!(name = self.name(), "no coding region");
                return Ok(None);
            },
        };
        if ignore_cds_only && cds_start == self.start() && cds_end == self.end() {
            return Ok(None);
        }

        let rel_start = cds_start - self.start();
        let rel_end = cds_end - self.start();
        let mut chain = BlockChain::new();
        for block in self.blocks() {
            if block.end() <= rel_start {
                continue;
            }
            let seg_start = block.start().max(rel_start);
            let seg_end = block.end().min(rel_end);
            if seg_end > seg_start {
                chain.push(seg_start - rel_start, seg_end - seg_start);
            }
            if rel_end <= block.end() {
                break;
            }
        }

        self.derive(cds_start, cds_end)
            .cds_coord((cds_start, cds_end))
            .blocks(chain.finish())
            .build(BedKind::Bed12)
            .map(Some)
            .map_err(crate::Error::from)
    }

    /// Returns the introns of the record as a single BED12 record, one block per intron.
    ///
    /// Nothing is returned for records that are not BED12 or have less than two blocks.
    pub fn introns(&self) -> crate::Result<Option<BedRecord>> {
        if self.kind() != BedKind::Bed12 || self.block_count() < 2 {
            return Ok(None);
        }
        let blocks = self.blocks().as_slice();
        let first_end = blocks[0].end();
        let mut chain = BlockChain::new();
        for pair in blocks.windows(2) {
            let len = pair[1].start().checked_sub(pair[0].end())
                .ok_or_else(|| BedError::InvalidBlockList(
                    "blocks overlap or are not sorted", self.name().to_owned()))?;
            chain.push(pair[0].end() - first_end, len);
        }
        let start = self.start() + first_end;
        let end = self.start() + blocks[blocks.len() - 1].start();

        self.derive(start, end)
            .cds_coord((start, start))
            .blocks(chain.finish())
            .build(BedKind::Bed12)
            .map(Some)
            .map_err(crate::Error::from)
    }

    /// Maps a zero-based transcript coordinate to its genomic coordinate.
    ///
    /// Records other than BED12 are treated as a single block. Without `use_strand`, 0 is the
    /// leftmost transcript position regardless of strand; with it, 0 is the 5'-most position.
    pub fn tx_to_genome(&self, coord: i64, use_strand: bool) -> crate::Result<u64> {
        let single;
        let blocks = if self.kind() == BedKind::Bed12 {
            self.blocks()
        } else {
            single = Blocks::single(self.span());
            &single
        };
        let total = blocks.total_len();

        if use_strand && !self.is_stranded() {
            return Err(self.unstranded("tx_to_genome"));
        }
        if coord < 0 || coord as u64 >= total {
            return Err(crate::Error::from(TransformError::CoordinateOutOfRange(
                coord, total, self.name().to_owned())));
        }
        let coord = match self.strand() {
            Strand::Reverse if use_strand => total - coord as u64 - 1,
            _ => coord as u64,
        };

        let mut prefix = 0;
        for block in blocks {
            if coord < prefix + block.len() {
                return Ok(self.start() + block.start() + (coord - prefix));
            }
            prefix += block.len();
        }
        unreachable!("coordinate is smaller than the total block length")
    }

    /// Splits the record into BED6 records, one for each block.
    ///
    /// Records are returned in genomic order. If `append_index` is set, the 1-based genomic index
    /// of the block is appended to the name, e.g. `tx_Exon002`. The first and last blocks are
    /// selected according to the strand of the record.
    pub fn block_split(&self, append_index: bool, which: ExonSelection)
        -> crate::Result<Vec<BedRecord>>
    {
        if self.kind() != BedKind::Bed12 {
            return Err(crate::Error::from(
                TransformError::WrongSchema("block_split", self.name().to_owned())));
        }
        if which != ExonSelection::All && !self.is_stranded() {
            return Err(self.unstranded("block_split"));
        }

        let mut exons = Vec::with_capacity(self.block_count());
        for (idx, block) in self.blocks().iter().enumerate() {
            let start = self.start() + block.start();
            let mut builder = self.derive(start, start + block.len());
            if append_index {
                builder = builder.name(format!("{}_Exon{:03}", self.name(), idx + 1));
            }
            exons.push(builder.build(BedKind::Bed6)?);
        }

        let picked = match (which, self.strand()) {
            (ExonSelection::All, _) => return Ok(exons),
            (ExonSelection::First, Strand::Forward) | (ExonSelection::Last, Strand::Reverse) =>
                exons.into_iter().next(),
            _ => exons.pop(),
        };
        Ok(picked.into_iter().collect())
    }

    /// Fails unless the record is stranded and BED12.
    fn require_coding(&self, op: &'static str) -> crate::Result<()> {
        if !self.is_stranded() {
            return Err(self.unstranded(op));
        }
        if self.kind() != BedKind::Bed12 {
            return Err(crate::Error::from(
                TransformError::WrongSchema(op, self.name().to_owned())));
        }
        Ok(())
    }

    fn unstranded(&self, op: &'static str) -> crate::Error {
        crate::Error::from(TransformError::UnstrandedOperation(op, self.name().to_owned()))
    }
}

#[inline]
fn forward_window(start: u64, upstream: u64, downstream: u64) -> Option<(u64, u64)> {
    start.checked_add(downstream)
        .map(|end| (start.saturating_sub(upstream), end))
}
