//! Block lists of BED12 records.
//!
//! Blocks are stored the way BED12 stores them: a start relative to the record start, and a
//! length. Blocks are expected to be sorted and non-overlapping; this is not re-checked here.
use std::num::ParseIntError;
use std::slice;
use std::str::FromStr;

use itertools::Itertools;

use crate::consts::BLOCK_SEP;


/// A single block (exon) of a BED12 record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    start: u64,
    len: u64,
}

impl Block {

    pub fn new(start: u64, len: u64) -> Self {
        Block { start, len }
    }

    /// Start of the block, relative to the record start.
    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// End of the block, relative to the record start.
    #[inline]
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.len)
    }
}

/// Ordered blocks of a BED12 record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocks(Vec<Block>);

impl Blocks {

    pub fn new(blocks: Vec<Block>) -> Self {
        Blocks(blocks)
    }

    /// Creates a single block covering `span` bases.
    pub fn single(span: u64) -> Self {
        Blocks(vec![Block::new(0, span)])
    }

    /// Parses the block lengths and block starts columns.
    ///
    /// Both columns may or may not end with a trailing comma. The error value is a short
    /// description of the problem, meant to be wrapped by the caller.
    pub fn parse(count: usize, raw_lengths: &str, raw_starts: &str)
        -> Result<Blocks, &'static str>
    {
        let lengths = parse_list(raw_lengths)
            .map_err(|_| "block lengths are not non-negative integers")?;
        let starts = parse_list(raw_starts)
            .map_err(|_| "block starts are not non-negative integers")?;
        if lengths.len() != count {
            return Err("number of block lengths and block count are not equal");
        }
        if starts.len() != count {
            return Err("number of block starts and block count are not equal");
        }
        let blocks = starts.into_iter().zip(lengths)
            .map(|(start, len)| Block::new(start, len))
            .collect();
        Ok(Blocks(blocks))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<Block> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        self.0.as_slice()
    }

    pub fn first(&self) -> Option<&Block> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Block> {
        self.0.last()
    }

    pub fn get(&self, idx: usize) -> Option<&Block> {
        self.0.get(idx)
    }

    /// Sum of all block lengths.
    pub fn total_len(&self) -> u64 {
        self.0.iter().map(Block::len).sum()
    }

    /// Whether every block ends within `span` bases of the record start.
    pub fn fit_within(&self, span: u64) -> bool {
        self.0.iter()
            .all(|block| block.start.checked_add(block.len).map_or(false, |end| end <= span))
    }

    /// Genomic start of the block at `idx`, given the genomic start of the record.
    pub fn genome_offset_of(&self, origin: u64, idx: usize) -> Option<u64> {
        self.0.get(idx).map(|block| origin + block.start)
    }

    /// Index of the block covering the given record-relative position.
    pub fn contains_offset(&self, rel_offset: u64) -> Option<usize> {
        self.0.iter()
            .position(|block| block.start <= rel_offset && rel_offset < block.end())
    }

    /// Block lengths column value, with the trailing comma.
    ///
    /// An empty block list renders as an empty string.
    pub fn lengths_field(&self) -> String {
        framed(self.0.iter().map(Block::len))
    }

    /// Block starts column value, with the trailing comma.
    pub fn starts_field(&self) -> String {
        framed(self.0.iter().map(Block::start))
    }
}

impl<'a> IntoIterator for &'a Blocks {
    type Item = &'a Block;
    type IntoIter = slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Accumulates the blocks of a derived record before handing them to the record builder.
#[derive(Debug, Default)]
pub(crate) struct BlockChain {
    blocks: Vec<Block>,
}

impl BlockChain {

    pub(crate) fn new() -> Self {
        BlockChain::default()
    }

    pub(crate) fn push(&mut self, start: u64, len: u64) {
        self.blocks.push(Block::new(start, len));
    }

    pub(crate) fn last(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub(crate) fn finish(self) -> Blocks {
        Blocks(self.blocks)
    }
}

#[inline]
fn parse_list(raw: &str) -> Result<Vec<u64>, ParseIntError> {
    let trimmed = raw.strip_suffix(BLOCK_SEP).unwrap_or(raw);
    if trimmed.is_empty() {
        return Ok(vec![]);
    }
    trimmed.split(BLOCK_SEP).map(u64::from_str).collect()
}

#[inline]
fn framed<I: Iterator<Item=u64>>(values: I) -> String {
    let mut field = values.map(|v| v.to_string()).join(",");
    if !field.is_empty() {
        field.push(BLOCK_SEP);
    }
    field
}
