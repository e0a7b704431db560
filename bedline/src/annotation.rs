//! Exact-match lookups of record names in a tab-separated annotation file.
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::io_bed::tsv_reader;


quick_error! {
    /// Errors that occur when loading annotation files.
    #[derive(Debug, Clone, PartialEq)]
    pub enum AnnotationError {
        /// Occurs when the key column is not a 1-based column index.
        InvalidColumn(column: usize) {
            display("annotation column must be 1 or greater, found: {}", column)
        }
        /// Occurs when a row of the annotation has no value in the key column.
        MissingColumn(column: usize, line: u64) {
            display("annotation row has no column {}, line: {}", column, line)
        }
    }
}

/// Rows of an annotation file keyed by one of their columns.
///
/// The remaining columns of each row are kept in order. When a key occurs more than once, the
/// first row is used.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    rows: HashMap<String, Vec<String>>,
}

impl Annotation {

    /// Loads an annotation, keyed by the given 1-based column.
    pub fn from_reader<R: io::Read>(in_reader: R, column: usize) -> crate::Result<Annotation> {
        let key_idx = column.checked_sub(1)
            .ok_or(AnnotationError::InvalidColumn(column))?;

        let mut rows: HashMap<String, Vec<String>> = HashMap::new();
        let mut reader = tsv_reader(in_reader);
        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let key = row.get(key_idx)
                .ok_or(AnnotationError::MissingColumn(column, line))?;
            if rows.contains_key(key) {
                warn!(key, line, "duplicate annotation key, keeping the first row");
                continue;
            }
            let others = row.iter().enumerate()
                .filter(|&(idx, _)| idx != key_idx)
                .map(|(_, value)| value.to_owned())
                .collect();
            let _ = rows.insert(key.to_owned(), others);
        }
        info!(keys = rows.len(), "loaded annotation");

        Ok(Annotation { rows })
    }

    /// Loads an annotation from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P, column: usize) -> crate::Result<Annotation> {
        let file = fs::File::open(path)?;
        Annotation::from_reader(file, column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Returns the columns other than the key column of the row with the given key.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.rows.get(key).map(|v| v.as_slice())
    }
}
