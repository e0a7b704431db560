/*! Reader and writer for the BED format.

The BED format is an interval-oriented format in which each feature is denoted in a single
tab-separated line of 3, 4, 6 or 12 columns.

A minimum specification of the columns can be found on
[this page](https://genome.ucsc.edu/FAQ/FAQformat.html#format1).

Lines starting with `#` and UCSC `track` and `browser` lines are skipped.
*/
use std::convert::AsRef;
use std::fs;
use std::io;
use std::path::Path;

use csv::{self, StringRecord};
use tracing::debug;

use crate::BedRecord;


/// Creates a reader of tab-separated rows of varying widths.
pub(crate) fn tsv_reader<R: io::Read>(in_reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(in_reader)
}

/// Whether the row is a UCSC `track` or `browser` line.
#[inline]
fn is_header_row(row: &StringRecord) -> bool {
    row.get(0)
        .and_then(|first| first.split_whitespace().next())
        .map_or(false, |word| word == "track" || word == "browser")
}

/// BED reader.
pub struct Reader<R: io::Read> {
    inner: csv::Reader<R>,
}

impl<R: io::Read> Reader<R> {

    /// Creates a BED reader from another reader.
    pub fn from_reader(in_reader: R) -> Reader<R> {
        Reader { inner: tsv_reader(in_reader) }
    }

    /// Creates an iterator of validated records.
    pub fn records(&mut self) -> BedRecordsStream<R> {
        BedRecordsStream { inner: self.raw_rows() }
    }

    /// Creates an iterator of unvalidated rows.
    pub fn raw_rows(&mut self) -> BedRawRows<R> {
        BedRawRows { inner: self.inner.records() }
    }
}

impl Reader<fs::File> {

    /// Creates a BED reader that reads from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        fs::File::open(path).map(Reader::from_reader)
    }
}

/// Iterator over the raw rows of a BED file, without any validation.
pub struct BedRawRows<'a, R: 'a> where R: io::Read {
    inner: csv::StringRecordsIter<'a, R>,
}

impl<'a, R> Iterator for BedRawRows<'a, R> where R: io::Read {

    type Item = crate::Result<StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(ref row) if is_header_row(row) => {
                    debug!(line = ?row.position().map(|p| p.line()), "skipping header line");
                },
                other => return Some(other.map_err(crate::Error::from)),
            }
        }
    }
}

/// Iterator over validated BED records.
pub struct BedRecordsStream<'a, R: 'a> where R: io::Read {
    inner: BedRawRows<'a, R>,
}

impl<'a, R> Iterator for BedRecordsStream<'a, R> where R: io::Read {

    type Item = crate::Result<BedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
            .map(|row| row.and_then(|row| {
                let fields = row.iter().collect::<Vec<&str>>();
                BedRecord::from_fields(&fields).map_err(crate::Error::from)
            }))
    }
}

/// BED writer.
pub struct Writer<W: io::Write> {
    inner: csv::Writer<W>,
}

impl<W: io::Write> Writer<W> {

    /// Creates a BED writer from another writer.
    pub fn from_writer(in_writer: W) -> Writer<W> {
        Writer {
            inner: csv::WriterBuilder::new()
                .delimiter(b'\t')
                .flexible(true)
                .quote_style(csv::QuoteStyle::Never)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(in_writer),
        }
    }

    /// Writes the given record.
    pub fn write_record(&mut self, record: &BedRecord) -> crate::Result<()> {
        self.inner
            .write_record(record.to_fields())
            .map_err(crate::Error::from)
    }

    /// Writes the given record followed by extra columns.
    pub fn write_record_with<I, T>(&mut self, record: &BedRecord, extra: I) -> crate::Result<()>
        where I: IntoIterator<Item=T>, T: AsRef<str>
    {
        let mut fields = record.to_fields();
        fields.extend(extra.into_iter().map(|v| v.as_ref().to_owned()));
        self.write_fields(fields)
    }

    /// Writes the given columns as a single row, unvalidated.
    pub fn write_fields<I, T>(&mut self, fields: I) -> crate::Result<()>
        where I: IntoIterator<Item=T>, T: AsRef<[u8]>
    {
        self.inner
            .write_record(fields)
            .map_err(crate::Error::from)
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> crate::Result<()> {
        self.inner.flush().map_err(crate::Error::from)
    }
}

impl Writer<fs::File> {

    /// Creates a BED writer that writes to the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let f = fs::File::create(path)?;
        Ok(Writer::from_writer(f))
    }
}

impl Writer<Vec<u8>> {

    /// Creates a BED writer that writes to an in-memory buffer.
    ///
    /// The initial capacity of the buffer is 64 KiB.
    pub fn from_memory() -> Writer<Vec<u8>> {
        Writer::from_writer(Vec::with_capacity(1024 * 64))
    }

    /// Consumes the writer and returns the contents of the in-memory buffer as a string.
    pub fn into_string(self) -> crate::Result<String> {
        let buf = self.inner.into_inner()
            .map_err(|err| crate::Error::from(err.into_error()))?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
