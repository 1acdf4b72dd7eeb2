//! Delimited text input.
//!
//! Files are read lazily, one record at a time, with no header row. Records
//! are allowed to differ in length here; the loader checks each one against
//! the table's column count.
//!
//! Completely empty lines produce no record. A file with one empty-string
//! value per line must therefore quote it (`""` in `csv` format).

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::RawRecord;
use crate::error::{ImportError, Result};

/// Supported input layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Comma separated, `"` quoted.
    Csv,
    /// Tab separated, unquoted.
    Tsv,
    /// Comma separated, unquoted.
    #[default]
    CsvUnquoted,
}

impl InputFormat {
    /// Field separator byte.
    pub fn separator(self) -> u8 {
        match self {
            InputFormat::Csv | InputFormat::CsvUnquoted => b',',
            InputFormat::Tsv => b'\t',
        }
    }

    /// Quote byte, or `None` for unquoted mode.
    pub fn quote(self) -> Option<u8> {
        match self {
            InputFormat::Csv => Some(b'"'),
            InputFormat::Tsv | InputFormat::CsvUnquoted => None,
        }
    }

    fn builder(self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.separator())
            .has_headers(false)
            .flexible(true);
        match self.quote() {
            Some(quote) => builder.quote(quote).quoting(true),
            None => builder.quoting(false),
        };
        builder
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::Csv => "csv",
            InputFormat::Tsv => "tsv",
            InputFormat::CsvUnquoted => "csv_unquoted",
        };
        f.write_str(name)
    }
}

impl FromStr for InputFormat {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "csv" => Ok(InputFormat::Csv),
            "tsv" => Ok(InputFormat::Tsv),
            "csv_unquoted" => Ok(InputFormat::CsvUnquoted),
            other => Err(ImportError::Config(format!(
                "unknown input format '{}' (expected csv, tsv or csv_unquoted)",
                other
            ))),
        }
    }
}

/// Lazy, finite, non-restartable record stream over a delimited source.
pub struct DelimitedReader<R: Read = File> {
    records: csv::StringRecordsIntoIter<R>,
}

impl DelimitedReader<File> {
    /// Open a file for reading.
    pub fn open<P: AsRef<Path>>(path: P, format: InputFormat) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!("Opened {:?} as {}", path, format);
        Ok(Self::from_reader(file, format))
    }
}

impl<R: Read> DelimitedReader<R> {
    /// Wrap any byte source.
    pub fn from_reader(reader: R, format: InputFormat) -> Self {
        Self {
            records: format.builder().from_reader(reader).into_records(),
        }
    }
}

impl<R: Read> Iterator for DelimitedReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(ImportError::from)
        })
    }
}
