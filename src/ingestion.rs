use crate::error::Result;
use crate::normalizer::normalize_all;
use crate::schema::{Dataset, RawRecord};
use csv::{ReaderBuilder, Trim};
use log::debug;
use std::io::Read;
use std::path::Path;

/// Reads raw ledger rows from CSV with a header row.
///
/// Headers may be the ledger's own (`Period/Year`, `Product`, `Customer`,
/// `Company`, `Region`, `Net Sales`) or their snake_case forms. Only the header
/// names are trimmed; cell values are kept verbatim so company and product keys
/// match exactly.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
    let mut rows = Vec::new();

    for record in rdr.deserialize::<RawRecord>() {
        rows.push(record?);
    }

    debug!("Read {} raw ledger rows", rows.len());
    Ok(rows)
}

pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path)?;
    read_csv(std::io::BufReader::new(file))
}

/// Normalizes raw rows into the dataset. Strict: the first malformed row aborts
/// the load.
pub fn load_dataset(rows: Vec<RawRecord>) -> Result<Dataset> {
    normalize_all(rows)
}

/// [`read_csv`] followed by [`load_dataset`].
pub fn load_csv<R: Read>(reader: R) -> Result<Dataset> {
    load_dataset(read_csv(reader)?)
}

pub fn load_csv_path<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    load_dataset(read_csv_path(path)?)
}
