//! Flat-file persistence for the record collections
//!
//! Every collection lives in its own CSV file with a fixed header. Loading is
//! forgiving: a missing file is created, rows with the wrong column count or
//! unparseable fields are skipped, and a file whose header is broken gets a
//! best-effort positional recovery followed by an immediate rewrite.
//!
//! Fields are quoted when they contain the delimiter, a quote or a newline,
//! so free text with commas survives a round trip.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Writer};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::Result;

/// A record with a fixed CSV row layout
pub trait CsvRecord: Sized {
    const HEADER: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;

    /// Parse one row. `fields` arrive in `HEADER` order.
    fn from_row(fields: &[&str]) -> Option<Self>;
}

/// Outcome of [`load`]
#[derive(Debug)]
pub struct Loaded<R> {
    pub records: Vec<R>,
    /// Data rows that could not be parsed and were discarded
    pub skipped: usize,
    /// The file did not exist and was created with the canonical header
    pub created: bool,
    /// The header was missing or malformed and the file was rewritten
    pub header_repaired: bool,
}

impl<R> Loaded<R> {
    fn empty_created() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
            created: true,
            header_repaired: false,
        }
    }
}

/// Load every parseable record from `path`
pub fn load<R: CsvRecord>(path: &Path) -> Result<Loaded<R>> {
    if !path.exists() {
        save::<R>(path, std::iter::empty())?;
        debug!("created {} with header", path.display());
        return Ok(Loaded::empty_created());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    let mut skipped = 0;
    for result in reader.records() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("{}: unreadable row skipped: {e}", path.display());
                skipped += 1;
            }
        }
    }

    let mut rows = rows.into_iter();
    let header = rows.next();
    let mut records = Vec::new();

    match header.as_ref().and_then(column_map::<R>) {
        Some(columns) => {
            let width = header.as_ref().map_or(0, StringRecord::len);
            for row in rows {
                if row.len() != width {
                    skipped += 1;
                    continue;
                }
                let fields: Vec<&str> = columns.iter().map(|&i| &row[i]).collect();
                match R::from_row(&fields) {
                    Some(record) => records.push(record),
                    None => skipped += 1,
                }
            }
            if skipped > 0 {
                warn!("{}: skipped {skipped} malformed row(s)", path.display());
            }
            debug!("loaded {} row(s) from {}", records.len(), path.display());
            Ok(Loaded {
                records,
                skipped,
                created: false,
                header_repaired: false,
            })
        }
        None => {
            // The broken header line is dropped, never parsed as data and
            // never counted as skipped.
            for row in rows {
                match parse_positional::<R>(&row) {
                    Some(record) => records.push(record),
                    None => skipped += 1,
                }
            }
            save(path, &records)?;
            info!(
                "{}: header repaired, recovered {} row(s), discarded {skipped}",
                path.display(),
                records.len()
            );
            Ok(Loaded {
                records,
                skipped,
                created: false,
                header_repaired: true,
            })
        }
    }
}

/// Overwrite `path` with the canonical header plus one row per record.
///
/// The rows are written to a temporary file next to `path` which then
/// replaces it, so a failed save leaves the previous file intact.
pub fn save<'a, R>(path: &Path, records: impl IntoIterator<Item = &'a R>) -> Result<()>
where
    R: CsvRecord + 'a,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    let mut count = 0usize;
    {
        let mut writer = Writer::from_writer(tmp.as_file());
        writer.write_record(R::HEADER)?;
        for record in records {
            writer.write_record(record.to_row())?;
            count += 1;
        }
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("saved {count} row(s) to {}", path.display());
    Ok(())
}

/// Index of every canonical column inside `header`, or `None` when one is
/// missing. Extra columns are tolerated.
fn column_map<R: CsvRecord>(header: &StringRecord) -> Option<Vec<usize>> {
    let names: Vec<&str> = header
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect();
    R::HEADER
        .iter()
        .map(|expected| names.iter().position(|name| name == expected))
        .collect()
}

fn parse_positional<R: CsvRecord>(row: &StringRecord) -> Option<R> {
    if row.len() != R::HEADER.len() {
        return None;
    }
    let fields: Vec<&str> = row.iter().collect();
    R::from_row(&fields)
}
