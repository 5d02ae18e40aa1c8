use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use log::info;
use sylva::Dataset;

use crate::error::{ReadError, Result};

/// Convert Gzipped CSV bytes into a dataset
pub fn dataset_from_gz_csv<R: Read>(gz: R, separator: u8) -> Result<Dataset> {
    // unzip file
    let file = GzDecoder::new(gz);
    dataset_from_csv(file, separator)
}

/// Convert CSV bytes into a dataset
///
/// The first row names the fields, every following row is an observation. All values are kept as
/// strings with surrounding whitespace removed.
pub fn dataset_from_csv<R: Read>(csv: R, separator: u8) -> Result<Dataset> {
    // parse CSV, rows of a wrong length are reported by the dataset with their index
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(separator)
        .from_reader(csv);

    let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if header.is_empty() {
        return Err(ReadError::MissingHeader);
    }

    let rows = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(String::from).collect::<Vec<_>>()))
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    Ok(Dataset::new(rows, header)?)
}

/// Read a comma separated file into a dataset
///
/// Files ending in `.gz` are decompressed on the fly.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let dataset = match path.extension() {
        Some(ext) if ext == "gz" => dataset_from_gz_csv(file, b',')?,
        _ => dataset_from_csv(file, b',')?,
    };

    info!(
        "loaded {} samples with {} fields from {}",
        dataset.nsamples(),
        dataset.nfields(),
        path.display()
    );

    Ok(dataset)
}

#[cfg(feature = "tennis")]
/// Read in the play-tennis dataset
///
/// The dataset contains 14 days described by the categorical fields `outlook`, `temperature`,
/// `humidity` and `wind`, together with the decision `play` (`yes` or `no`).
///
/// # Reference:
/// Quinlan (1986). Induction of Decision Trees. Machine Learning 1, 81-106. Table 1.
pub fn tennis() -> Dataset {
    let data = include_bytes!("../data/tennis.csv.gz");
    dataset_from_gz_csv(&data[..], b',').unwrap()
}
