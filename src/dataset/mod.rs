//! Dataset files: record type and tab-delimited persistence
//!
//! One dataset file is written per brand (named by the brand's short name),
//! plus one merged global file. All files are UTF-8, tab-delimited, with a
//! single header row.

mod dedup;
mod merge;

pub use dedup::dedup_dataset;
pub use merge::{merge_datasets, GLOBAL_DATASET_NAME};

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// File extension for dataset files
pub const DATASET_EXTENSION: &str = "tab";

/// One scraped listing
///
/// `link` is the identity of a listing: two records are duplicates iff their
/// links are byte-equal. `price` and `mileage` come from the listing's
/// detail page and stay empty when that fetch fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    #[serde(default)]
    pub categorie: String,
    pub link: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub mileage: String,
}

/// Column order of brand dataset files
pub const DATASET_COLUMNS: [&str; 5] = ["title", "categorie", "link", "price", "mileage"];

/// Returns the dataset path for a brand inside the output directory
pub fn brand_dataset_path(output_dir: &Path, brand_name: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", brand_name, DATASET_EXTENSION))
}

/// Writes a full dataset file: header row plus one row per record
///
/// Overwrites any existing file at `path`. The header is written even for an
/// empty dataset so that resume and merge treat the file as well-formed.
pub fn write_dataset(path: &Path, records: &[ListingRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(file);

    writer.write_record(DATASET_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a dataset file back into records
pub fn read_dataset(path: &Path) -> Result<Vec<ListingRecord>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().delimiter(b'\t').from_reader(file);

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(link: &str) -> ListingRecord {
        ListingRecord {
            title: format!("Truck {}", link),
            categorie: "Tractor".to_string(),
            link: link.to_string(),
            price: "10 000 €".to_string(),
            mileage: "250 000 km".to_string(),
        }
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = brand_dataset_path(dir.path(), "renault");

        let records = vec![sample_record("https://x/1"), sample_record("https://x/2")];
        write_dataset(&path, &records).unwrap();

        let read_back = read_dataset(&path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_header_written_for_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = brand_dataset_path(dir.path(), "empty");

        write_dataset(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "title\tcategorie\tlink\tprice\tmileage");
    }

    #[test]
    fn test_brand_dataset_path_uses_extension() {
        let path = brand_dataset_path(Path::new("/out"), "volvo");
        assert_eq!(path, PathBuf::from("/out/volvo.tab"));
    }
}
