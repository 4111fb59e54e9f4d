//! Static country dataset.
//!
//! The table reads from one read-only, ordered sequence of records that is
//! loaded once at startup:
//! - the built-in country list, or
//! - a JSON array of records given with `--data <file>`.

use crate::model::error::DatasetError;
use crate::model::Country;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Shared read-only dataset.
pub type Dataset = Arc<[Country]>;

/// The built-in country list, in display order.
pub fn builtin() -> Vec<Country> {
    vec![
        Country::new("Russia", "ru", 17_075_200, 146_989_754),
        Country::new("France", "fr", 640_679, 64_979_548),
        Country::new("Germany", "de", 357_114, 82_114_224),
        Country::new("Portugal", "pt", 92_090, 10_329_506),
        Country::new("Canada", "ca", 9_976_140, 36_624_199),
        Country::new("Vietnam", "vn", 331_212, 95_540_800),
        Country::new("Brazil", "br", 8_515_767, 209_288_278),
        Country::new("Mexico", "mx", 1_964_375, 129_163_276),
        Country::new("United States", "us", 9_629_091, 324_459_463),
        Country::new("India", "in", 3_287_263, 1_324_171_354),
        Country::new("Indonesia", "id", 1_910_931, 263_991_379),
        Country::new("Tuvalu", "tv", 26, 11_097),
        Country::new("China", "cn", 9_596_960, 1_409_517_397),
    ]
}

/// Load a dataset from a JSON array of records.
///
/// # Errors
///
/// Returns `DatasetError::FileNotFound` if the file does not exist,
/// `DatasetError::InvalidJson` if it is not an array of records,
/// `DatasetError::InvalidRecord` if a record has an empty name,
/// and `DatasetError::Io` for other read failures.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Country>, DatasetError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DatasetError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let records: Vec<Country> =
        serde_json::from_str(&contents).map_err(|e| DatasetError::InvalidJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate(&records)?;
    Ok(records)
}

/// Resolve the dataset for this run.
///
/// Uses the file when one is given, the built-in list otherwise.
///
/// # Errors
///
/// Propagates [`load_file`] errors.
pub fn resolve(file: Option<PathBuf>) -> Result<Dataset, DatasetError> {
    let records = match file {
        Some(path) => {
            let records = load_file(&path)?;
            info!(path = %path.display(), records = records.len(), "Loaded dataset file");
            records
        }
        None => {
            let records = builtin();
            info!(records = records.len(), "Using built-in dataset");
            records
        }
    };
    Ok(records.into())
}

fn validate(records: &[Country]) -> Result<(), DatasetError> {
    match records.iter().position(|c| c.name.trim().is_empty()) {
        Some(index) => Err(DatasetError::InvalidRecord {
            index,
            reason: "empty name",
        }),
        None => Ok(()),
    }
}
