//! Structures and traits that can be used to build fluid model parameters.

use serde::de::DeserializeOwned;
use std::io;
use std::path::Path;
use thiserror::Error;

mod region_record;

pub use region_record::RegionRecord;

/// Constructor methods for parameters.
///
/// By implementing `Parameter` for a type, you define how the parameters
/// of a fluid model can be constructed from a sequence of region records.
pub trait Parameter
where
    Self: Sized,
{
    type Record: Clone + DeserializeOwned;

    /// Creates parameters from records for one or more fluid regions.
    fn from_records(records: Vec<RegionRecord<Self::Record>>) -> Result<Self, ParameterError>;

    /// Creates parameters for a single fluid region.
    fn new_region(record: RegionRecord<Self::Record>) -> Result<Self, ParameterError> {
        Self::from_records(vec![record])
    }

    /// Creates parameters from model records with default region names.
    fn from_model_records(model_records: Vec<Self::Record>) -> Result<Self, ParameterError> {
        let records = model_records
            .into_iter()
            .enumerate()
            .map(|(i, r)| RegionRecord::new(format!("region {}", i), r))
            .collect();
        Self::from_records(records)
    }

    /// Return the original records that were used to construct the parameters.
    fn records(&self) -> &[RegionRecord<Self::Record>];

    /// Creates parameters from region information stored in a json file.
    ///
    /// The regions are ordered as given in `regions`.
    fn from_json<P>(regions: Vec<&str>, file: P) -> Result<Self, ParameterError>
    where
        P: AsRef<Path>,
    {
        let records = RegionRecord::<Self::Record>::from_json(&regions, file)?;
        Self::from_records(records)
    }

    /// Return a parameter set containing the subset of regions specified in `region_list`.
    fn subset(&self, region_list: &[usize]) -> Result<Self, ParameterError> {
        let records = self.records();
        let records = region_list
            .iter()
            .map(|&i| {
                records.get(i).cloned().ok_or_else(|| {
                    ParameterError::RegionsNotFound(format!("region {} of {}", i, records.len()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }
}

/// Error type for incomplete parameter information and IO problems.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error(transparent)]
    FileIO(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("The following region(s) were not found: {0}")]
    RegionsNotFound(String),
    #[error("Invalid table {0}: {1}")]
    InvalidTable(String, String),
    #[error("Incompatible parameters: {0}")]
    IncompatibleParameters(String),
}
