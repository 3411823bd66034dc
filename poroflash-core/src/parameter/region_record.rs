use super::ParameterError;
use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A named collection of fluid parameters for one rock/fluid region.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegionRecord<M> {
    pub name: String,
    pub model_record: M,
}

impl<M> RegionRecord<M> {
    /// Create a new `RegionRecord`.
    pub fn new<S: Into<String>>(name: S, model_record: M) -> Self {
        Self {
            name: name.into(),
            model_record,
        }
    }

    /// Read the records of the given regions from a json file.
    pub fn from_json<P>(regions: &[&str], file: P) -> Result<Vec<Self>, ParameterError>
    where
        P: AsRef<Path>,
        M: Clone + DeserializeOwned,
    {
        let reader = BufReader::new(File::open(file)?);
        let file_records: Vec<Self> = serde_json::from_reader(reader)?;
        Self::select(regions, file_records)
    }

    /// Pick the queried regions from a list of records, in the queried order.
    pub fn select(regions: &[&str], records: Vec<Self>) -> Result<Vec<Self>, ParameterError> {
        let queried: IndexSet<&str> = regions.iter().copied().collect();
        // raise error on duplicate detection
        if queried.len() != regions.len() {
            return Err(ParameterError::IncompatibleParameters(
                "A region was defined more than once.".to_string(),
            ));
        }

        let mut available: IndexMap<String, Self> = records
            .into_iter()
            .map(|r| (r.name.clone(), r))
            .collect();

        let missing: Vec<&str> = queried
            .iter()
            .copied()
            .filter(|name| !available.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(ParameterError::RegionsNotFound(format!("{:?}", missing)));
        }

        Ok(queried
            .iter()
            .filter_map(|name| available.shift_remove(*name))
            .collect())
    }
}

impl<M> std::fmt::Display for RegionRecord<M>
where
    M: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RegionRecord(")?;
        write!(f, "\n\tname={},", self.name)?;
        write!(f, "\n\tmodel_record={},", self.model_record)?;
        write!(f, "\n)")
    }
}
