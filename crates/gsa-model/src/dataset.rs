//! Read-only opportunity dataset.
//!
//! The dataset is supplied externally as a JSON array of opportunity records.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{DatasetError, Result};
use crate::models::Opportunity;

/// An ordered collection of opportunities with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    opportunities: Vec<Opportunity>,
}

impl Dataset {
    /// Builds a dataset from records, rejecting duplicate ids.
    pub fn new(opportunities: Vec<Opportunity>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(opportunities.len());
        for opp in &opportunities {
            if !seen.insert(opp.id.as_str()) {
                return Err(DatasetError::DuplicateId { id: opp.id.clone() });
            }
        }
        Ok(Self { opportunities })
    }

    /// Parses a dataset from a JSON array.
    ///
    /// # Errors
    ///
    /// - Returns `DatasetError::Json` if any record is malformed.
    /// - Returns `DatasetError::DuplicateId` if two records share an id.
    pub fn from_json(json: &str) -> Result<Self> {
        let opportunities: Vec<Opportunity> = serde_json::from_str(json)?;
        Self::new(opportunities)
    }

    /// Loads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// - Returns `DatasetError::Read` if the file cannot be read.
    /// - Returns the errors of [`from_json`](Self::from_json) otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| DatasetError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let dataset = Self::from_json(&contents)?;
        debug!(path = %path.display(), records = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    /// Returns the records in dataset order.
    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    /// Consumes the dataset, returning its records.
    pub fn into_opportunities(self) -> Vec<Opportunity> {
        self.opportunities
    }

    /// Finds a record by exact id.
    pub fn find(&self, id: &str) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| o.id == id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.opportunities.len()
    }

    /// Returns true if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}
