//! The raw-configuration boundary feeding the rule source adapters.
//!
//! Implementations answer two per-organization queries: the active weld
//! specification register and the contract terms. A failed or empty
//! query is an expected condition; the refresh pass degrades to zero
//! rules from that source rather than aborting.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use linewatch_model::OrgId;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("configuration source unavailable: {0}")]
    Unavailable(String),
}

/// One active welding procedure specification record.
#[derive(Debug, Clone, PartialEq)]
pub struct WeldSpec {
    pub id: String,
    pub wps_number: String,
    pub min_preheat_c: Option<f64>,
    pub wall_min_mm: Option<f64>,
    pub wall_max_mm: Option<f64>,
    pub diameter_min_mm: Option<f64>,
    pub diameter_max_mm: Option<f64>,
}

impl WeldSpec {
    pub fn new(id: impl Into<String>, wps_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            wps_number: wps_number.into(),
            min_preheat_c: None,
            wall_min_mm: None,
            wall_max_mm: None,
            diameter_min_mm: None,
            diameter_max_mm: None,
        }
    }
}

/// Contract configuration for one organization. One record is assumed
/// per organization; sources return the first when more exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractTerms {
    pub id: Option<String>,
    pub kp_start: Option<f64>,
    pub kp_end: Option<f64>,
    pub standard_workday_hours: Option<f64>,
}

/// Per-organization queries over raw domain configuration.
pub trait ConfigSource: Send + Sync {
    fn weld_specs(&self, org: &OrgId) -> Result<Vec<WeldSpec>, SourceError>;

    fn contract(&self, org: &OrgId) -> Result<Option<ContractTerms>, SourceError>;
}

/// Fixed in-memory source for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    specs: BTreeMap<OrgId, Vec<WeldSpec>>,
    contracts: BTreeMap<OrgId, ContractTerms>,
}

impl StaticConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_spec(mut self, org: OrgId, spec: WeldSpec) -> Self {
        self.specs.entry(org).or_default().push(spec);
        self
    }

    #[must_use]
    pub fn with_contract(mut self, org: OrgId, terms: ContractTerms) -> Self {
        self.contracts.insert(org, terms);
        self
    }
}

impl ConfigSource for StaticConfigSource {
    fn weld_specs(&self, org: &OrgId) -> Result<Vec<WeldSpec>, SourceError> {
        Ok(self.specs.get(org).cloned().unwrap_or_default())
    }

    fn contract(&self, org: &OrgId) -> Result<Option<ContractTerms>, SourceError> {
        Ok(self.contracts.get(org).cloned())
    }
}
