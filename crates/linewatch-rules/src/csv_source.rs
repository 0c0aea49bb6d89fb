//! CSV-file configuration source.
//!
//! Reads `weld_specs.csv` and `contracts.csv` from a project config
//! directory. A missing file is an empty source, not an error; a file
//! that exists but will not parse is reported so the refresh pass can
//! log it and move on.

use std::path::{Path, PathBuf};

use linewatch_model::{OrgId, parse_kp};

use crate::sources::{ConfigSource, ContractTerms, SourceError, WeldSpec};

const WELD_SPECS_FILE: &str = "weld_specs.csv";
const CONTRACTS_FILE: &str = "contracts.csv";

#[derive(Debug, Clone)]
pub struct CsvConfigSource {
    config_dir: PathBuf,
}

impl CsvConfigSource {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

impl ConfigSource for CsvConfigSource {
    fn weld_specs(&self, org: &OrgId) -> Result<Vec<WeldSpec>, SourceError> {
        let path = self.config_dir.join(WELD_SPECS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_weld_specs(&path, org)
    }

    fn contract(&self, org: &OrgId) -> Result<Option<ContractTerms>, SourceError> {
        let path = self.config_dir.join(CONTRACTS_FILE);
        if !path.exists() {
            return Ok(None);
        }
        read_contract(&path, org)
    }
}

fn read_weld_specs(path: &Path, org: &OrgId) -> Result<Vec<WeldSpec>, SourceError> {
    let mut reader = open_csv(path)?;
    let headers = headers(&mut reader, path)?;
    let header_idx = |name: &str| -> Option<usize> { headers.iter().position(|h| h == name) };

    let org_i = required_header(&header_idx, path, "Org")?;
    let id_i = required_header(&header_idx, path, "Spec ID")?;
    let wps_i = required_header(&header_idx, path, "WPS Number")?;
    let preheat_i = header_idx("Min Preheat C");
    let wall_min_i = header_idx("Wall Min mm");
    let wall_max_i = header_idx("Wall Max mm");
    let od_min_i = header_idx("OD Min mm");
    let od_max_i = header_idx("OD Max mm");
    let active_i = header_idx("Active");

    let mut specs = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|error| csv_error(path, error.to_string()))?;
        let get = |i: usize| -> Option<String> {
            row.get(i)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if !get(org_i).is_some_and(|row_org| org.as_str().eq_ignore_ascii_case(&row_org)) {
            continue;
        }
        if !active_i.and_then(get).is_none_or(|flag| is_truthy(&flag)) {
            continue;
        }

        let id = get(id_i).ok_or_else(|| csv_error(path, "missing Spec ID".to_string()))?;
        let wps_number = get(wps_i).unwrap_or_else(|| id.clone());

        let mut spec = WeldSpec::new(id, wps_number);
        spec.min_preheat_c = preheat_i.and_then(get).and_then(|v| parse_number(&v));
        spec.wall_min_mm = wall_min_i.and_then(get).and_then(|v| parse_number(&v));
        spec.wall_max_mm = wall_max_i.and_then(get).and_then(|v| parse_number(&v));
        spec.diameter_min_mm = od_min_i.and_then(get).and_then(|v| parse_number(&v));
        spec.diameter_max_mm = od_max_i.and_then(get).and_then(|v| parse_number(&v));
        specs.push(spec);
    }
    Ok(specs)
}

fn read_contract(path: &Path, org: &OrgId) -> Result<Option<ContractTerms>, SourceError> {
    let mut reader = open_csv(path)?;
    let headers = headers(&mut reader, path)?;
    let header_idx = |name: &str| -> Option<usize> { headers.iter().position(|h| h == name) };

    let org_i = required_header(&header_idx, path, "Org")?;
    let id_i = header_idx("Contract ID");
    let kp_start_i = header_idx("KP Start");
    let kp_end_i = header_idx("KP End");
    let hours_i = header_idx("Workday Hours");

    for row in reader.records() {
        let row = row.map_err(|error| csv_error(path, error.to_string()))?;
        let get = |i: usize| -> Option<String> {
            row.get(i)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if !get(org_i).is_some_and(|row_org| org.as_str().eq_ignore_ascii_case(&row_org)) {
            continue;
        }

        // First matching record wins; contracts are one-per-organization.
        return Ok(Some(ContractTerms {
            id: id_i.and_then(get),
            kp_start: kp_start_i.and_then(get).and_then(|v| parse_kp(&v)),
            kp_end: kp_end_i.and_then(get).and_then(|v| parse_kp(&v)),
            standard_workday_hours: hours_i.and_then(get).and_then(|v| parse_number(&v)),
        }));
    }
    Ok(None)
}

fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>, SourceError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|error| csv_error(path, error.to_string()))
}

fn headers(
    reader: &mut csv::Reader<std::fs::File>,
    path: &Path,
) -> Result<csv::StringRecord, SourceError> {
    reader
        .headers()
        .map(Clone::clone)
        .map_err(|error| csv_error(path, error.to_string()))
}

fn required_header(
    header_idx: &impl Fn(&str) -> Option<usize>,
    path: &Path,
    name: &str,
) -> Result<usize, SourceError> {
    header_idx(name).ok_or_else(|| csv_error(path, format!("missing header: {name}")))
}

fn csv_error(path: &Path, message: String) -> SourceError {
    SourceError::Csv {
        path: path.to_path_buf(),
        message,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "" | "true" | "yes" | "y" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).expect("write config file");
    }

    #[test]
    fn reads_weld_specs_for_one_org() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(
            dir.path(),
            WELD_SPECS_FILE,
            "Org,Spec ID,WPS Number,Min Preheat C,Wall Min mm,Wall Max mm,OD Min mm,OD Max mm,Active\n\
             org-1,WS-1,WPS-104-A,65,7.1,9.5,,,true\n\
             org-1,WS-2,WPS-221,,,,609,611,false\n\
             org-2,WS-9,WPS-300,90,,,,,\n",
        );
        let source = CsvConfigSource::new(dir.path());

        let specs = source.weld_specs(&OrgId::from("org-1")).expect("specs");
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].id, "WS-1");
        assert_eq!(specs[0].min_preheat_c, Some(65.0));
        assert_eq!(specs[0].wall_max_mm, Some(9.5));

        let other = source.weld_specs(&OrgId::from("org-2")).expect("specs");
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].min_preheat_c, Some(90.0));
    }

    #[test]
    fn reads_contract_with_chainage_notation() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(
            dir.path(),
            CONTRACTS_FILE,
            "Org,Contract ID,KP Start,KP End,Workday Hours\n\
             org-1,CT-2024-01,12+350,48+000,10\n\
             org-1,CT-2024-02,0+000,5+000,8\n",
        );
        let source = CsvConfigSource::new(dir.path());

        let terms = source
            .contract(&OrgId::from("org-1"))
            .expect("contract")
            .expect("present");
        assert_eq!(terms.id.as_deref(), Some("CT-2024-01"));
        assert_eq!(terms.kp_start, Some(12.35));
        assert_eq!(terms.kp_end, Some(48.0));
        assert_eq!(terms.standard_workday_hours, Some(10.0));
    }

    #[test]
    fn missing_files_read_as_empty_sources() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = CsvConfigSource::new(dir.path());
        assert!(
            source
                .weld_specs(&OrgId::from("org-1"))
                .expect("specs")
                .is_empty()
        );
        assert!(source.contract(&OrgId::from("org-1")).expect("contract").is_none());
    }
}
