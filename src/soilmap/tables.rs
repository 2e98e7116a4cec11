//! Reference tables resolving a soil-classification code to literal
//! Van Genuchten layers.
//!
//! Three flat CSV files, maintained outside this system:
//! - **soil-code table**: classification code → reference profile id
//! - **profile table**: profile id → per-layer cumulative depth and
//!   soil-unit columns (`iZ1..iZn`, `iSoil1..iSoiln`), with 99999 and
//!   0 marking "not applicable"
//! - **parameter table**: textural-block name → measured Van
//!   Genuchten parameters (`WCr`, `WCs`, `Alpha`, `Lambda`, `Npar`,
//!   `Ksfit`)
//!
//! Sentinel values are converted to typed absence at parse time;
//! nothing downstream compares magic numbers.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::profile::{DepthInterval, LayerProperties, SoilLayer};
use crate::retention::{RetentionError, VanGenuchtenParameters};

/// Soil units 1..=N_TOPSOIL_UNITS are topsoil blocks ("B"); higher
/// units are subsoil blocks ("O"), 1-indexed within their group.
const N_TOPSOIL_UNITS: i64 = 18;

/// Error type for reference-table loading and resolution.
#[derive(Debug, Error)]
pub enum ReferenceTableError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error with line number
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A required column is absent from a table header.
    #[error("missing column {column:?} in {table}")]
    MissingColumn {
        table: &'static str,
        column: String,
    },

    /// Classification code absent from the soil-code table.
    #[error("unknown soil-classification code {0:?}")]
    UnknownCode(String),

    /// Profile id absent from the profile table.
    #[error("unknown reference profile {0}")]
    UnknownProfile(i64),

    /// Profile declares no usable layers.
    #[error("reference profile {0} declares no layers")]
    EmptyProfile(i64),

    /// Declared layer depths do not increase.
    #[error("reference profile {profile}: layer {layer} depth {z_max} does not exceed {z_min}")]
    NonIncreasingDepth {
        profile: i64,
        layer: usize,
        z_min: f64,
        z_max: f64,
    },

    /// A textural block has no row in the parameter table. Treated
    /// as fatal data corruption, never defaulted.
    #[error("no Van Genuchten parameters for textural block {0:?}")]
    MissingBlock(String),

    /// A parameter row is outside the Van Genuchten domain.
    #[error(transparent)]
    Retention(#[from] RetentionError),
}

/// Translate a soil unit to its textural-block name.
pub fn staring_block_name(soil_unit: i64) -> String {
    if soil_unit <= N_TOPSOIL_UNITS {
        format!("B{soil_unit}")
    } else {
        format!("O{}", soil_unit - N_TOPSOIL_UNITS)
    }
}

/// One declared layer of a reference profile.
#[derive(Clone, Copy, Debug)]
struct DeclaredLayer {
    max_depth: f64,
    soil_unit: i64,
}

/// The three reference tables, loaded and indexed.
pub struct ReferenceTables {
    profile_ids: HashMap<String, i64>,
    profiles: HashMap<i64, Vec<DeclaredLayer>>,
    parameters: HashMap<String, VanGenuchtenParameters>,
}

impl ReferenceTables {
    /// Load all three tables.
    pub fn load<P: AsRef<Path>>(
        soil_code_path: P,
        profile_path: P,
        parameter_path: P,
    ) -> Result<Self, ReferenceTableError> {
        let tables = Self {
            profile_ids: load_soil_codes(soil_code_path.as_ref())?,
            profiles: load_profiles(profile_path.as_ref())?,
            parameters: load_parameters(parameter_path.as_ref())?,
        };
        debug!(
            codes = tables.profile_ids.len(),
            profiles = tables.profiles.len(),
            blocks = tables.parameters.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }

    /// Reference profile id for a classification code.
    pub fn profile_id(&self, code: &str) -> Result<i64, ReferenceTableError> {
        self.profile_ids
            .get(code)
            .copied()
            .ok_or_else(|| ReferenceTableError::UnknownCode(code.to_string()))
    }

    /// Van Genuchten parameters for a textural block.
    pub fn block_parameters(
        &self,
        block: &str,
    ) -> Result<&VanGenuchtenParameters, ReferenceTableError> {
        self.parameters
            .get(block)
            .ok_or_else(|| ReferenceTableError::MissingBlock(block.to_string()))
    }

    /// Resolve a classification code to its literal measured layers.
    ///
    /// Layers are contiguous from the surface; declared cumulative
    /// depths become interval bounds. Chemistry uses the fixed
    /// literal block ([`LayerProperties::default`]) since the
    /// reference tables carry no measured chemistry.
    pub fn layers_for_code(&self, code: &str) -> Result<Vec<SoilLayer>, ReferenceTableError> {
        let profile = self.profile_id(code)?;
        let declared = self
            .profiles
            .get(&profile)
            .ok_or(ReferenceTableError::UnknownProfile(profile))?;
        if declared.is_empty() {
            return Err(ReferenceTableError::EmptyProfile(profile));
        }

        let mut layers = Vec::with_capacity(declared.len());
        let mut z_min = 0.0;
        for (index, row) in declared.iter().enumerate() {
            let depth = DepthInterval::new(z_min, row.max_depth).map_err(|_| {
                ReferenceTableError::NonIncreasingDepth {
                    profile,
                    layer: index,
                    z_min,
                    z_max: row.max_depth,
                }
            })?;
            let van_genuchten = *self.block_parameters(&staring_block_name(row.soil_unit))?;
            layers.push(SoilLayer {
                index,
                depth,
                texture: None,
                properties: LayerProperties::default(),
                van_genuchten,
            });
            z_min = row.max_depth;
        }
        Ok(layers)
    }
}

/// Map a raw cell to a value, filtering the "not applicable"
/// sentinels.
fn filter_sentinel(value: f64) -> Option<f64> {
    if value == 99999.0 || value == 0.0 {
        None
    } else {
        Some(value)
    }
}

fn split_line(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn parse_f64(raw: &str, line: usize) -> Result<f64, ReferenceTableError> {
    raw.parse().map_err(|_| ReferenceTableError::Parse {
        line,
        message: format!("expected a number, got {raw:?}"),
    })
}

fn parse_i64(raw: &str, line: usize) -> Result<i64, ReferenceTableError> {
    // Some exports write integer columns as floats.
    parse_f64(raw, line).map(|v| v as i64)
}

struct Header {
    table: &'static str,
    index: HashMap<String, usize>,
}

impl Header {
    fn parse(table: &'static str, line: &str) -> Self {
        let index = split_line(line)
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();
        Self { table, index }
    }

    fn column(&self, name: &str) -> Result<usize, ReferenceTableError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ReferenceTableError::MissingColumn {
                table: self.table,
                column: name.to_string(),
            })
    }

    fn get<'a>(
        &self,
        parts: &[&'a str],
        column: usize,
        line: usize,
    ) -> Result<&'a str, ReferenceTableError> {
        parts
            .get(column)
            .copied()
            .ok_or_else(|| ReferenceTableError::Parse {
                line,
                message: format!("row has {} fields, column {} required", parts.len(), column),
            })
    }
}

fn read_rows(path: &Path) -> Result<Vec<(usize, String)>, ReferenceTableError> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push((i + 1, line));
    }
    Ok(rows)
}

fn load_soil_codes(path: &Path) -> Result<HashMap<String, i64>, ReferenceTableError> {
    let rows = read_rows(path)?;
    let mut iter = rows.into_iter();
    let (_, header_line) = iter.next().ok_or(ReferenceTableError::Parse {
        line: 1,
        message: "empty soil-code table".to_string(),
    })?;
    let header = Header::parse("soil-code table", &header_line);
    let code_col = header.column("BodemCode")?;
    let profile_col = header.column("iProfile")?;

    let mut map = HashMap::new();
    for (line, row) in iter {
        let parts = split_line(&row);
        let code = header.get(&parts, code_col, line)?.to_string();
        let profile = parse_i64(header.get(&parts, profile_col, line)?, line)?;
        map.insert(code, profile);
    }
    Ok(map)
}

fn load_profiles(path: &Path) -> Result<HashMap<i64, Vec<DeclaredLayer>>, ReferenceTableError> {
    let rows = read_rows(path)?;
    let mut iter = rows.into_iter();
    let (_, header_line) = iter.next().ok_or(ReferenceTableError::Parse {
        line: 1,
        message: "empty profile table".to_string(),
    })?;
    let header = Header::parse("profile table", &header_line);
    let id_col = header.column("iProfile")?;

    // Layer columns come in (iZk, iSoilk) pairs, 1-indexed, as many
    // as the header declares.
    let mut layer_cols = Vec::new();
    for k in 1.. {
        match (
            header.column(&format!("iZ{k}")),
            header.column(&format!("iSoil{k}")),
        ) {
            (Ok(depth), Ok(unit)) => layer_cols.push((depth, unit)),
            _ => break,
        }
    }
    if layer_cols.is_empty() {
        return Err(ReferenceTableError::MissingColumn {
            table: "profile table",
            column: "iZ1".to_string(),
        });
    }

    let mut map = HashMap::new();
    for (line, row) in iter {
        let parts = split_line(&row);
        let profile = parse_i64(header.get(&parts, id_col, line)?, line)?;
        let mut declared = Vec::new();
        for &(depth_col, unit_col) in &layer_cols {
            let depth = filter_sentinel(parse_f64(header.get(&parts, depth_col, line)?, line)?);
            let unit = filter_sentinel(parse_f64(header.get(&parts, unit_col, line)?, line)?);
            if let (Some(max_depth), Some(unit)) = (depth, unit) {
                declared.push(DeclaredLayer {
                    max_depth,
                    soil_unit: unit as i64,
                });
            }
        }
        map.insert(profile, declared);
    }
    Ok(map)
}

fn load_parameters(
    path: &Path,
) -> Result<HashMap<String, VanGenuchtenParameters>, ReferenceTableError> {
    let rows = read_rows(path)?;
    let mut iter = rows.into_iter();
    let (_, header_line) = iter.next().ok_or(ReferenceTableError::Parse {
        line: 1,
        message: "empty parameter table".to_string(),
    })?;
    let header = Header::parse("parameter table", &header_line);
    let name_col = header.column("Name")?;
    let theta_r_col = header.column("WCr")?;
    let theta_s_col = header.column("WCs")?;
    let alpha_col = header.column("Alpha")?;
    let lambda_col = header.column("Lambda")?;
    let n_col = header.column("Npar")?;
    let k_sat_col = header.column("Ksfit")?;

    let mut map = HashMap::new();
    for (line, row) in iter {
        let parts = split_line(&row);
        let name = header.get(&parts, name_col, line)?.to_string();
        let parameters = VanGenuchtenParameters::new(
            parse_f64(header.get(&parts, alpha_col, line)?, line)?,
            parse_f64(header.get(&parts, n_col, line)?, line)?,
            parse_f64(header.get(&parts, lambda_col, line)?, line)?,
            parse_f64(header.get(&parts, theta_r_col, line)?, line)?,
            parse_f64(header.get(&parts, theta_s_col, line)?, line)?,
            parse_f64(header.get(&parts, k_sat_col, line)?, line)?,
        )?;
        map.insert(name, parameters);
    }
    Ok(map)
}
