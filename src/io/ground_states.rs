// src/io/ground_states.rs

use super::csv_reader;
use crate::error::Result;
use crate::model::{GroundState, GroundStateTable, Nuclide};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct GroundStateRow {
    z: u32,
    n: u32,
    #[serde(default)]
    symbol: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    sn: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    sp: Option<f64>,
    #[serde(default)]
    half_life: Option<String>,
    #[serde(default)]
    unit_hl: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    half_life_sec: Option<f64>,
    #[serde(default)]
    decay_1: Option<String>,
}

impl From<GroundStateRow> for GroundState {
    fn from(row: GroundStateRow) -> Self {
        GroundState {
            nuclide: Nuclide::new(row.z, row.n, row.symbol),
            neutron_separation_kev: row.sn,
            proton_separation_kev: row.sp,
            half_life: row.half_life,
            half_life_unit: row.unit_hl,
            half_life_sec: row.half_life_sec,
            decay_mode: row.decay_1,
        }
    }
}

/// Reads the ground-state table. A later row for the same (Z, N) wins.
pub fn read_ground_states<R: Read>(rdr: R) -> Result<GroundStateTable> {
    let mut reader = csv_reader(rdr);
    let mut table = GroundStateTable::new();

    for (line, result) in reader.deserialize::<GroundStateRow>().enumerate() {
        match result {
            Ok(row) => table.insert(row.into()),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => log::warn!("Skipping ground-state row {}: {}", line + 1, e),
        }
    }

    Ok(table)
}

pub fn load_ground_states(path: &Path) -> Result<GroundStateTable> {
    let file = File::open(path)?;
    let table = read_ground_states(file)?;
    log::info!("Loaded {} ground states from {:?}", table.len(), path);
    Ok(table)
}
