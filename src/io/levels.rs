// src/io/levels.rs

use super::csv_reader;
use crate::error::Result;
use crate::model::{EnergyLevel, HalfLife, IsotopeLevels, Nuclide};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of the level table. Unused provider columns are ignored.
#[derive(Debug, Deserialize)]
struct LevelRow {
    z: u32,
    n: u32,
    #[serde(default)]
    symbol: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    energy: Option<f64>,
    #[serde(default)]
    jp: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    half_life: Option<f64>,
    #[serde(default)]
    unit_hl: Option<String>,
}

impl LevelRow {
    fn into_level(self) -> (Nuclide, EnergyLevel) {
        let half_life = HalfLife::from_parts(self.half_life, self.unit_hl.as_deref());
        let level = EnergyLevel::new(self.jp.unwrap_or_default(), self.energy, half_life);
        (Nuclide::new(self.z, self.n, self.symbol), level)
    }
}

/// Reads a level table, grouping rows per nuclide in order of first appearance.
pub fn read_levels<R: Read>(rdr: R) -> Result<Vec<IsotopeLevels>> {
    let mut reader = csv_reader(rdr);
    let mut isotopes: Vec<IsotopeLevels> = Vec::new();
    let mut index: HashMap<(u32, u32), usize> = HashMap::new();

    for (line, result) in reader.deserialize::<LevelRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping level row {}: {}", line + 1, e);
                continue;
            }
        };

        let (nuclide, level) = row.into_level();
        let key = (nuclide.z, nuclide.n);
        match index.get(&key) {
            Some(&i) => isotopes[i].levels.push(level),
            None => {
                index.insert(key, isotopes.len());
                isotopes.push(IsotopeLevels::new(nuclide, vec![level]));
            }
        }
    }

    log::debug!("Read levels for {} nuclides", isotopes.len());
    Ok(isotopes)
}

pub fn load_levels(path: &Path) -> Result<Vec<IsotopeLevels>> {
    let file = File::open(path)?;
    let isotopes = read_levels(file)?;
    log::info!("Loaded {} nuclides from {:?}", isotopes.len(), path);
    Ok(isotopes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WidthUnit;
    use std::io::Write;

    const SAMPLE: &str = "\
z,n,symbol,energy,unc_e,jp,half_life,unit_hl
6,6,C,0.0,,0+,STABLE,
6,6,C, 4439.82 ,0.21,2+,10.8,fs
6,6,C,9641,5,3-,46,keV
1,0,H,0,,1/2+,STABLE,
6,6,C,?,,(4+),,
";

    #[test]
    fn test_groups_in_file_order() {
        let isotopes = read_levels(SAMPLE.as_bytes()).unwrap();
        assert_eq!(isotopes.len(), 2);
        assert_eq!(isotopes[0].nuclide.name(), "12C");
        assert_eq!(isotopes[0].levels.len(), 4);
        assert_eq!(isotopes[1].nuclide.name(), "1H");
    }

    #[test]
    fn test_cell_conversion() {
        let isotopes = read_levels(SAMPLE.as_bytes()).unwrap();
        let c12 = &isotopes[0].levels;

        assert_eq!(c12[0].half_life, HalfLife::Unknown);
        assert_eq!(c12[1].energy_kev, Some(4439.82));
        assert_eq!(c12[1].half_life, HalfLife::Time { value: Some(10.8), unit: "fs".into() });
        assert_eq!(c12[2].half_life, HalfLife::Width { value: Some(46.0), unit: WidthUnit::Kev });
        assert_eq!(c12[3].energy_kev, None);
        assert!(c12[3].has_tentative_spin_parity());
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let csv = "z,n,symbol,energy,jp,half_life,unit_hl\nsix,6,C,0,0+,,\n6,6,C,0,0+,,\n";
        let isotopes = read_levels(csv.as_bytes()).unwrap();
        assert_eq!(isotopes.len(), 1);
        assert_eq!(isotopes[0].levels.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let isotopes = load_levels(file.path()).unwrap();
        assert_eq!(isotopes.len(), 2);

        assert!(load_levels(Path::new("/nonexistent/levels.csv")).is_err());
    }
}
