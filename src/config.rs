// src/config.rs

use crate::error::Result;
use crate::physics::clustering::KMeansSettings;
use crate::rendering::scene::Rgb;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// --- LayoutSettings ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
  /// Half-width of a level line around its slot.
  pub xstep: f64,
  pub cluster_count: usize,
  pub max_levels: usize,
  /// Fraction of the energy span added above and below.
  pub padding_fraction: f64,
  pub cluster_seed: u64,
  pub cluster_restarts: usize,
  pub cluster_max_iter: usize,
}

impl Default for LayoutSettings {
  fn default() -> Self {
    Self {
      xstep: 0.25,
      cluster_count: 3,
      max_levels: 50,
      padding_fraction: 0.1,
      cluster_seed: 0,
      cluster_restarts: 10,
      cluster_max_iter: 300,
    }
  }
}

impl LayoutSettings {
  pub fn kmeans(&self) -> KMeansSettings {
    KMeansSettings {
      clusters: self.cluster_count,
      restarts: self.cluster_restarts,
      max_iter: self.cluster_max_iter,
      seed: self.cluster_seed,
      ..KMeansSettings::default()
    }
  }
}

// --- SchemeStyle ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeStyle {
  pub level_color: Rgb,
  pub uncertain_level_color: Rgb,
  pub width_color: Rgb,
  pub width_opacity: f64,
  pub neutron_color: Rgb,
  pub proton_color: Rgb,
  pub band_palette: Vec<Rgb>,
  pub band_opacity: f64,
}

impl Default for SchemeStyle {
  fn default() -> Self {
    Self {
      level_color: Rgb(0, 0, 0),
      uncertain_level_color: Rgb(128, 128, 128),
      width_color: Rgb(128, 128, 128),
      width_opacity: 0.25,
      neutron_color: Rgb(0, 0, 255),
      proton_color: Rgb(255, 0, 0),
      band_palette: vec![
        Rgb(99, 110, 250),
        Rgb(0, 204, 150),
        Rgb(171, 99, 250),
        Rgb(255, 161, 90),
        Rgb(25, 211, 243),
      ],
      band_opacity: 0.2,
    }
  }
}

impl SchemeStyle {
  pub fn band_color(&self, index: usize) -> Rgb {
    if self.band_palette.is_empty() {
      return self.width_color;
    }
    self.band_palette[index % self.band_palette.len()]
  }
}

// --- ExportSettings ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
  pub width: u32,
  pub height: u32,
}

impl Default for ExportSettings {
  fn default() -> Self {
    Self { width: 800, height: 600 }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Config {
  #[serde(default)]
  pub layout: LayoutSettings,

  #[serde(default)]
  pub style: SchemeStyle,

  #[serde(default)]
  pub export: ExportSettings,
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/nview/settings.json)
  pub fn load() -> (Self, String) {
    let path = Self::get_path();
    if path.exists() {
      match Self::from_path(&path) {
        Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
        Err(e) => (Self::default(), format!("Error reading config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    let path = Self::get_path();
    match self.to_path(&path) {
      Ok(()) => format!("Config saved to {:?}", path),
      Err(e) => format!("Failed to save config: {}", e),
    }
  }

  pub fn from_path(path: &Path) -> Result<Self> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
  }

  pub fn to_path(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self)?;
    Ok(())
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "nview", "nview") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_config_fills_defaults() {
    let json = r#"{ "layout": { "cluster_count": 5 } }"#;
    let cfg: Config = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.layout.cluster_count, 5);
    assert_eq!(cfg.layout.max_levels, 50);
    assert_eq!(cfg.layout.xstep, 0.25);
    assert_eq!(cfg.export, ExportSettings::default());
    assert_eq!(cfg.style, SchemeStyle::default());
  }

  #[test]
  fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut cfg = Config::default();
    cfg.layout.max_levels = 20;
    cfg.style.band_opacity = 0.4;
    cfg.to_path(&path).unwrap();

    let back = Config::from_path(&path).unwrap();
    assert_eq!(back, cfg);
  }

  #[test]
  fn test_band_palette_cycles() {
    let style = SchemeStyle::default();
    assert_eq!(style.band_color(0), style.band_color(style.band_palette.len()));
    let empty = SchemeStyle { band_palette: vec![], ..SchemeStyle::default() };
    assert_eq!(empty.band_color(3), empty.width_color);
  }
}
