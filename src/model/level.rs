// src/model/level.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source tables report energies in keV, the level scheme is drawn in MeV.
pub const KEV_TO_MEV: f64 = 1.0e-3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nuclide {
    pub z: u32,
    pub n: u32,
    pub symbol: String,
}

impl Nuclide {
    pub fn new(z: u32, n: u32, symbol: impl Into<String>) -> Self {
        Self { z, n, symbol: symbol.into() }
    }

    pub fn mass_number(&self) -> u32 {
        self.z + self.n
    }

    /// Compact isotope name, e.g. "12C".
    pub fn name(&self) -> String {
        format!("{}{}", self.mass_number(), self.symbol)
    }
}

/// Energy units a decay width Γ may be quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidthUnit {
    Ev,
    Kev,
    Mev,
}

impl WidthUnit {
    /// Anything that is not eV/keV/MeV is not a width.
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw.split_whitespace().collect();
        match compact.as_str() {
            "eV" => Some(WidthUnit::Ev),
            "keV" => Some(WidthUnit::Kev),
            "MeV" => Some(WidthUnit::Mev),
            _ => None,
        }
    }

    pub fn to_mev(self, value: f64) -> f64 {
        match self {
            WidthUnit::Ev => value * 1.0e-6,
            WidthUnit::Kev => value * 1.0e-3,
            WidthUnit::Mev => value,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WidthUnit::Ev => "eV",
            WidthUnit::Kev => "keV",
            WidthUnit::Mev => "MeV",
        }
    }
}

/// Half-life of a level as delivered by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HalfLife {
    /// No unit given: the lifetime is not known.
    Unknown,
    /// A genuine time (s, ms, y, ...).
    Time { value: Option<f64>, unit: String },
    /// A decay width quoted in an energy unit.
    Width { value: Option<f64>, unit: WidthUnit },
}

impl HalfLife {
    pub fn from_parts(value: Option<f64>, unit: Option<&str>) -> Self {
        match unit.map(str::trim).filter(|u| !u.is_empty()) {
            None => HalfLife::Unknown,
            Some(u) => match WidthUnit::parse(u) {
                Some(width_unit) => HalfLife::Width { value, unit: width_unit },
                None => HalfLife::Time { value, unit: u.to_string() },
            },
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, HalfLife::Unknown)
    }

    /// Γ in MeV, only when a usable width was measured.
    pub fn width_mev(&self) -> Option<f64> {
        match self {
            HalfLife::Width { value: Some(v), unit } if v.is_finite() && *v >= 0.0 => {
                Some(unit.to_mev(*v))
            }
            _ => None,
        }
    }
}

impl fmt::Display for HalfLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalfLife::Unknown => write!(f, "?"),
            HalfLife::Time { value: Some(v), unit } => write!(f, "{} {}", v, unit),
            HalfLife::Time { value: None, unit } => write!(f, "{}", unit),
            HalfLife::Width { value: Some(v), unit } => write!(f, "Γ={} {}", v, unit.as_str()),
            HalfLife::Width { value: None, unit } => write!(f, "Γ=? {}", unit.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyLevel {
    pub spin_parity: String,
    pub energy_kev: Option<f64>,
    pub half_life: HalfLife,
}

impl EnergyLevel {
    pub fn new(spin_parity: impl Into<String>, energy_kev: Option<f64>, half_life: HalfLife) -> Self {
        Self {
            spin_parity: spin_parity.into(),
            energy_kev,
            half_life,
        }
    }

    pub fn energy_mev(&self) -> Option<f64> {
        self.energy_kev.filter(|e| e.is_finite()).map(|e| e * KEV_TO_MEV)
    }

    /// Tentative assignments are written in parentheses, e.g. "(3/2-)".
    pub fn has_tentative_spin_parity(&self) -> bool {
        self.spin_parity.contains('(') || self.spin_parity.contains(')')
    }
}

/// All levels reported for one nuclide, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotopeLevels {
    pub nuclide: Nuclide,
    pub levels: Vec<EnergyLevel>,
}

impl IsotopeLevels {
    pub fn new(nuclide: Nuclide, levels: Vec<EnergyLevel>) -> Self {
        Self { nuclide, levels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_units_fail_closed() {
        assert_eq!(WidthUnit::parse("keV"), Some(WidthUnit::Kev));
        assert_eq!(WidthUnit::parse(" M eV "), Some(WidthUnit::Mev));
        assert_eq!(WidthUnit::parse("ms"), None);
        assert_eq!(WidthUnit::parse("GeV"), None);
    }

    #[test]
    fn test_half_life_classification() {
        assert_eq!(HalfLife::from_parts(Some(1.0), None), HalfLife::Unknown);
        assert_eq!(HalfLife::from_parts(Some(1.0), Some("  ")), HalfLife::Unknown);
        assert!(matches!(HalfLife::from_parts(Some(2.5), Some("ps")), HalfLife::Time { .. }));

        let width = HalfLife::from_parts(Some(50.0), Some("keV"));
        assert!((width.width_mev().unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_width_without_value_is_not_a_band() {
        let hl = HalfLife::from_parts(None, Some("eV"));
        assert!(hl.is_known());
        assert_eq!(hl.width_mev(), None);
    }

    #[test]
    fn test_tentative_spin_parity() {
        let firm = EnergyLevel::new("3/2-", Some(0.0), HalfLife::Unknown);
        let tentative = EnergyLevel::new("(5/2+)", Some(120.0), HalfLife::Unknown);
        assert!(!firm.has_tentative_spin_parity());
        assert!(tentative.has_tentative_spin_parity());
    }

    #[test]
    fn test_energy_conversion() {
        let level = EnergyLevel::new("2+", Some(4438.9), HalfLife::Unknown);
        assert!((level.energy_mev().unwrap() - 4.4389).abs() < 1e-12);
        let missing = EnergyLevel::new("2+", None, HalfLife::Unknown);
        assert_eq!(missing.energy_mev(), None);
        assert_eq!(Nuclide::new(6, 6, "C").name(), "12C");
    }
}
