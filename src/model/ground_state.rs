// src/model/ground_state.rs

use super::level::Nuclide;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ground-state record of one nuclide. Missing provider values are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundState {
    pub nuclide: Nuclide,
    pub neutron_separation_kev: Option<f64>,
    pub proton_separation_kev: Option<f64>,
    pub half_life: Option<String>,
    pub half_life_unit: Option<String>,
    pub half_life_sec: Option<f64>,
    pub decay_mode: Option<String>,
}

impl GroundState {
    pub fn new(nuclide: Nuclide) -> Self {
        Self {
            nuclide,
            neutron_separation_kev: None,
            proton_separation_kev: None,
            half_life: None,
            half_life_unit: None,
            half_life_sec: None,
            decay_mode: None,
        }
    }

    pub fn is_stable(&self) -> bool {
        self.half_life
            .as_deref()
            .map(|hl| hl.trim().eq_ignore_ascii_case("STABLE"))
            .unwrap_or(false)
    }

    /// log10 of the half-life in seconds; 0 when not available.
    pub fn log_half_life(&self) -> f64 {
        match self.half_life_sec {
            Some(t) if t.is_finite() && t > 0.0 => t.log10(),
            _ => 0.0,
        }
    }

    /// Primary decay mode reduced to its most common first step.
    pub fn common_decay(&self) -> String {
        if self.is_stable() {
            return "Stable".to_string();
        }
        let mode = self.decay_mode.as_deref().map(str::trim).unwrap_or("");
        let reduced = match mode {
            "" => "Not Available",
            "EC+B+" | "ECP+EC2P" | "2EC" | "ECP" => "EC",
            "B+P" | "2B+" => "B+",
            "B-N" | "B-2N" | "IT" => "B-",
            "ECSF" => "SF",
            other => other,
        };
        reduced.to_string()
    }
}

/// Separation energies of one nuclide, keV.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeparationEnergies {
    pub neutron_kev: Option<f64>,
    pub proton_kev: Option<f64>,
}

/// Ground states keyed by (Z, N).
#[derive(Debug, Clone, Default)]
pub struct GroundStateTable {
    entries: HashMap<(u32, u32), GroundState>,
}

impl GroundStateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, state: GroundState) {
        self.entries.insert((state.nuclide.z, state.nuclide.n), state);
    }

    pub fn get(&self, z: u32, n: u32) -> Option<&GroundState> {
        self.entries.get(&(z, n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unknown nuclides simply have no separation energies.
    pub fn separation_energies(&self, nuclide: &Nuclide) -> SeparationEnergies {
        self.get(nuclide.z, nuclide.n)
            .map(|gs| SeparationEnergies {
                neutron_kev: gs.neutron_separation_kev,
                proton_kev: gs.proton_separation_kev,
            })
            .unwrap_or_default()
    }
}

impl FromIterator<GroundState> for GroundStateTable {
    fn from_iter<I: IntoIterator<Item = GroundState>>(iter: I) -> Self {
        let mut table = GroundStateTable::new();
        for state in iter {
            table.insert(state);
        }
        table
    }
}
