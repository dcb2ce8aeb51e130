// src/utils/report.rs

use crate::model::{element_name, symbol_for_z, GroundState, IsotopeLevels};

const MAX_ROWS: usize = 20;

fn kev(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1} keV", v),
        _ => "n/a".to_string(),
    }
}

/// Text summary of an isotope and the first levels of its scheme
pub fn level_summary(isotope: &IsotopeLevels, ground_state: Option<&GroundState>) -> String {
    let nuclide = &isotope.nuclide;
    // Some tables leave the symbol column blank
    let symbol = match nuclide.symbol.trim() {
        "" => symbol_for_z(nuclide.z).unwrap_or("?"),
        s => s,
    };
    let element = element_name(symbol).unwrap_or("Unknown element");

    let mut out = String::new();
    out.push_str(&format!(
        "Nucleus: {}{} ({}, Z={}, N={})\n",
        nuclide.mass_number(),
        symbol,
        element,
        nuclide.z,
        nuclide.n
    ));

    match ground_state {
        Some(gs) => {
            out.push_str(&format!("Decay: {}\n", gs.common_decay()));
            out.push_str(&format!("Neutron separation: {}\n", kev(gs.neutron_separation_kev)));
            out.push_str(&format!("Proton separation: {}\n", kev(gs.proton_separation_kev)));
        }
        None => out.push_str("No ground-state data.\n"),
    }

    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!("{:<8} {:<10} {:<14} {:<16}\n", "Index", "J^pi", "Energy (keV)", "Half-life"));
    out.push_str("--------------------------------------------------\n");

    for (i, level) in isotope.levels.iter().take(MAX_ROWS).enumerate() {
        let energy = level
            .energy_kev
            .map(|e| format!("{:.2}", e))
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!(
            "{:<8} {:<10} {:<14} {:<16}\n",
            i, level.spin_parity, energy, level.half_life.to_string()
        ));
    }

    if isotope.levels.len() > MAX_ROWS {
        out.push_str(&format!("... and {} more levels.\n", isotope.levels.len() - MAX_ROWS));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnergyLevel, HalfLife, Nuclide};

    fn isotope(count: usize) -> IsotopeLevels {
        let levels = (0..count)
            .map(|i| EnergyLevel::new("2+", Some(100.0 * i as f64), HalfLife::Unknown))
            .collect();
        IsotopeLevels::new(Nuclide::new(6, 6, "C"), levels)
    }

    #[test]
    fn test_summary_header() {
        let mut gs = GroundState::new(Nuclide::new(6, 6, "C"));
        gs.half_life = Some("STABLE".into());
        gs.neutron_separation_kev = Some(18720.7);

        let text = level_summary(&isotope(3), Some(&gs));
        assert!(text.starts_with("Nucleus: 12C (Carbon, Z=6, N=6)"));
        assert!(text.contains("Decay: Stable"));
        assert!(text.contains("Neutron separation: 18720.7 keV"));
        assert!(text.contains("Proton separation: n/a"));
        assert!(!text.contains("more levels"));
    }

    #[test]
    fn test_blank_symbol_from_proton_number() {
        let isotope = IsotopeLevels::new(Nuclide::new(8, 8, ""), vec![]);
        let text = level_summary(&isotope, None);
        assert!(text.starts_with("Nucleus: 16O (Oxygen, Z=8, N=8)"));
    }

    #[test]
    fn test_summary_truncates() {
        let text = level_summary(&isotope(25), None);
        assert!(text.contains("No ground-state data."));
        assert!(text.contains("... and 5 more levels."));
        assert!(text.contains("\n19 "));
        assert!(!text.contains("\n20 "));
    }
}
