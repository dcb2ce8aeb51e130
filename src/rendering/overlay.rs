// src/rendering/overlay.rs

use crate::model::KEV_TO_MEV;
use crate::rendering::scene::{Nucleon, Rgb, Scene, SeparationLine, Trace};

/// Separation energy in MeV if the provider value is a usable number.
pub fn separation_energy_mev(energy_kev: Option<f64>) -> Option<f64> {
    energy_kev.filter(|e| e.is_finite()).map(|e| e * KEV_TO_MEV)
}

/// Adds a dashed, full-width reference line for a nucleon separation energy.
/// Missing values are skipped silently. Returns whether a line was drawn.
pub fn plot_separation_energy(
    scene: &mut Scene,
    energy_kev: Option<f64>,
    nucleon: Nucleon,
    color: Rgb,
) -> bool {
    let Some(energy_mev) = separation_energy_mev(energy_kev) else {
        log::debug!("No {} separation energy, overlay omitted", nucleon.label());
        return false;
    };

    scene.traces.push(Trace::Separation(SeparationLine {
        nucleon,
        name: format!("{} Separation Energy", nucleon.label()),
        energy_mev,
        x_range: scene.x_axis.range,
        color,
        dashed: true,
        hoverable: false,
    }));
    true
}
