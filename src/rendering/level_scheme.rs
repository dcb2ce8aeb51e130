// src/rendering/level_scheme.rs

use crate::config::{LayoutSettings, SchemeStyle};
use crate::model::{EnergyLevel, GroundStateTable, IsotopeLevels, Nuclide};
use crate::physics::clustering::{band_bounds, cluster_energies};
use crate::rendering::level_glyph::draw_level;
use crate::rendering::overlay::{plot_separation_energy, separation_energy_mev};
use crate::rendering::scene::{
  Axis, ClusterBand, HoverMarker, Nucleon, Scene, Trace, VerticalExtent,
};
use crate::rendering::slots::SlotMap;

/// Level scheme grouped into excitation bands: at most `max_levels`
/// levels, coloured background bands per cluster, separation energies.
pub fn simplified_level_scheme(
  ground_states: &GroundStateTable,
  isotope: &IsotopeLevels,
  settings: &LayoutSettings,
  style: &SchemeStyle,
) -> Scene {
  let capped = cap_levels(&isotope.levels, settings.max_levels);
  let placed = with_energies(capped);
  if placed.is_empty() {
    log::debug!("{}: no level with a defined energy", isotope.nuclide.name());
    return Scene::no_data();
  }

  let mut scene = draw_scheme(ground_states, &isotope.nuclide, &placed, settings, style);

  // Background bands, one per excitation cluster
  let energies: Vec<f64> = placed.iter().map(|(_, e)| *e).collect();
  let clusters = cluster_energies(&energies, &settings.kmeans());
  let x_range = scene.x_axis.range;
  scene.bands = band_bounds(&clusters, scene.y_axis.range)
    .into_iter()
    .map(|band| ClusterBand {
      cluster: band.index,
      name: format!("Excitation group {}", band.index),
      x_range,
      lower: band.lower,
      upper: band.upper,
      fill: style.band_color(band.index),
      opacity: style.band_opacity,
      hoverable: true,
    })
    .collect();

  log::debug!(
    "{}: {} of {} levels in {} bands",
    isotope.nuclide.name(),
    placed.len(),
    isotope.levels.len(),
    scene.bands.len()
  );
  scene
}

/// Every level with a known energy, no capping and no cluster bands.
pub fn detailed_level_scheme(
  ground_states: &GroundStateTable,
  isotope: &IsotopeLevels,
  settings: &LayoutSettings,
  style: &SchemeStyle,
) -> Scene {
  let placed = with_energies(isotope.levels.iter().collect());
  if placed.is_empty() {
    return Scene::no_data();
  }
  draw_scheme(ground_states, &isotope.nuclide, &placed, settings, style)
}

/// Limits the level list to `max_levels`. Over the cap, every level with a
/// tentative spin-parity is dropped; if that is not enough the lowest-energy
/// levels are kept. Survivors stay in input order.
pub fn cap_levels(levels: &[EnergyLevel], max_levels: usize) -> Vec<&EnergyLevel> {
  if levels.len() <= max_levels {
    return levels.iter().collect();
  }

  // 1. Tentative assignments
  let mut firm: Vec<&EnergyLevel> = levels
    .iter()
    .filter(|l| !l.has_tentative_spin_parity())
    .collect();

  // 2. Lowest energies win
  if firm.len() > max_levels {
    let energy_key = |l: &EnergyLevel| l.energy_kev.filter(|e| e.is_finite()).unwrap_or(f64::INFINITY);
    let mut order: Vec<usize> = (0..firm.len()).collect();
    order.sort_by(|&a, &b| energy_key(firm[a]).total_cmp(&energy_key(firm[b])));
    let mut keep = vec![false; firm.len()];
    for &i in &order[..max_levels] {
      keep[i] = true;
    }
    firm = firm
      .into_iter()
      .zip(keep)
      .filter_map(|(level, k)| k.then_some(level))
      .collect();
  }

  log::debug!("Capped {} levels to {}", levels.len(), firm.len());
  firm
}

fn with_energies(levels: Vec<&EnergyLevel>) -> Vec<(&EnergyLevel, f64)> {
  levels
    .into_iter()
    .filter_map(|l| l.energy_mev().map(|e| (l, e)))
    .collect()
}

fn draw_scheme(
  ground_states: &GroundStateTable,
  nuclide: &Nuclide,
  placed: &[(&EnergyLevel, f64)],
  settings: &LayoutSettings,
  style: &SchemeStyle,
) -> Scene {
  // 1. One column per spin-parity
  let slots = SlotMap::from_levels(placed.iter().map(|(level, _)| *level));
  let x_pad = 2.0 * settings.xstep;
  let x_range = (-x_pad, slots.len().saturating_sub(1) as f64 + x_pad);

  // 2. Level marks and hover targets
  let mut extent = VerticalExtent::empty();
  let mut shapes = Vec::new();
  let mut markers = Vec::with_capacity(placed.len());
  for (level, energy) in placed {
    let Some(slot) = slots.slot(&level.spin_parity) else {
      continue;
    };
    let glyph = draw_level(*energy, &level.half_life, slot, settings.xstep, style);
    extent.include(glyph.extent.0, glyph.extent.1);
    shapes.extend(glyph.shapes);
    markers.push(HoverMarker {
      x: slot as f64,
      y: *energy,
      text: format!("{}: {:.3} MeV", level.spin_parity, energy),
    });
  }

  // 3. Separation energies must stay in view
  let separation = ground_states.separation_energies(nuclide);
  for e in [separation.neutron_kev, separation.proton_kev]
    .into_iter()
    .filter_map(separation_energy_mev)
  {
    extent.include(e, e);
  }

  // 4. Axes
  let mut x_axis = Axis::new("State", x_range);
  x_axis.ticks = slots.ticks();
  let y_axis = Axis::new("Energy (MeV)", extent.padded(settings.padding_fraction));

  let mut scene = Scene::new(x_axis, y_axis);
  scene.traces.push(Trace::States { markers });
  plot_separation_energy(&mut scene, separation.neutron_kev, Nucleon::Neutron, style.neutron_color);
  plot_separation_energy(&mut scene, separation.proton_kev, Nucleon::Proton, style.proton_color);
  scene.shapes = shapes;
  scene
}
