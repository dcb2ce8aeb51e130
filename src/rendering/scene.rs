// src/rendering/scene.rs

use serde::{Deserialize, Serialize};

/// Shown instead of a level scheme when a nuclide has no usable levels.
pub const NO_DATA_TEXT: &str = "No level data available for this nucleus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nucleon {
  Neutron,
  Proton,
}

impl Nucleon {
  pub fn label(self) -> &'static str {
    match self {
      Nucleon::Neutron => "Neutron",
      Nucleon::Proton => "Proton",
    }
  }
}

// --- Layer 1: background bands ---

/// Hoverable region behind one excitation cluster. `cluster` is the value
/// handed back to the UI when the band is hovered or clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterBand {
  pub cluster: usize,
  pub name: String,
  pub x_range: (f64, f64),
  pub lower: f64,
  pub upper: f64,
  pub fill: Rgb,
  pub opacity: f64,
  pub hoverable: bool,
}

// --- Layer 2: traces ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverMarker {
  pub x: f64,
  pub y: f64,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeparationLine {
  pub nucleon: Nucleon,
  pub name: String,
  pub energy_mev: f64,
  pub x_range: (f64, f64),
  pub color: Rgb,
  pub dashed: bool,
  pub hoverable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
  /// Invisible per-level hover targets.
  States { markers: Vec<HoverMarker> },
  Separation(SeparationLine),
}

// --- Layer 3: level marks ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
  Line { x0: f64, x1: f64, y: f64, color: Rgb },
  Rect { x0: f64, x1: f64, y0: f64, y1: f64, fill: Rgb, opacity: f64 },
}

// --- Axes & annotations ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
  pub value: f64,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
  pub title: String,
  pub range: (f64, f64),
  pub ticks: Vec<Tick>,
  pub show_tick_labels: bool,
  pub show_grid: bool,
  pub interactive: bool,
}

impl Axis {
  pub fn new(title: impl Into<String>, range: (f64, f64)) -> Self {
    Self {
      title: title.into(),
      range,
      ticks: Vec::new(),
      show_tick_labels: true,
      show_grid: true,
      interactive: true,
    }
  }

  fn hidden() -> Self {
    Self {
      title: String::new(),
      range: (0.0, 1.0),
      ticks: Vec::new(),
      show_tick_labels: false,
      show_grid: false,
      interactive: false,
    }
  }
}

/// Free text placed in normalized (0..1) figure coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
  pub text: String,
  pub x: f64,
  pub y: f64,
}

/// Render-ready description of a level scheme.
/// Draw order is bands, then traces, then shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
  pub bands: Vec<ClusterBand>,
  pub traces: Vec<Trace>,
  pub shapes: Vec<Shape>,
  pub x_axis: Axis,
  pub y_axis: Axis,
  pub annotation: Option<Annotation>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneElement<'a> {
  Band(&'a ClusterBand),
  Trace(&'a Trace),
  Shape(&'a Shape),
}

impl Scene {
  pub fn new(x_axis: Axis, y_axis: Axis) -> Self {
    Self {
      bands: Vec::new(),
      traces: Vec::new(),
      shapes: Vec::new(),
      x_axis,
      y_axis,
      annotation: None,
    }
  }

  /// A scene holding only a centred message over non-interactive axes.
  pub fn message(text: impl Into<String>) -> Self {
    let mut scene = Self::new(Axis::hidden(), Axis::hidden());
    scene.annotation = Some(Annotation {
      text: text.into(),
      x: 0.5,
      y: 0.5,
    });
    scene
  }

  pub fn no_data() -> Self {
    Self::message(NO_DATA_TEXT)
  }

  pub fn is_message(&self) -> bool {
    self.annotation.is_some()
  }

  /// Every element bottom to top.
  pub fn elements(&self) -> impl Iterator<Item = SceneElement<'_>> {
    self.bands
      .iter()
      .map(SceneElement::Band)
      .chain(self.traces.iter().map(SceneElement::Trace))
      .chain(self.shapes.iter().map(SceneElement::Shape))
  }

  pub fn markers(&self) -> &[HoverMarker] {
    self.traces
      .iter()
      .find_map(|t| match t {
        Trace::States { markers } => Some(markers.as_slice()),
        _ => None,
      })
      .unwrap_or(&[])
  }

  pub fn separation_line(&self, nucleon: Nucleon) -> Option<&SeparationLine> {
    self.traces.iter().find_map(|t| match t {
      Trace::Separation(line) if line.nucleon == nucleon => Some(line),
      _ => None,
    })
  }

  /// Cluster index of the band covering `energy_mev`, if any.
  pub fn cluster_at(&self, energy_mev: f64) -> Option<usize> {
    self.bands
      .iter()
      .find(|b| energy_mev >= b.lower && energy_mev <= b.upper)
      .map(|b| b.cluster)
  }
}

/// Running min/max of everything that must stay visible vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalExtent {
  pub min: f64,
  pub max: f64,
}

/// Padding used when every tracked value sits at the same energy.
pub const FLAT_PADDING_MEV: f64 = 0.1;

impl VerticalExtent {
  pub fn empty() -> Self {
    Self {
      min: f64::INFINITY,
      max: f64::NEG_INFINITY,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.min > self.max
  }

  pub fn include(&mut self, lo: f64, hi: f64) {
    self.min = self.min.min(lo);
    self.max = self.max.max(hi);
  }

  pub fn padded(&self, fraction: f64) -> (f64, f64) {
    let span = self.max - self.min;
    let pad = if span > 0.0 { span * fraction } else { FLAT_PADDING_MEV };
    (self.min - pad, self.max + pad)
  }
}
