// src/rendering/mod.rs
pub mod export;
pub mod level_glyph;
pub mod level_scheme;
pub mod overlay;
pub mod scene;
pub mod slots;

// Re-export the layout entry points and the scene vocabulary
pub use export::{export_svg, render_svg};
pub use level_scheme::{detailed_level_scheme, simplified_level_scheme};
pub use scene::{
  Axis, ClusterBand, HoverMarker, Nucleon, Rgb, Scene, SceneElement, SeparationLine, Shape,
  Trace, NO_DATA_TEXT,
};
