// src/state.rs
use crate::config::{LayoutSettings, SchemeStyle};
use crate::io::gallery::{collaborator_names, excitation_label, find_built_image};
use crate::model::{GroundStateTable, IsotopeLevels};
use crate::rendering::{simplified_level_scheme, Scene};
use serde::Serialize;
use std::sync::Arc;

pub const SELECT_PROMPT: &str = "Please click a nucleus to see its levels";
pub const SELECT_TITLE: &str = "Please select a nucleus:";
pub const PLACEHOLDER_CAPTION: &str = "Please select a nucleus to see a block version of it:";
pub const UNDISCOVERED_CAPTION: &str =
    "Hey, it looks like no one has discovered this state yet! Did you make this state?";

/// What the user just did on the chart or the level scheme.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelEvent {
    /// The nuclide chart was redrawn (new filter, new data).
    ChartDataChanged,
    /// A populated chart cell was clicked.
    NucleusSelected(IsotopeLevels),
    /// A chart cell without a nuclide was clicked.
    InvalidNucleus,
    /// An excitation band was hovered on the level scheme.
    ExcitationSelected { cluster: usize },
}

/// Read-only inputs shared by every event.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub ground_states: &'a GroundStateTable,
    pub gallery: &'a [String],
    pub layout: &'a LayoutSettings,
    pub style: &'a SchemeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum BuiltImage {
    Placeholder,
    Undiscovered,
    Built { file: String },
}

/// Everything the level panel shows after an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelView {
    pub scene: Scene,
    pub title: String,
    pub image: BuiltImage,
    pub caption: String,
}

/// Levels of the currently selected isotope. Each event produces a new state.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    levels: Option<Arc<IsotopeLevels>>,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> Option<&IsotopeLevels> {
        self.levels.as_deref()
    }

    /// Returns the next state and the panel update, or `None` when the
    /// panel should be left as it is.
    pub fn handle(&self, event: LevelEvent, ctx: &ViewContext) -> (ViewerState, Option<LevelView>) {
        match event {
            LevelEvent::ChartDataChanged => {
                let view = LevelView {
                    scene: Scene::message(SELECT_PROMPT),
                    title: SELECT_TITLE.to_string(),
                    image: BuiltImage::Placeholder,
                    caption: PLACEHOLDER_CAPTION.to_string(),
                };
                (self.clone(), Some(view))
            }
            LevelEvent::InvalidNucleus => {
                log::debug!("Empty chart cell selected, level panel unchanged");
                (self.clone(), None)
            }
            LevelEvent::NucleusSelected(isotope) => {
                let levels = Arc::new(isotope);
                let view = build_view(&levels, 0, ctx);
                (ViewerState { levels: Some(levels) }, Some(view))
            }
            LevelEvent::ExcitationSelected { cluster } => match &self.levels {
                Some(levels) => (self.clone(), Some(build_view(levels, cluster, ctx))),
                None => (self.clone(), None),
            },
        }
    }
}

fn build_view(isotope: &IsotopeLevels, excitation: usize, ctx: &ViewContext) -> LevelView {
    let nuclide = &isotope.nuclide;
    let scene = simplified_level_scheme(ctx.ground_states, isotope, ctx.layout, ctx.style);
    let title = format!("Level Scheme for {}", nuclide.name());

    let (image, caption) =
        match find_built_image(ctx.gallery, nuclide.mass_number(), &nuclide.symbol, excitation) {
            Some(file) => {
                let label = excitation_label(file).unwrap_or_else(|| "ground state".to_string());
                let caption = format!(
                    "You're currently looking at the {} of: {}\nDiscovered by: {}",
                    label,
                    nuclide.name(),
                    collaborator_names(file)
                );
                (BuiltImage::Built { file: file.to_string() }, caption)
            }
            None => (BuiltImage::Undiscovered, UNDISCOVERED_CAPTION.to_string()),
        };

    LevelView { scene, title, image, caption }
}
