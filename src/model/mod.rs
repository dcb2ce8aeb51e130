//src/model/mod.rs
pub mod elements;
pub mod ground_state;
pub mod level;

// Re-exports for cleaner imports
pub use elements::{element_name, symbol_for_z};
pub use ground_state::{GroundState, GroundStateTable, SeparationEnergies};
pub use level::{EnergyLevel, HalfLife, IsotopeLevels, Nuclide, WidthUnit, KEV_TO_MEV};
