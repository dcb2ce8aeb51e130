// src/io/mod.rs
pub mod gallery;
pub mod ground_states;
pub mod levels;

pub use gallery::{collaborator_names, excitation_label, find_built_image};
pub use ground_states::{load_ground_states, read_ground_states};
pub use levels::{load_levels, read_levels};

use std::io::Read;

/// Provider tables pad their cells and may omit trailing columns.
fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr)
}
