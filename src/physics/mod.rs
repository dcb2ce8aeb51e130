// src/physics/mod.rs
pub mod clustering;

pub use clustering::{band_bounds, cluster_energies, Band, ExcitationCluster, KMeansSettings};
