// src/physics/clustering.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Settings for the 1D k-means fit of excitation energies.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansSettings {
    pub clusters: usize,
    /// Independent k-means++ seedings; the lowest total inertia wins.
    pub restarts: usize,
    pub max_iter: usize,
    /// Relative to the variance of the input.
    pub tolerance: f64,
    pub seed: u64,
}

impl Default for KMeansSettings {
    fn default() -> Self {
        Self {
            clusters: 3,
            restarts: 10,
            max_iter: 300,
            tolerance: 1e-4,
            seed: 0,
        }
    }
}

/// One group of excitation energies (MeV). Members are sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcitationCluster {
    pub members: Vec<f64>,
    pub centroid: f64,
    /// Sum of squared distances to the centroid.
    pub inertia: f64,
}

impl ExcitationCluster {
    fn from_members(mut members: Vec<f64>) -> Self {
        members.sort_by(f64::total_cmp);
        let centroid = members.iter().sum::<f64>() / members.len() as f64;
        let inertia = members.iter().map(|x| (x - centroid).powi(2)).sum();
        Self { members, centroid, inertia }
    }

    pub fn min(&self) -> f64 {
        self.members.first().copied().unwrap_or(f64::NAN)
    }

    pub fn max(&self) -> f64 {
        self.members.last().copied().unwrap_or(f64::NAN)
    }
}

/// Vertical extent of one background band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
}

/// Requested cluster count clamped to what the data can support.
pub fn effective_cluster_count(values: &[f64], requested: usize) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    requested.min(values.len()).min(sorted.len())
}

/// Partitions finite `values` into non-empty, energy-contiguous clusters
/// ordered by ascending minimum member.
pub fn cluster_energies(values: &[f64], settings: &KMeansSettings) -> Vec<ExcitationCluster> {
    debug_assert!(values.iter().all(|v| v.is_finite()));

    let k = effective_cluster_count(values, settings.clusters);
    if k == 0 {
        return Vec::new();
    }
    if k < settings.clusters {
        log::debug!(
            "Clamped cluster count from {} to {} for {} energies",
            settings.clusters,
            k,
            values.len()
        );
    }

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut best: Option<(f64, Vec<usize>)> = None;

    for _ in 0..settings.restarts.max(1) {
        let centroids = seed_centroids(values, k, &mut rng);
        let (labels, inertia) = lloyd(values, centroids, settings);
        let better = match &best {
            Some((best_inertia, _)) => inertia < *best_inertia,
            None => true,
        };
        if better {
            best = Some((inertia, labels));
        }
    }

    let labels = match best {
        Some((_, labels)) => labels,
        None => return Vec::new(),
    };

    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); k];
    for (value, &label) in values.iter().zip(&labels) {
        groups[label].push(*value);
    }

    let mut clusters: Vec<ExcitationCluster> = if groups.iter().any(Vec::is_empty) {
        log::debug!("k-means left an empty cluster, splitting at the largest gaps instead");
        split_at_largest_gaps(values, k)
    } else {
        groups.into_iter().map(ExcitationCluster::from_members).collect()
    };

    clusters.sort_by(|a, b| a.min().total_cmp(&b.min()));
    clusters
}

/// Background band for every cluster. Adjacent bands meet at the midpoint
/// between their extreme members; the outer bands reach the axis limits.
pub fn band_bounds(clusters: &[ExcitationCluster], axis: (f64, f64)) -> Vec<Band> {
    let k = clusters.len();
    (0..k)
        .map(|i| {
            let lower = if i == 0 {
                axis.0
            } else {
                midpoint(clusters[i - 1].max(), clusters[i].min())
            };
            let upper = if i + 1 == k {
                axis.1
            } else {
                midpoint(clusters[i].max(), clusters[i + 1].min())
            };
            Band { index: i, lower, upper }
        })
        .collect()
}

fn midpoint(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

// k-means++ seeding
fn seed_centroids(values: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(values[rng.gen_range(0..values.len())]);

    let mut dist: Vec<f64> = values.iter().map(|x| (x - centroids[0]).powi(2)).collect();

    while centroids.len() < k {
        let total: f64 = dist.iter().sum();
        let mut target = rng.gen::<f64>() * total;

        let mut chosen = None;
        for (i, d) in dist.iter().enumerate() {
            if *d <= 0.0 {
                continue;
            }
            if target <= *d {
                chosen = Some(i);
                break;
            }
            target -= d;
        }
        // Rounding can run past the end; take the farthest point then.
        let idx = chosen.unwrap_or_else(|| argmax(&dist));

        let c = values[idx];
        centroids.push(c);
        for (d, x) in dist.iter_mut().zip(values) {
            *d = d.min((x - c).powi(2));
        }
    }
    centroids
}

fn lloyd(values: &[f64], mut centroids: Vec<f64>, settings: &KMeansSettings) -> (Vec<usize>, f64) {
    let k = centroids.len();
    let tol = settings.tolerance * variance(values);
    let mut labels = vec![0usize; values.len()];

    for _ in 0..settings.max_iter {
        assign(values, &centroids, &mut labels);

        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for (x, &l) in values.iter().zip(&labels) {
            sums[l] += x;
            counts[l] += 1;
        }

        let mut shift = 0.0;
        for j in 0..k {
            let next = if counts[j] > 0 {
                sums[j] / counts[j] as f64
            } else {
                // Relocate an empty centroid onto the worst-fitting point
                let residuals: Vec<f64> = values
                    .iter()
                    .zip(&labels)
                    .map(|(x, &l)| (x - centroids[l]).powi(2))
                    .collect();
                values[argmax(&residuals)]
            };
            shift += (next - centroids[j]).powi(2);
            centroids[j] = next;
        }

        if shift <= tol {
            break;
        }
    }

    assign(values, &centroids, &mut labels);
    let inertia = values
        .iter()
        .zip(&labels)
        .map(|(x, &l)| (x - centroids[l]).powi(2))
        .sum();
    (labels, inertia)
}

/// Nearest centroid; ties go to the lower index.
fn assign(values: &[f64], centroids: &[f64], labels: &mut [usize]) {
    for (x, label) in values.iter().zip(labels.iter_mut()) {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for (j, c) in centroids.iter().enumerate() {
            let d = (x - c).abs();
            if d < best_d {
                best = j;
                best_d = d;
            }
        }
        *label = best;
    }
}

/// Deterministic fallback: cut the sorted values at the k-1 widest gaps.
fn split_at_largest_gaps(values: &[f64], k: usize) -> Vec<ExcitationCluster> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut gaps: Vec<(usize, f64)> = sorted.windows(2).map(|w| w[1] - w[0]).enumerate().collect();
    gaps.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut cuts: Vec<usize> = gaps.iter().take(k.saturating_sub(1)).map(|(i, _)| i + 1).collect();
    cuts.sort_unstable();

    let mut clusters = Vec::with_capacity(k);
    let mut start = 0;
    for cut in cuts.into_iter().chain(std::iter::once(sorted.len())) {
        clusters.push(ExcitationCluster::from_members(sorted[start..cut].to_vec()));
        start = cut;
    }
    clusters
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(f64::total_cmp);
        v
    }

    #[test]
    fn test_three_obvious_groups() {
        let values = [4.1, 0.0, 9.0, 0.2, 4.0, 9.3, 0.1, 3.9, 9.1];
        let clusters = cluster_energies(&values, &KMeansSettings::default());

        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].members, vec![0.0, 0.1, 0.2]);
        assert_eq!(clusters[1].members, vec![3.9, 4.0, 4.1]);
        assert_eq!(clusters[2].members, vec![9.0, 9.1, 9.3]);
    }

    #[test]
    fn test_cluster_count_clamped() {
        let two = cluster_energies(&[1.0, 2.0], &KMeansSettings::default());
        assert_eq!(two.len(), 2);

        let repeated = cluster_energies(&[1.5, 1.5, 1.5, 1.5], &KMeansSettings::default());
        assert_eq!(repeated.len(), 1);
        assert_eq!(repeated[0].members.len(), 4);
        assert_eq!(repeated[0].inertia, 0.0);

        assert!(cluster_energies(&[], &KMeansSettings::default()).is_empty());
    }

    #[test]
    fn test_gap_split_fallback() {
        let clusters = split_at_largest_gaps(&[5.0, 0.0, 1.0, 10.0, 11.0], 3);
        let members: Vec<Vec<f64>> = clusters.into_iter().map(|c| c.members).collect();
        assert_eq!(members, vec![vec![0.0, 1.0], vec![5.0], vec![10.0, 11.0]]);
    }

    #[test]
    fn test_band_bounds_single_cluster() {
        let clusters = vec![ExcitationCluster::from_members(vec![1.0, 2.0])];
        let bands = band_bounds(&clusters, (-0.5, 3.5));
        assert_eq!(bands, vec![Band { index: 0, lower: -0.5, upper: 3.5 }]);
    }

    #[test]
    fn test_band_bounds_midpoints() {
        let clusters = vec![
            ExcitationCluster::from_members(vec![0.0, 1.0]),
            ExcitationCluster::from_members(vec![3.0]),
            ExcitationCluster::from_members(vec![6.0, 8.0]),
        ];
        let bands = band_bounds(&clusters, (-1.0, 9.0));
        assert_eq!(bands[0].lower, -1.0);
        assert_eq!(bands[0].upper, 2.0);
        assert_eq!(bands[1].lower, 2.0);
        assert_eq!(bands[1].upper, 4.5);
        assert_eq!(bands[2].lower, 4.5);
        assert_eq!(bands[2].upper, 9.0);
    }

    #[test]
    fn test_same_seed_same_result() {
        let values: Vec<f64> = (0..40).map(|i| ((i * 37) % 23) as f64 * 0.31).collect();
        let a = cluster_energies(&values, &KMeansSettings::default());
        let b = cluster_energies(&values, &KMeansSettings::default());
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_clusters_partition_input(
            values in prop::collection::vec(0.0f64..20.0, 1..50),
            k in 1usize..6,
        ) {
            let settings = KMeansSettings { clusters: k, ..KMeansSettings::default() };
            let clusters = cluster_energies(&values, &settings);

            prop_assert_eq!(clusters.len(), effective_cluster_count(&values, k));
            prop_assert!(clusters.iter().all(|c| !c.members.is_empty()));

            let joined: Vec<f64> = clusters.iter().flat_map(|c| c.members.clone()).collect();
            prop_assert_eq!(sorted(joined), sorted(values.clone()));

            // contiguous in energy and ordered
            for pair in clusters.windows(2) {
                prop_assert!(pair[0].max() < pair[1].min());
            }
        }

        #[test]
        fn prop_bands_tile_the_axis(
            values in prop::collection::vec(0.0f64..20.0, 1..50),
            k in 1usize..6,
        ) {
            let settings = KMeansSettings { clusters: k, ..KMeansSettings::default() };
            let clusters = cluster_energies(&values, &settings);
            let axis = (-2.0, 22.0);
            let bands = band_bounds(&clusters, axis);

            prop_assert_eq!(bands.first().unwrap().lower, axis.0);
            prop_assert_eq!(bands.last().unwrap().upper, axis.1);
            for pair in bands.windows(2) {
                prop_assert_eq!(pair[0].upper, pair[1].lower);
            }
            for band in &bands {
                prop_assert!(band.lower <= band.upper);
            }
        }
    }
}
