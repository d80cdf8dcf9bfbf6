//! Synthetic "embedding-like" cluster sampling.
//!
//! Each cluster has a fixed centre and a list of seed words. Points are drawn
//! around the centre with Gaussian jitter: first one per seed word, then
//! synthetic ones (`ani_000`, `ani_001`, ...) until the cluster is full.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::config::ClusterConfig;
use crate::data::ClusterPoint;
use crate::{EmbedplotError, Result};

/// A named cluster centre with human-readable seed labels
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSpec {
    pub name: String,
    pub center: (f64, f64),
    pub seed_labels: Vec<String>,
}

impl ClusterSpec {
    pub fn new(name: impl Into<String>, center: (f64, f64), seed_labels: &[&str]) -> Self {
        Self {
            name: name.into(),
            center,
            seed_labels: seed_labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Label for the `index`-th synthetic point: first three characters of
    /// the cluster name, lowercased, then a zero-padded counter.
    pub fn synthetic_label(&self, index: usize) -> String {
        let prefix: String = self.name.chars().take(3).collect::<String>().to_lowercase();
        format!("{}_{:03}", prefix, index)
    }
}

/// The five stock clusters
pub fn default_clusters() -> Vec<ClusterSpec> {
    vec![
        ClusterSpec::new(
            "Animals",
            (2.5, 3.2),
            &["cat", "dog", "fox", "horse", "lion", "tiger", "mouse", "wolf"],
        ),
        ClusterSpec::new(
            "Vehicles",
            (-3.2, -2.4),
            &["car", "truck", "bike", "train", "plane", "boat", "scooter", "bus"],
        ),
        ClusterSpec::new(
            "Tech",
            (3.6, -2.0),
            &["server", "cloud", "api", "python", "docker", "kubernetes", "azure", "m365"],
        ),
        ClusterSpec::new(
            "Food",
            (-2.2, 3.4),
            &["pizza", "pasta", "salad", "bread", "soup", "coffee", "tea", "burger"],
        ),
        ClusterSpec::new(
            "Places",
            (0.5, -3.6),
            &["london", "paris", "tokyo", "nyc", "sydney", "berlin", "madrid", "rome"],
        ),
    ]
}

/// Sampler settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    pub seed: u64,
    pub points_per_cluster: usize,
    pub jitter: f64,
}

impl From<&ClusterConfig> for SamplerConfig {
    fn from(config: &ClusterConfig) -> Self {
        Self {
            seed: config.seed,
            points_per_cluster: config.points_per_cluster,
            jitter: config.jitter,
        }
    }
}

/// Seeded Gaussian sampler around cluster centres
pub struct ClusterSampler {
    rng: StdRng,
    noise: Normal<f64>,
    points_per_cluster: usize,
}

impl ClusterSampler {
    /// Create a sampler.
    ///
    /// # Errors
    /// `ValidationError` if the jitter is negative or not finite.
    pub fn new(config: SamplerConfig) -> Result<Self> {
        if !config.jitter.is_finite() || config.jitter < 0.0 {
            return Err(EmbedplotError::ValidationError(format!(
                "Jitter must be a finite, non-negative number, got {}",
                config.jitter
            )));
        }
        let noise = Normal::new(0.0, config.jitter).map_err(|e| {
            EmbedplotError::ValidationError(format!("Invalid jitter {}: {}", config.jitter, e))
        })?;

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            noise,
            points_per_cluster: config.points_per_cluster,
        })
    }

    /// Draw one point around a centre: x ~ N(cx, jitter), y ~ N(cy, jitter)
    pub fn sample_point(&mut self, center: (f64, f64)) -> (f64, f64) {
        let x = center.0 + self.noise.sample(&mut self.rng);
        let y = center.1 + self.noise.sample(&mut self.rng);
        (x, y)
    }

    /// Sample every cluster in order.
    ///
    /// Each cluster gets exactly `points_per_cluster` points. Seed labels are
    /// used first; when there are more seed labels than points, the extra
    /// seed labels are dropped.
    ///
    /// # Errors
    /// `ValidationError` if a cluster repeats a seed label or the total point
    /// count overflows.
    pub fn sample(&mut self, clusters: &[ClusterSpec]) -> Result<Vec<ClusterPoint>> {
        let total = clusters
            .len()
            .checked_mul(self.points_per_cluster)
            .ok_or_else(|| {
                EmbedplotError::ValidationError(format!(
                    "Too many points: {} clusters of {} points",
                    clusters.len(),
                    self.points_per_cluster
                ))
            })?;
        let mut data = Vec::with_capacity(total);

        for cluster in clusters {
            check_unique_seed_labels(cluster)?;

            let seeded = cluster.seed_labels.len().min(self.points_per_cluster);
            for label in &cluster.seed_labels[..seeded] {
                let (x, y) = self.sample_point(cluster.center);
                data.push(ClusterPoint {
                    label: label.clone(),
                    x,
                    y,
                    cluster: cluster.name.clone(),
                });
            }

            let remaining = self.points_per_cluster - seeded;
            for i in 0..remaining {
                let (x, y) = self.sample_point(cluster.center);
                data.push(ClusterPoint {
                    label: cluster.synthetic_label(i),
                    x,
                    y,
                    cluster: cluster.name.clone(),
                });
            }

            debug!(
                cluster = %cluster.name,
                seeded,
                synthetic = remaining,
                "Sampled cluster"
            );
        }

        Ok(data)
    }
}

fn check_unique_seed_labels(cluster: &ClusterSpec) -> Result<()> {
    for (i, label) in cluster.seed_labels.iter().enumerate() {
        if cluster.seed_labels[..i].contains(label) {
            return Err(EmbedplotError::ValidationError(format!(
                "Cluster '{}' repeats seed label '{}'",
                cluster.name, label
            )));
        }
        if is_synthetic_label(cluster, label) {
            return Err(EmbedplotError::ValidationError(format!(
                "Seed label '{}' in cluster '{}' collides with a synthetic label",
                label, cluster.name
            )));
        }
    }
    Ok(())
}

fn is_synthetic_label(cluster: &ClusterSpec, label: &str) -> bool {
    let prefix = cluster.synthetic_label(0);
    let prefix = prefix.trim_end_matches('0');
    label
        .strip_prefix(prefix)
        .and_then(|counter| counter.parse::<usize>().ok())
        .map(|n| cluster.synthetic_label(n) == label)
        .unwrap_or(false)
}

/// Group points by cluster, keeping first-appearance order of clusters and points
pub fn group_by_cluster(points: &[ClusterPoint]) -> Vec<(String, Vec<&ClusterPoint>)> {
    let mut groups: Vec<(String, Vec<&ClusterPoint>)> = Vec::new();
    for point in points {
        match groups.iter_mut().find(|(name, _)| *name == point.cluster) {
            Some((_, members)) => members.push(point),
            None => groups.push((point.cluster.clone(), vec![point])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::euclidean_distance;
    use std::collections::HashSet;

    fn sampler(points_per_cluster: usize) -> ClusterSampler {
        ClusterSampler::new(SamplerConfig {
            seed: 42,
            points_per_cluster,
            jitter: 0.8,
        })
        .unwrap()
    }

    #[test]
    fn test_point_count_per_cluster() {
        let points = sampler(60).sample(&default_clusters()).unwrap();
        assert_eq!(points.len(), 5 * 60);

        for (name, members) in group_by_cluster(&points) {
            assert_eq!(members.len(), 60, "cluster {} should hold 60 points", name);
        }
    }

    #[test]
    fn test_labels_unique_within_cluster() {
        let points = sampler(200).sample(&default_clusters()).unwrap();
        for (name, members) in group_by_cluster(&points) {
            let labels: HashSet<&str> = members.iter().map(|p| p.label.as_str()).collect();
            assert_eq!(labels.len(), members.len(), "duplicate label in {}", name);
        }
    }

    #[test]
    fn test_seed_labels_come_first_then_synthetic() {
        let points = sampler(10).sample(&default_clusters()[..1]).unwrap();
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "cat", "dog", "fox", "horse", "lion", "tiger", "mouse", "wolf", "ani_000",
                "ani_001"
            ]
        );
    }

    #[test]
    fn test_fewer_points_than_seed_labels() {
        let points = sampler(3).sample(&default_clusters()[..1]).unwrap();
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["cat", "dog", "fox"]);
    }

    #[test]
    fn test_zero_points_per_cluster() {
        let points = sampler(0).sample(&default_clusters()).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_point_count_overflow_is_an_error() {
        let err = sampler(usize::MAX / 2).sample(&default_clusters()).unwrap_err();
        assert!(matches!(err, EmbedplotError::ValidationError(_)));
        assert!(err.to_string().contains("Too many points"));
    }

    #[test]
    fn test_synthetic_label_format() {
        let spec = ClusterSpec::new("Vehicles", (0.0, 0.0), &[]);
        assert_eq!(spec.synthetic_label(0), "veh_000");
        assert_eq!(spec.synthetic_label(51), "veh_051");

        let short = ClusterSpec::new("AI", (0.0, 0.0), &[]);
        assert_eq!(short.synthetic_label(7), "ai_007");
    }

    #[test]
    fn test_same_seed_same_points() {
        let a = sampler(20).sample(&default_clusters()).unwrap();
        let b = sampler(20).sample(&default_clusters()).unwrap();
        assert_eq!(a, b);

        let c = ClusterSampler::new(SamplerConfig {
            seed: 7,
            points_per_cluster: 20,
            jitter: 0.8,
        })
        .unwrap()
        .sample(&default_clusters())
        .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_points_land_near_their_center() {
        let clusters = default_clusters();
        let points = sampler(200).sample(&clusters).unwrap();

        for (name, members) in group_by_cluster(&points) {
            let spec = clusters.iter().find(|c| c.name == name).unwrap();
            let n = members.len() as f64;
            let mean = (
                members.iter().map(|p| p.x).sum::<f64>() / n,
                members.iter().map(|p| p.y).sum::<f64>() / n,
            );
            // Standard error of the mean is 0.8 / sqrt(200) ≈ 0.057 per axis
            assert!(
                euclidean_distance(mean, spec.center) < 0.3,
                "cluster {} mean {:?} too far from {:?}",
                name,
                mean,
                spec.center
            );
        }
    }

    #[test]
    fn test_zero_jitter_hits_center_exactly() {
        let mut sampler = ClusterSampler::new(SamplerConfig {
            seed: 1,
            points_per_cluster: 4,
            jitter: 0.0,
        })
        .unwrap();
        assert_eq!(sampler.sample_point((2.5, 3.2)), (2.5, 3.2));
    }

    #[test]
    fn test_invalid_jitter_rejected() {
        for jitter in [-1.0, f64::NAN, f64::INFINITY] {
            let result = ClusterSampler::new(SamplerConfig {
                seed: 1,
                points_per_cluster: 4,
                jitter,
            });
            assert!(result.is_err(), "jitter {} should be rejected", jitter);
        }
    }

    #[test]
    fn test_duplicate_seed_labels_rejected() {
        let clusters = vec![ClusterSpec::new("Animals", (0.0, 0.0), &["cat", "cat"])];
        let err = sampler(10).sample(&clusters).unwrap_err();
        assert!(err.to_string().contains("repeats seed label 'cat'"));
    }

    #[test]
    fn test_seed_label_colliding_with_synthetic_rejected() {
        let clusters = vec![ClusterSpec::new("Animals", (0.0, 0.0), &["ani_000"])];
        assert!(sampler(10).sample(&clusters).is_err());
    }

    #[test]
    fn test_group_by_cluster_keeps_order() {
        let point = |label: &str, cluster: &str| ClusterPoint {
            label: label.to_string(),
            x: 0.0,
            y: 0.0,
            cluster: cluster.to_string(),
        };
        let points = vec![
            point("a", "Tech"),
            point("b", "Food"),
            point("c", "Tech"),
        ];
        let groups = group_by_cluster(&points);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Tech");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "Food");
    }
}
