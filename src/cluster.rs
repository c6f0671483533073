use kmeans_colors::{Kmeans, get_kmeans};
use palette::Srgb;

use crate::error::{Error, Result};
use crate::report::ColorTriple;

/// `kmeans_colors` stores cluster membership as `u8`.
pub const MAX_CLUSTERS: usize = 255;

/// What to do with an image that has fewer distinct colors than clusters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Repeat the distinct colors, most frequent first, until `clusters`
    /// slots are filled. A solid image yields `clusters` copies of its color.
    #[default]
    Duplicate,
    /// Report [`Error::Degenerate`].
    Fail,
}

/// Tuning for [`dominant_colors`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterOptions {
    /// Number of dominant colors per image (K).
    pub clusters: usize,
    /// Iteration cap for one k-means trial.
    pub max_iter: usize,
    /// Convergence threshold, measured on the 0..1 RGB scale.
    pub converge: f32,
    /// Independent trials; the lowest score wins.
    pub runs: u32,
    /// Seed of the first trial, later trials use `seed + n`.
    pub seed: u64,
    pub degenerate: DegeneratePolicy,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            clusters: 2,
            max_iter: 300,
            converge: 0.0025,
            runs: 1,
            seed: 42,
            degenerate: DegeneratePolicy::default(),
        }
    }
}

/// Cluster `pixels` into `opts.clusters` groups and return their centers.
///
/// Clustering happens in plain RGB with k-means++ seeding, so identical input
/// and options always give identical output. Centers are rounded to integer
/// channels and ordered by how many pixels they cover, largest first.
pub fn dominant_colors(pixels: &[Srgb<u8>], opts: &ClusterOptions) -> Result<Vec<ColorTriple>> {
    let k = opts.clusters;
    if k == 0 || k > MAX_CLUSTERS {
        return Err(Error::InvalidClusterCount {
            clusters: k,
            max: MAX_CLUSTERS,
        });
    }
    if pixels.is_empty() {
        return Err(Error::Degenerate {
            distinct: 0,
            clusters: k,
        });
    }

    if let Some(histogram) = sparse_histogram(pixels, k) {
        return match opts.degenerate {
            DegeneratePolicy::Fail => Err(Error::Degenerate {
                distinct: histogram.len(),
                clusters: k,
            }),
            DegeneratePolicy::Duplicate => {
                log::debug!(
                    "{} distinct colors for {k} clusters, repeating centers",
                    histogram.len()
                );
                let colors: Vec<ColorTriple> =
                    histogram.into_iter().map(|(c, _)| c.into()).collect();
                Ok(fill_cyclic(colors, k))
            }
        };
    }

    let buf: Vec<Srgb<f32>> = pixels.iter().map(|p| p.into_format::<f32>()).collect();
    let best = best_of_runs(&buf, opts);
    Ok(fill_cyclic(by_population(&best), k))
}

// ------------------------------------------------------------
// Degenerate input detection
// ------------------------------------------------------------

/// Count colors while there are fewer than `k` of them.
///
/// Returns `None` as soon as the `k`-th distinct color shows up, otherwise the
/// distinct colors with their pixel counts, most frequent first (ties keep
/// first-seen order). Linear search is fine since at most `k - 1` entries are
/// ever held.
fn sparse_histogram(pixels: &[Srgb<u8>], k: usize) -> Option<Vec<(Srgb<u8>, usize)>> {
    let mut colors: Vec<(Srgb<u8>, usize)> = Vec::with_capacity(k);

    for &pix in pixels {
        let len = colors.len();
        match colors.iter_mut().find(|(c, _)| *c == pix) {
            Some((_, count)) => *count += 1,
            None if len + 1 < k => colors.push((pix, 1)),
            None => return None,
        }
    }

    colors.sort_by(|a, b| b.1.cmp(&a.1));
    Some(colors)
}

fn fill_cyclic(colors: Vec<ColorTriple>, k: usize) -> Vec<ColorTriple> {
    if colors.len() >= k || colors.is_empty() {
        return colors;
    }
    colors.iter().copied().cycle().take(k).collect()
}

// ------------------------------------------------------------
// k-means
// ------------------------------------------------------------

fn best_of_runs(buf: &[Srgb<f32>], opts: &ClusterOptions) -> Kmeans<Srgb<f32>> {
    let trial = |run: u32| {
        let seed = opts.seed.wrapping_add(u64::from(run));
        let result = get_kmeans(opts.clusters, opts.max_iter, opts.converge, false, buf, seed);
        log::debug!("k-means run {run} (seed {seed}): score {}", result.score);
        result
    };

    let mut best = trial(0);
    for run in 1..opts.runs {
        let candidate = trial(run);
        if candidate.score < best.score {
            best = candidate;
        }
    }
    best
}

/// Centers ordered by member count, largest first. Centers without members
/// are dropped: `kmeans_colors` reseeds an empty cluster with a random color,
/// which no pixel may belong to when the last iteration ends.
fn by_population(result: &Kmeans<Srgb<f32>>) -> Vec<ColorTriple> {
    let mut counts = vec![0usize; result.centroids.len()];
    for &idx in &result.indices {
        if let Some(count) = counts.get_mut(usize::from(idx)) {
            *count += 1;
        }
    }

    let mut order: Vec<usize> = (0..result.centroids.len()).filter(|&i| counts[i] > 0).collect();
    order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));

    order
        .into_iter()
        .map(|i| result.centroids[i].into_format::<u8>().into())
        .collect()
}
