//! Farthest color search
//!
//! Finds a background color that is as different as possible from every
//! pixel of an image: over a coarse grid of candidate colors, pick the one
//! whose distance to its *nearest* image pixel is largest.
//!
//! # Algorithm
//!
//! 1. Flatten the batch; if it holds more than [`MAX_SAMPLES`] pixels,
//!    draw a uniform sample of exactly that many without replacement.
//! 2. Quantize the sample to 8-bit integers.
//! 3. Walk the 4096 candidates of the 16-step RGB grid in chunks of
//!    [`CHUNK_SIZE`]; each chunk keeps only one running minimum per
//!    candidate, so working memory does not grow with the sample.
//! 4. Keep the first candidate whose minimum is strictly larger than
//!    every earlier one.
//!
//! All distances are exact integers on the 8-bit scale.

use rand::Rng;
use rand::seq::index;

use chromakey_core::{Image, Rgb, channel};

/// Pixel sample cap
pub const MAX_SAMPLES: usize = 20_000;

/// Spacing of the candidate grid on each channel
pub const GRID_STEP: u32 = 16;

/// Number of grid levels per channel (0, 16, ..., 240)
pub const GRID_LEVELS: usize = (256 / GRID_STEP) as usize;

/// Number of candidate colors
pub const CANDIDATE_COUNT: usize = GRID_LEVELS * GRID_LEVELS * GRID_LEVELS;

/// Candidates evaluated per chunk
pub const CHUNK_SIZE: usize = 256;

/// Slack on the feasibility test against `threshold^2`
const THRESHOLD_EPSILON: f64 = 1e-6;

/// Best candidate found by the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarthestCandidate {
    /// Candidate color
    pub color: Rgb,
    /// Squared distance from `color` to its nearest sampled pixel
    pub min_distance_sq: u32,
}

/// Grid candidate at `index`, red-major then green then blue.
///
/// # Panics
///
/// Panics in debug builds if `index >= CANDIDATE_COUNT`.
#[inline]
pub fn candidate(index: usize) -> Rgb {
    debug_assert!(index < CANDIDATE_COUNT);
    let level = |i: usize| (i % GRID_LEVELS) as u32 * GRID_STEP;
    Rgb::new(
        level(index / (GRID_LEVELS * GRID_LEVELS)) as u8,
        level(index / GRID_LEVELS) as u8,
        level(index) as u8,
    )
}

/// All grid candidates in search order.
pub fn candidate_grid() -> Vec<Rgb> {
    (0..CANDIDATE_COUNT).map(candidate).collect()
}

/// Quantized pixel sample of an image, at most [`MAX_SAMPLES`] long.
///
/// Returns an empty vector for images with fewer than three channels.
pub fn sample_pixels<R: Rng + ?Sized>(image: &Image, rng: &mut R) -> Vec<Rgb> {
    if !image.has_rgb() {
        return Vec::new();
    }

    let quantize = |px: &[f32]| Rgb::from_unit(channel::rgb(px));
    let n = image.pixel_count();
    if n <= MAX_SAMPLES {
        return image.pixels().map(quantize).collect();
    }

    let nc = image.channels() as usize;
    let data = image.data();
    index::sample(rng, n, MAX_SAMPLES)
        .iter()
        .map(|i| quantize(&data[i * nc..(i + 1) * nc]))
        .collect()
}

/// Minimum squared distance from each candidate of `chunk` to `samples`,
/// written into `mins`.
fn chunk_minima(chunk: &[Rgb], samples: &[Rgb], mins: &mut [u32]) {
    let mins = &mut mins[..chunk.len()];
    mins.fill(u32::MAX);
    for &p in samples {
        for (m, &c) in mins.iter_mut().zip(chunk) {
            let d = c.distance_sq(p);
            if d < *m {
                *m = d;
            }
        }
    }
}

/// First candidate of `chunk` with the largest minimum.
fn chunk_best(chunk: &[Rgb], samples: &[Rgb]) -> Option<FarthestCandidate> {
    let mut mins = [0u32; CHUNK_SIZE];
    chunk_minima(chunk, samples, &mut mins);

    let mut best: Option<FarthestCandidate> = None;
    for (&color, &min_distance_sq) in chunk.iter().zip(&mins) {
        if best.is_none_or(|b| min_distance_sq > b.min_distance_sq) {
            best = Some(FarthestCandidate {
                color,
                min_distance_sq,
            });
        }
    }
    best
}

/// Keep the earlier result unless the later one is strictly farther.
fn keep_first_max(
    acc: Option<FarthestCandidate>,
    next: Option<FarthestCandidate>,
) -> Option<FarthestCandidate> {
    match (acc, next) {
        (Some(a), Some(n)) if n.min_distance_sq > a.min_distance_sq => Some(n),
        (Some(a), _) => Some(a),
        (None, n) => n,
    }
}

/// Grid candidate farthest from its nearest sample.
///
/// Deterministic for a given sample. Returns `None` for an empty sample.
pub fn farthest_candidate(samples: &[Rgb]) -> Option<FarthestCandidate> {
    if samples.is_empty() {
        return None;
    }
    let grid = candidate_grid();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let per_chunk: Vec<Option<FarthestCandidate>> = grid
            .par_chunks(CHUNK_SIZE)
            .map(|chunk| chunk_best(chunk, samples))
            .collect();
        per_chunk.into_iter().fold(None, keep_first_max)
    }

    #[cfg(not(feature = "parallel"))]
    {
        grid.chunks(CHUNK_SIZE)
            .map(|chunk| chunk_best(chunk, samples))
            .fold(None, keep_first_max)
    }
}

/// Color farther than `threshold` from every pixel, using the thread RNG
/// for sampling.
///
/// See [`farthest_color_with_rng`].
pub fn farthest_color(image: &Image, threshold: u8) -> Option<Rgb> {
    farthest_color_with_rng(image, threshold, &mut rand::rng())
}

/// Color farther than `threshold` (8-bit Euclidean units) from every
/// sampled pixel.
///
/// Returns `None` if the image has fewer than three channels or if even
/// the best grid candidate lies within `threshold` of some pixel.
///
/// # Example
///
/// ```
/// use chromakey_color::search::farthest_color_with_rng;
/// use chromakey_core::{Image, Rgb};
///
/// let black = Image::new(1, 8, 8, 3).unwrap();
/// let mut rng = rand::rng();
/// assert_eq!(
///     farthest_color_with_rng(&black, 50, &mut rng),
///     Some(Rgb::new(240, 240, 240))
/// );
/// ```
pub fn farthest_color_with_rng<R: Rng + ?Sized>(
    image: &Image,
    threshold: u8,
    rng: &mut R,
) -> Option<Rgb> {
    let samples = sample_pixels(image, rng);
    let best = farthest_candidate(&samples)?;

    let thr = threshold as u32;
    if best.min_distance_sq as f64 <= (thr * thr) as f64 + THRESHOLD_EPSILON {
        tracing::debug!(
            threshold,
            best = %best.color,
            min_distance_sq = best.min_distance_sq,
            "no candidate color clears the threshold"
        );
        return None;
    }

    tracing::trace!(
        color = %best.color,
        min_distance_sq = best.min_distance_sq,
        samples = samples.len(),
        "farthest color"
    );
    Some(best.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        assert_eq!(candidate(0), Rgb::new(0, 0, 0));
        assert_eq!(candidate(1), Rgb::new(0, 0, 16));
        assert_eq!(candidate(16), Rgb::new(0, 16, 0));
        assert_eq!(candidate(256), Rgb::new(16, 0, 0));
        assert_eq!(candidate(CANDIDATE_COUNT - 1), Rgb::new(240, 240, 240));
        assert_eq!(candidate_grid().len(), 4096);
    }

    #[test]
    fn test_farthest_from_black() {
        let best = farthest_candidate(&[Rgb::new(0, 0, 0)]).unwrap();
        assert_eq!(best.color, Rgb::new(240, 240, 240));
        assert_eq!(best.min_distance_sq, 3 * 240 * 240);
    }

    #[test]
    fn test_farthest_from_white() {
        let best = farthest_candidate(&[Rgb::new(255, 255, 255)]).unwrap();
        assert_eq!(best.color, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        // Every corner of the grid cube is equally far from mid-gray
        // 120 (distance 120 per channel), the first seen is black.
        let best = farthest_candidate(&[Rgb::new(120, 120, 120)]).unwrap();
        assert_eq!(best.color, Rgb::new(0, 0, 0));
        assert_eq!(best.min_distance_sq, 3 * 120 * 120);
    }

    #[test]
    fn test_matches_brute_force() {
        let samples = [
            Rgb::new(10, 200, 30),
            Rgb::new(250, 5, 90),
            Rgb::new(128, 128, 128),
            Rgb::new(0, 0, 255),
        ];
        let best = farthest_candidate(&samples).unwrap();

        let mut expected: Option<FarthestCandidate> = None;
        for c in candidate_grid() {
            let m = samples.iter().map(|&p| c.distance_sq(p)).min().unwrap();
            if expected.is_none_or(|e| m > e.min_distance_sq) {
                expected = Some(FarthestCandidate {
                    color: c,
                    min_distance_sq: m,
                });
            }
        }
        assert_eq!(Some(best), expected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential_fold() {
        let sample_sets: [&[Rgb]; 3] = [
            &[Rgb::new(120, 120, 120)],
            &[Rgb::new(10, 200, 30), Rgb::new(250, 5, 90), Rgb::new(0, 0, 255)],
            &[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), Rgb::new(128, 0, 128)],
        ];
        let grid = candidate_grid();
        for samples in sample_sets {
            let sequential = grid
                .chunks(CHUNK_SIZE)
                .map(|chunk| chunk_best(chunk, samples))
                .fold(None, keep_first_max);
            for _ in 0..8 {
                assert_eq!(farthest_candidate(samples), sequential);
            }
        }
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(farthest_candidate(&[]), None);
    }

    #[test]
    fn test_chunk_boundary_tie_keeps_earlier_chunk() {
        let a = Some(FarthestCandidate {
            color: Rgb::new(0, 0, 0),
            min_distance_sq: 5,
        });
        let b = Some(FarthestCandidate {
            color: Rgb::new(16, 0, 0),
            min_distance_sq: 5,
        });
        assert_eq!(keep_first_max(a, b), a);
        assert_eq!(keep_first_max(None, b), b);
        assert_eq!(keep_first_max(a, None), a);
    }
}
