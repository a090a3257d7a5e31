//! Color palette selection.

use glowgrid_core::Rgb;

/// Candidate colors with duplicates removed, first occurrence kept.
pub fn unique_colors(candidates: &[Rgb]) -> Vec<Rgb> {
    let mut unique = Vec::with_capacity(candidates.len());
    for &color in candidates {
        if !unique.contains(&color) {
            unique.push(color);
        }
    }
    unique
}

/// Draw `k` distinct entries from `candidates` without replacement.
///
/// Runs a partial Fisher-Yates shuffle, so the result is fully determined by
/// the state of `rng`. `k` is capped at the number of candidates.
pub fn sample_without_replacement(candidates: &[Rgb], k: usize, rng: &mut fastrand::Rng) -> Vec<Rgb> {
    let mut pool = candidates.to_vec();
    let k = k.min(pool.len());
    for i in 0..k {
        let j = rng.usize(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATES: [Rgb; 7] = [
        Rgb::RED,
        Rgb::GREEN,
        Rgb::BLUE,
        Rgb::YELLOW,
        Rgb::MAGENTA,
        Rgb::CYAN,
        Rgb::ORANGE,
    ];

    #[test]
    fn removes_duplicates_in_order() {
        let unique = unique_colors(&[Rgb::RED, Rgb::BLUE, Rgb::RED, Rgb::BLUE, Rgb::WHITE]);
        assert_eq!(unique, vec![Rgb::RED, Rgb::BLUE, Rgb::WHITE]);
    }

    #[test]
    fn samples_are_distinct() {
        let mut rng = fastrand::Rng::with_seed(7);
        for k in 0..=CANDIDATES.len() {
            let sample = sample_without_replacement(&CANDIDATES, k, &mut rng);
            assert_eq!(sample.len(), k);
            assert_eq!(unique_colors(&sample), sample);
            assert!(sample.iter().all(|c| CANDIDATES.contains(c)));
        }
    }

    #[test]
    fn oversized_request_returns_every_candidate() {
        let mut rng = fastrand::Rng::with_seed(1);
        let sample = sample_without_replacement(&CANDIDATES[..3], 10, &mut rng);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn same_seed_same_sample() {
        let a = sample_without_replacement(&CANDIDATES, 4, &mut fastrand::Rng::with_seed(42));
        let b = sample_without_replacement(&CANDIDATES, 4, &mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
    }
}
