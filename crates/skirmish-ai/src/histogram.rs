//! Guess-factor histogram.
//!
//! A fixed number of counters indexed symmetrically around a center bin that
//! stands for "no deviation from a straight-line shot". Bin `i` maps to the
//! guess factor `(i - c) / c`, so the extremes are exactly ±1.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessFactorHistogram {
    bins: Vec<u32>,
}

impl GuessFactorHistogram {
    /// Zero-filled histogram with `bins` counters.
    ///
    /// `bins` must be odd and at least 3 (enforced by `EngineConfig::validate`).
    pub fn new(bins: usize) -> Self {
        debug_assert!(bins >= 3 && bins % 2 == 1, "bin count must be odd");
        Self {
            bins: vec![0; bins],
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn center(&self) -> usize {
        self.bins.len() / 2
    }

    pub fn counts(&self) -> &[u32] {
        &self.bins
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Index of the highest counter. Ties go to the bin nearer the center,
    /// and between two bins equally far from it, to the lower index.
    pub fn mode_index(&self) -> usize {
        let center = self.center();
        let mut best = center;
        for (i, &count) in self.bins.iter().enumerate() {
            let best_count = self.bins[best];
            if count > best_count
                || (count == best_count && i.abs_diff(center) < best.abs_diff(center))
            {
                best = i;
            }
        }
        best
    }

    /// Signed guess factor in `[-1, 1]` represented by `index`.
    pub fn guess_factor(&self, index: usize) -> f64 {
        let center = self.center() as f64;
        let index = index.min(self.bins.len() - 1) as f64;
        (index - center) / center
    }

    /// Bin nearest to `guess_factor`, which is clamped into `[-1, 1]` first.
    pub fn index_for(&self, guess_factor: f64) -> usize {
        let center = self.center() as f64;
        let gf = if guess_factor.is_finite() {
            guess_factor.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        ((gf * center + center).round() as usize).min(self.bins.len() - 1)
    }

    /// Reinforce the bin nearest `guess_factor` and its neighbours with a
    /// triangular kernel: weight `window + 1` at the bin, one less per step,
    /// nothing `window + 1` bins away. Returns the reinforced bin.
    pub fn reinforce(&mut self, guess_factor: f64, window: usize) -> usize {
        let peak = self.index_for(guess_factor);
        let lo = peak.saturating_sub(window);
        let hi = (peak + window).min(self.bins.len() - 1);
        for i in lo..=hi {
            let weight = (window + 1 - i.abs_diff(peak)) as u32;
            self.bins[i] = self.bins[i].saturating_add(weight);
        }
        peak
    }

    pub fn clear(&mut self) {
        self.bins.iter_mut().for_each(|c| *c = 0);
    }
}
