// Domain rules - Selection and timing policies

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::model::*;

/// Outcome of asking a pool for its next asset
#[derive(Debug, Clone, PartialEq)]
pub enum Draw<T> {
    /// An asset is available
    Next(T),
    /// The pool is empty; the caller decides whether to refill
    Exhausted,
}

impl<T> Draw<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Draw::Next(value) => Some(value),
            Draw::Exhausted => None,
        }
    }
}

/// Picks the next asset out of a pool
pub trait SelectionPolicy {
    fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Draw<Asset>;
}

/// Random draw without replacement: a shuffled queue consumed front-to-back,
/// with a used set that survives refills.
#[derive(Debug, Clone, Default)]
pub struct UniquePool {
    pending: VecDeque<Asset>,
    used: HashSet<PathBuf>,
}

impl UniquePool {
    /// Build a pool from catalog assets in random order
    pub fn shuffled<R: Rng + ?Sized>(assets: Vec<Asset>, rng: &mut R) -> Self {
        let mut pool = Self::default();
        pool.load(assets, rng);
        pool
    }

    /// Replace the pending queue with the unused subset of a fresh scan.
    /// Returns the number of assets now pending.
    pub fn refill<R: Rng + ?Sized>(&mut self, rescanned: Vec<Asset>, rng: &mut R) -> usize {
        self.load(rescanned, rng);
        self.pending.len()
    }

    fn load<R: Rng + ?Sized>(&mut self, assets: Vec<Asset>, rng: &mut R) {
        let mut seen = HashSet::new();
        let mut fresh: Vec<Asset> = assets
            .into_iter()
            .filter(|asset| !self.used.contains(&asset.path))
            .filter(|asset| seen.insert(asset.path.clone()))
            .collect();
        fresh.shuffle(rng);
        self.pending = fresh.into();
    }

    /// Record an asset as part of the output (or as known-broken)
    pub fn mark_used(&mut self, asset: &Asset) {
        self.used.insert(asset.path.clone());
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }
}

impl SelectionPolicy for UniquePool {
    fn next<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> Draw<Asset> {
        while let Some(asset) = self.pending.pop_front() {
            if !self.used.contains(&asset.path) {
                return Draw::Next(asset);
            }
        }
        Draw::Exhausted
    }
}

/// Uniform random draw with replacement from a fixed pool
#[derive(Debug, Clone)]
pub struct ReplacementPool {
    assets: Vec<Asset>,
}

impl ReplacementPool {
    /// Returns `None` for an empty asset list
    pub fn new(assets: Vec<Asset>) -> Option<Self> {
        if assets.is_empty() {
            None
        } else {
            Some(Self { assets })
        }
    }
}

impl SelectionPolicy for ReplacementPool {
    fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Draw<Asset> {
        match self.assets.choose(rng) {
            Some(asset) => Draw::Next(asset.clone()),
            None => Draw::Exhausted,
        }
    }
}

/// Running timeline length measured against a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationAccumulator {
    elapsed: Duration,
    target: Duration,
}

impl DurationAccumulator {
    pub fn new(target: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            target,
        }
    }

    pub fn should_continue(&self) -> bool {
        self.elapsed < self.target
    }

    pub fn add(&mut self, segment: Duration) {
        self.elapsed = self.elapsed.saturating_add(segment);
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn remaining(&self) -> Duration {
        self.target.saturating_sub(self.elapsed)
    }
}

/// Amount a successful append advances the accumulator
pub fn accounted_growth(
    accounting: DurationAccounting,
    segment: &TimedSegment,
    mixed_growth: Duration,
) -> Duration {
    match accounting {
        DurationAccounting::Nominal => segment.duration,
        DurationAccounting::Mixed => mixed_growth,
    }
}

#[cfg(test)]
mod tests;
