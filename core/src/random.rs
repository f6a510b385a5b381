// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reproducible pseudo-random sequence used for level generation.
//!
//! The sequence is a simple chaotic map over `[0, 1)`. It is not suitable
//! for anything security related, but the same seed always reproduces the
//! same level, which is what "retry this level" and shared seeds rely on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::SQRT_2;

/// Seed for a [`SeededRng`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// Used as the starting number directly
    Number(f64),
    /// Folded into a starting number character by character
    Text(String),
}

impl Seed {
    /// Interpret user input: finite numbers become [`Seed::Number`], anything
    /// else is kept as text
    pub fn parse(s: &str) -> Seed {
        match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Seed::Number(n),
            _ => Seed::Text(s.to_string()),
        }
    }
}

impl From<f64> for Seed {
    fn from(n: f64) -> Self {
        Seed::Number(n)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

/// Stand-in for text seeds that fold to zero
const FOLDED_ZERO_SEED: f64 = 1.0;

/// Seedable random number generator
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: f64,
    number: f64,
}

impl SeededRng {
    /// Create a generator. Without a usable seed a fresh one is drawn from
    /// the platform RNG, so consecutive games differ.
    pub fn new(seed: Option<Seed>) -> Self {
        let seed = match seed {
            Some(Seed::Number(n)) if n.is_finite() && n != 0.0 => n,
            Some(Seed::Text(s)) if !s.is_empty() => match fold_text_seed(&s) {
                // zero is a fixed point of the map
                n if n == 0.0 => FOLDED_ZERO_SEED,
                n => n,
            },
            _ => fresh_seed(),
        };
        Self { seed, number: seed }
    }

    /// Create a generator from a numeric seed
    pub fn from_number(seed: f64) -> Self {
        Self::new(Some(Seed::Number(seed)))
    }

    /// The normalized numeric seed; `SeededRng::from_number(rng.seed())`
    /// replays the same sequence
    pub fn seed(&self) -> f64 {
        self.seed
    }

    /// Advance and return the next value in `[0, 1)`
    pub fn next(&mut self) -> f64 {
        self.number += self.number * SQRT_2;
        self.number *= 1000.0;
        self.number -= self.number.floor();
        self.number
    }

    /// Integer in `[low, high)`. `low == high` always yields `low`.
    pub fn next_int(&mut self, low: i32, high: i32) -> i32 {
        low + (self.next() * (high - low) as f64).floor() as i32
    }

    /// Fair coin
    pub fn next_bool(&mut self) -> bool {
        self.next() < 0.5
    }

    /// Uniformly selected element, `None` for an empty slice
    pub fn next_element<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_int(0, items.len() as i32) as usize;
        items.get(idx)
    }

    /// Uniformly selected entry of a map, in key order
    pub fn next_entry<'a, K: Ord, V>(&mut self, map: &'a BTreeMap<K, V>) -> Option<(&'a K, &'a V)> {
        let keys: Vec<&K> = map.keys().collect();
        let key = *self.next_element(&keys)?;
        map.get_key_value(key)
    }
}

/// Fold a text seed into a number. Each UTF-16 unit multiplies the
/// accumulator, the product is wrapped to 32 bits and shifted right by 4.
fn fold_text_seed(s: &str) -> f64 {
    let mut acc: i32 = 1;
    for unit in s.encode_utf16() {
        acc = ((acc as i64 * unit as i64) as i32) >> 4;
        if acc > 1_000_000_000 {
            acc >>= 4;
        }
    }
    acc as f64
}

fn fresh_seed() -> f64 {
    loop {
        let n = rand::random::<f64>();
        if n != 0.0 {
            tracing::debug!("Drew fresh seed {}", n);
            return n;
        }
    }
}
