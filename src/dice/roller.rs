//! Dice sources and pool rolling
//!
//! Every roll in the crate goes through a [`DiceSource`], so a seeded RNG or a
//! scripted sequence can stand in for real randomness.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{DicePool, DIE_FACES};

/// Anything that can produce d6 results
pub trait DiceSource {
    /// Next face value, in `1..=6`
    fn next_die(&mut self) -> u8;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn next_die(&mut self) -> u8 {
        (**self).next_die()
    }
}

/// Uniform d6 rolls drawn from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<ChaCha8Rng> {
    /// Deterministic dice for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> DiceSource for RngDice<R> {
    fn next_die(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Always rolls the same face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDice {
    face: u8,
}

impl FixedDice {
    /// Panics if `face` is not a d6 face.
    pub fn new(face: u8) -> Self {
        assert!((1..=DIE_FACES).contains(&face), "face {} is not on a d6", face);
        Self { face }
    }
}

impl DiceSource for FixedDice {
    fn next_die(&mut self) -> u8 {
        self.face
    }
}

/// Replays a fixed sequence of faces, wrapping around at the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// Panics if `faces` is empty or holds a value outside `1..=6`.
    pub fn new(faces: Vec<u8>) -> Self {
        assert!(!faces.is_empty(), "scripted dice need at least one face");
        assert!(
            faces.iter().all(|f| (1..=DIE_FACES).contains(f)),
            "scripted faces must be d6 faces: {:?}",
            faces
        );
        Self { faces, cursor: 0 }
    }

    /// How many faces have been handed out so far
    pub fn rolls(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn next_die(&mut self) -> u8 {
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}

/// Roll a single d6
pub fn roll_die<D: DiceSource + ?Sized>(dice: &mut D) -> u8 {
    dice.next_die()
}

/// Roll `count` independent d6s
pub fn roll_pool<D: DiceSource + ?Sized>(dice: &mut D, count: u32) -> DicePool {
    (0..count).map(|_| roll_die(dice)).collect()
}
