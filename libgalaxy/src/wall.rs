//! The physical tile set.
use crate::rule::GalaxyRule;
use crate::tile::{Family, Tile, all_kinds};

use anyhow::{Result, ensure};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha12Rng;

/// Number of physical copies of each tile kind.
pub const COPIES_PER_KIND: u8 = 4;

/// All 136 tiles of the rule, unshuffled.
pub fn tile_set(rule: &GalaxyRule) -> Result<Vec<Tile>> {
    rule.validate()?;

    let mut tiles = Vec::with_capacity(136);
    for kind in all_kinds() {
        let akas = if matches!(kind.family(), Family::Suit(_)) && kind.rank() == 5 {
            rule.akas_per_suit
        } else {
            0
        };
        let plains = COPIES_PER_KIND - rule.galaxy_per_kind - akas;
        tiles.extend((0..plains).map(|_| kind));
        tiles.extend((0..rule.galaxy_per_kind).map(|_| kind.galaxy()));
        tiles.extend((0..akas).map(|_| kind.aka()));
    }
    Ok(tiles)
}

/// A shuffled wall. The same seed always gives the same wall.
#[derive(Debug, Clone)]
pub struct Wall {
    tiles: Vec<Tile>,
}

impl Wall {
    pub fn new(rule: &GalaxyRule, seed: u64) -> Result<Self> {
        let mut tiles = tile_set(rule)?;
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        tiles.shuffle(&mut rng);
        Ok(Self { tiles })
    }

    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    /// Takes `count` tiles off the wall.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Tile>> {
        ensure!(
            count <= self.tiles.len(),
            "cannot deal {count} tiles, only {} left",
            self.tiles.len(),
        );
        let at = self.tiles.len() - count;
        Ok(self.tiles.split_off(at))
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use ahash::AHashMap;

    #[test]
    pub fn composition() {
        let tiles = tile_set(&GalaxyRule::default()).unwrap();
        assert_eq!(tiles.len(), 136);
        assert_eq!(tiles.iter().filter(|t| t.is_galaxy()).count(), 34);
        assert_eq!(tiles.iter().filter(|t| t.is_aka()).count(), 3);

        let mut per_kind = AHashMap::new();
        for t in &tiles {
            *per_kind.entry(t.plain()).or_insert(0) += 1;
        }
        assert_eq!(per_kind.len(), 34);
        assert!(per_kind.values().all(|&c| c == 4));

        let rule = GalaxyRule {
            galaxy_per_kind: 0,
            akas_per_suit: 0,
            ..Default::default()
        };
        let tiles = tile_set(&rule).unwrap();
        assert_eq!(tiles.len(), 136);
        assert!(tiles.iter().all(|t| t.flags().is_empty()));

        let rule = GalaxyRule {
            galaxy_per_kind: 3,
            akas_per_suit: 2,
            ..Default::default()
        };
        assert!(tile_set(&rule).is_err());
    }

    #[test]
    pub fn seeded_deal() {
        let rule = GalaxyRule::default();
        let mut a = Wall::new(&rule, 42).unwrap();
        let mut b = Wall::new(&rule, 42).unwrap();
        let hand_a = a.deal(13).unwrap();
        assert_eq!(hand_a, b.deal(13).unwrap());
        assert_eq!(hand_a.len(), 13);
        assert_eq!(a.remaining(), 123);

        assert!(a.deal(124).is_err());
        assert_eq!(a.deal(123).unwrap().len(), 123);
        assert_eq!(a.remaining(), 0);
    }
}
