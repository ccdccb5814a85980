use crate::tile::{Family, Suit, Tile};

use anyhow::{Result, ensure};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use tinyvec::ArrayVec;

/// Table of switches for one galaxy ruleset.
///
/// It is built once and handed to every solver by reference. Missing fields
/// in a JSON rule file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct GalaxyRule {
    /// Seven pairs counts as a winning form.
    #[derivative(Default(value = "true"))]
    pub chiitoi: bool,
    /// Thirteen orphans counts as a winning form.
    #[derivative(Default(value = "true"))]
    pub kokushi: bool,
    /// Aka copies among the four 5s of each suit.
    #[derivative(Default(value = "1"))]
    pub akas_per_suit: u8,
    /// Galaxy copies among the four copies of each tile kind.
    #[derivative(Default(value = "1"))]
    pub galaxy_per_kind: u8,
}

impl GalaxyRule {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.galaxy_per_kind <= 4,
            "galaxy_per_kind is {}, but there are only 4 copies of each tile",
            self.galaxy_per_kind,
        );
        ensure!(
            u16::from(self.galaxy_per_kind) + u16::from(self.akas_per_suit) <= 4,
            "galaxy_per_kind ({}) + akas_per_suit ({}) exceeds the 4 copies of a 5",
            self.galaxy_per_kind,
            self.akas_per_suit,
        );
        Ok(())
    }
}

/// Whether `a` and `b` may stand for the same tile.
///
/// A galaxy tile matches any tile of its family: any wind, any dragon, or a
/// numeral of the same rank in any suit.
#[must_use]
pub fn can_be_same_tile(a: Tile, b: Tile) -> bool {
    if a.is_galaxy() || b.is_galaxy() {
        match a.family() {
            Family::Wind => b.family() == Family::Wind,
            Family::Dragon => b.family() == Family::Dragon,
            Family::Suit(_) => !b.is_honor() && a.rank() == b.rank(),
        }
    } else {
        a.family() == b.family() && a.rank() == b.rank()
    }
}

/// Whether `next` may directly follow `tile` in a shuntsu.
#[must_use]
pub fn can_be_next_tile(tile: Tile, next: Tile) -> bool {
    if tile.is_honor() || next.is_honor() || tile.rank() >= 9 {
        return false;
    }
    if tile.is_galaxy() || next.is_galaxy() {
        tile.rank() + 1 == next.rank()
    } else {
        tile.family() == next.family() && tile.rank() + 1 == next.rank()
    }
}

/// Every plain identity `tile` may stand for, in family order.
///
/// This is the tile itself for non-galaxy tiles.
#[must_use]
pub fn galaxy_identities(tile: Tile) -> ArrayVec<[Tile; 4]> {
    if !tile.is_galaxy() {
        let mut ret = ArrayVec::new();
        ret.push(tile.plain());
        return ret;
    }
    match tile.family() {
        Family::Suit(_) => Suit::ALL
            .into_iter()
            .map(|s| Tile::new_unchecked(Family::Suit(s), tile.rank()))
            .collect(),
        fam => (1..=fam.max_rank()).map(|r| Tile::new_unchecked(fam, r)).collect(),
    }
}

/// Tiles indicated as dora by `indicator`.
///
/// A galaxy indicator indicates the successor in every suit for numerals, and
/// the whole family for honors.
#[must_use]
pub fn derive_doras(indicator: Tile) -> Vec<Tile> {
    if !indicator.is_galaxy() {
        return vec![indicator.next()];
    }
    match indicator.family() {
        Family::Suit(_) => {
            let next = indicator.next();
            Suit::ALL
                .into_iter()
                .map(|s| Tile::new_unchecked(Family::Suit(s), next.rank()))
                .collect()
        }
        _ => galaxy_identities(indicator).into_iter().collect(),
    }
}
