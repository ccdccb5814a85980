//! Melds and the meld constructor.
use crate::rule::{can_be_next_tile, can_be_same_tile, galaxy_identities};
use crate::tile::{Family, Suit, Tile, cmp_by_rank};
use std::fmt;

use serde::Serialize;
use tinyvec::{ArrayVec, array_vec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MentsuKind {
    Shuntsu,
    Kotsu,
    Kantsu,
    Toitsu,
    /// Two numerals waiting on a third to become a shuntsu.
    Taatsu,
    /// A lone tile.
    Koritsu,
    /// A terminal or honor singleton of a thirteen orphans hand.
    Kokushi,
}

/// Canonical identity of a meld, ignoring `is_open`.
pub type MentsuKey = (MentsuKind, Family, u8, ArrayVec<[Tile; 4]>);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Mentsu {
    pub kind: MentsuKind,
    /// Sorted by [`cmp_by_rank`].
    pub tiles: ArrayVec<[Tile; 4]>,
    /// Resolved family. Never ambiguous even if every tile is galaxy.
    pub family: Family,
    /// Resolved rank, the lowest one for shuntsu and taatsu.
    pub rank: u8,
    pub is_open: bool,
}

impl Mentsu {
    fn new(kind: MentsuKind, tiles: ArrayVec<[Tile; 4]>, identity: Tile, is_open: bool) -> Self {
        Self {
            kind,
            tiles,
            family: identity.family(),
            rank: identity.rank(),
            is_open,
        }
    }

    /// The resolved identity as a plain tile.
    #[inline]
    #[must_use]
    pub const fn identity(&self) -> Tile {
        Tile::new_unchecked(self.family, self.rank)
    }

    #[must_use]
    pub fn key(&self) -> MentsuKey {
        (self.kind, self.family, self.rank, self.tiles.clone())
    }

    /// Same meld under another kind, used to re-tag singletons.
    #[must_use]
    pub fn retag(mut self, kind: MentsuKind) -> Self {
        self.kind = kind;
        self
    }
}

impl fmt::Display for Mentsu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiles: String = self.tiles.iter().map(|t| t.to_string()).collect();
        if self.kind == MentsuKind::Kokushi {
            return f.write_str(&tiles);
        }
        if self.is_open {
            write!(f, "({tiles})")?;
        } else {
            f.write_str(&tiles)?;
        }
        write!(f, "({})", self.family.symbol(self.rank))
    }
}

fn all_pairs(tiles: &[Tile], pred: impl Fn(Tile, Tile) -> bool) -> bool {
    tiles
        .iter()
        .enumerate()
        .all(|(i, &a)| tiles[i + 1..].iter().all(|&b| pred(a, b)))
}

/// Builds every meld `tiles` can form.
///
/// Same-tile groups of 1 to 4 tiles become koritsu, toitsu, kotsu or kantsu;
/// three consecutive numerals become a shuntsu. A group made only of galaxy
/// tiles yields one meld per identity it can resolve to. Anything else,
/// including an empty slice or more than 4 tiles, yields nothing.
#[must_use]
pub fn make_mentsu(tiles: &[Tile], is_open: bool) -> Vec<Mentsu> {
    if tiles.is_empty() || tiles.len() > 4 {
        return vec![];
    }
    let mut sorted: ArrayVec<[Tile; 4]> = tiles.iter().copied().collect();
    sorted.sort_unstable_by(cmp_by_rank);
    let anchor = sorted.iter().copied().find(|t| !t.is_galaxy());

    if all_pairs(&sorted, can_be_same_tile) {
        let kind = match sorted.len() {
            1 => MentsuKind::Koritsu,
            2 => MentsuKind::Toitsu,
            3 => MentsuKind::Kotsu,
            _ => MentsuKind::Kantsu,
        };
        return match anchor {
            Some(t) => vec![Mentsu::new(kind, sorted, t.plain(), is_open)],
            None => galaxy_identities(sorted[0])
                .into_iter()
                .map(|id| Mentsu::new(kind, sorted.clone(), id, is_open))
                .collect(),
        };
    }

    let is_shuntsu = sorted.len() == 3
        && sorted.iter().all(|t| !t.is_honor())
        && sorted.windows(2).all(|w| can_be_next_tile(w[0], w[1]))
        && all_pairs(&sorted, |a, b| a.is_galaxy() || b.is_galaxy() || a.family() == b.family());
    if !is_shuntsu {
        return vec![];
    }
    let rank = sorted[0].rank();
    match anchor {
        Some(t) => vec![Mentsu::new(
            MentsuKind::Shuntsu,
            sorted,
            Tile::new_unchecked(t.family(), rank),
            is_open,
        )],
        None => Suit::ALL
            .into_iter()
            .map(|s| {
                let identity = Tile::new_unchecked(Family::Suit(s), rank);
                Mentsu::new(MentsuKind::Shuntsu, sorted.clone(), identity, is_open)
            })
            .collect(),
    }
}

/// Builds every taatsu the two tiles can form: numerals of one suit whose
/// ranks differ by 1 or 2.
#[must_use]
pub fn make_taatsu(a: Tile, b: Tile) -> Vec<Mentsu> {
    let mut tiles = array_vec!([Tile; 4] => a, b);
    tiles.sort_unstable_by(cmp_by_rank);
    let (lo, hi) = (tiles[0], tiles[1]);
    let (Some(lo_suit), Some(hi_suit)) = (lo.suit(), hi.suit()) else {
        return vec![];
    };
    if !matches!(hi.rank() - lo.rank(), 1 | 2) {
        return vec![];
    }
    let suits: ArrayVec<[Suit; 3]> = match (lo.is_galaxy(), hi.is_galaxy()) {
        (true, true) => Suit::ALL.into_iter().collect(),
        (false, true) => array_vec!([Suit; 3] => lo_suit),
        (true, false) => array_vec!([Suit; 3] => hi_suit),
        (false, false) if lo_suit == hi_suit => array_vec!([Suit; 3] => lo_suit),
        (false, false) => return vec![],
    };
    suits
        .into_iter()
        .map(|s| {
            Mentsu::new(
                MentsuKind::Taatsu,
                tiles.clone(),
                Tile::new_unchecked(Family::Suit(s), lo.rank()),
                false,
            )
        })
        .collect()
}
