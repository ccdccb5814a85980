use crate::hand::parse_tile;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{Error, Result, ensure};
use bitflags::bitflags;
use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Suit {
    #[default]
    Man,
    Pin,
    Sou,
}

impl Suit {
    pub const ALL: [Self; 3] = [Self::Man, Self::Pin, Self::Sou];

    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Man => 'w',
            Self::Pin => 'p',
            Self::Sou => 's',
        }
    }
}

/// Variant order is the family order used by every tile comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Family {
    Suit(Suit),
    Wind,
    Dragon,
}

impl Default for Family {
    fn default() -> Self {
        Self::Suit(Suit::Man)
    }
}

impl Family {
    #[inline]
    #[must_use]
    pub const fn max_rank(self) -> u8 {
        match self {
            Self::Suit(_) => 9,
            Self::Wind => 4,
            Self::Dragon => 3,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_honor(self) -> bool {
        !matches!(self, Self::Suit(_))
    }

    #[inline]
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        match self {
            Self::Suit(s) => Some(s),
            _ => None,
        }
    }

    /// Notation character of an honor of this family at `rank`, or the suit
    /// character for numerals.
    #[must_use]
    pub const fn symbol(self, rank: u8) -> char {
        match self {
            Self::Suit(s) => s.as_char(),
            Self::Wind => WIND_SYMBOLS[(rank as usize).saturating_sub(1) % 4] as char,
            Self::Dragon => DRAGON_SYMBOLS[(rank as usize).saturating_sub(1) % 3] as char,
        }
    }
}

pub(crate) const WIND_SYMBOLS: &[u8; 4] = b"wsen";
pub(crate) const DRAGON_SYMBOLS: &[u8; 3] = b"blh";

bitflags! {
    /// Bit order doubles as the flag order: plain < galaxy < aka.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TileFlags: u8 {
        const GALAXY = 0b01;
        const AKA = 0b10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Tile {
    family: Family,
    rank: u8,
    flags: TileFlags,
}

impl Default for Tile {
    fn default() -> Self {
        Self::new_unchecked(Family::Suit(Suit::Man), 1)
    }
}

impl Tile {
    pub fn new(family: Family, rank: u8) -> Result<Self> {
        ensure!(
            (1..=family.max_rank()).contains(&rank),
            "rank {rank} is out of range for {family:?} (1..={})",
            family.max_rank(),
        );
        Ok(Self::new_unchecked(family, rank))
    }

    #[inline]
    #[must_use]
    pub const fn new_unchecked(family: Family, rank: u8) -> Self {
        Self {
            family,
            rank,
            flags: TileFlags::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_flags(self, flags: TileFlags) -> Self {
        Self { flags, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn galaxy(self) -> Self {
        self.with_flags(self.flags.union(TileFlags::GALAXY))
    }

    #[inline]
    #[must_use]
    pub const fn aka(self) -> Self {
        self.with_flags(self.flags.union(TileFlags::AKA))
    }

    /// Strips every flag, leaving the bare identity.
    #[inline]
    #[must_use]
    pub const fn plain(self) -> Self {
        self.with_flags(TileFlags::empty())
    }

    #[inline]
    #[must_use]
    pub const fn family(self) -> Family {
        self.family
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    #[must_use]
    pub const fn flags(self) -> TileFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        self.family.suit()
    }

    #[inline]
    #[must_use]
    pub const fn is_galaxy(self) -> bool {
        self.flags.contains(TileFlags::GALAXY)
    }

    #[inline]
    #[must_use]
    pub const fn is_aka(self) -> bool {
        self.flags.contains(TileFlags::AKA)
    }

    #[inline]
    #[must_use]
    pub const fn is_honor(self) -> bool {
        self.family.is_honor()
    }

    /// Terminal or honor.
    #[inline]
    #[must_use]
    pub const fn is_yaokyuu(self) -> bool {
        self.is_honor() || self.rank == 1 || self.rank == 9
    }

    /// Cyclic successor within the family, always plain.
    #[must_use]
    pub const fn next(self) -> Self {
        let rank = if self.rank >= self.family.max_rank() { 1 } else { self.rank + 1 };
        Self::new_unchecked(self.family, rank)
    }
}

const fn flag_order(flags: TileFlags) -> u8 {
    flags.bits()
}

/// Rank, then family, then flags.
#[must_use]
pub fn cmp_by_rank(a: &Tile, b: &Tile) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then(a.family.cmp(&b.family))
        .then(flag_order(a.flags).cmp(&flag_order(b.flags)))
}

/// Family, then rank, then flags.
#[must_use]
pub fn cmp_by_family(a: &Tile, b: &Tile) -> Ordering {
    a.family
        .cmp(&b.family)
        .then(a.rank.cmp(&b.rank))
        .then(flag_order(a.flags).cmp(&flag_order(b.flags)))
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_by_family(self, other)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            Family::Suit(s) => write!(f, "{}{}", self.rank, s.as_char())?,
            fam => write!(f, "{}", fam.symbol(self.rank))?,
        }
        if self.is_galaxy() {
            f.write_str("g")?;
        }
        if self.is_aka() {
            f.write_str("r")?;
        }
        Ok(())
    }
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tile(s)
    }
}

/// The 34 plain tile kinds in family order.
pub fn all_kinds() -> impl Iterator<Item = Tile> {
    Suit::ALL
        .into_iter()
        .flat_map(|s| (1..=9).map(move |r| Tile::new_unchecked(Family::Suit(s), r)))
        .chain((1..=4).map(|r| Tile::new_unchecked(Family::Wind, r)))
        .chain((1..=3).map(|r| Tile::new_unchecked(Family::Dragon, r)))
}

/// Terminals and honors, one of each, in family order.
pub const YAOKYUU: [Tile; 13] = [
    Tile::new_unchecked(Family::Suit(Suit::Man), 1),
    Tile::new_unchecked(Family::Suit(Suit::Man), 9),
    Tile::new_unchecked(Family::Suit(Suit::Pin), 1),
    Tile::new_unchecked(Family::Suit(Suit::Pin), 9),
    Tile::new_unchecked(Family::Suit(Suit::Sou), 1),
    Tile::new_unchecked(Family::Suit(Suit::Sou), 9),
    Tile::new_unchecked(Family::Wind, 1),
    Tile::new_unchecked(Family::Wind, 2),
    Tile::new_unchecked(Family::Wind, 3),
    Tile::new_unchecked(Family::Wind, 4),
    Tile::new_unchecked(Family::Dragon, 1),
    Tile::new_unchecked(Family::Dragon, 2),
    Tile::new_unchecked(Family::Dragon, 3),
];

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::hand::{parse_tiles, tiles_to_string};

    #[test]
    pub fn sort_by_rank() {
        let mut tiles = parse_tiles("hlbwsen1s2p3w5p5pr1sg").unwrap();
        tiles.sort_by(cmp_by_rank);
        assert_eq!(tiles_to_string(&tiles), "1s1sgwb2psl3wehn5p5pr");
    }

    #[test]
    pub fn sort_by_family() {
        let mut tiles = parse_tiles("hlbwsen1s2p3w5p5pr1sg").unwrap();
        tiles.sort();
        assert_eq!(tiles_to_string(&tiles), "3w2p5p5pr1s1sgwsenblh");
        let mut by_fn = parse_tiles("hlbwsen1s2p3w5p5pr1sg").unwrap();
        by_fn.sort_by(cmp_by_family);
        assert_eq!(by_fn, tiles);
    }

    #[test]
    pub fn flags() {
        let t: Tile = "5pr".parse().unwrap();
        assert!(t.is_aka());
        assert!(!t.is_galaxy());
        assert_eq!(t.plain().to_string(), "5p");
        let g = Tile::new_unchecked(Family::Wind, 3).galaxy();
        assert_eq!(g.to_string(), "eg");
        assert_eq!(g.aka().to_string(), "egr");
        assert_eq!(Tile::default().to_string(), "1w");
        assert_eq!(Family::default(), Family::Suit(Suit::default()));
    }

    #[test]
    pub fn next() {
        let test_one = |s: &str, expected: &str| {
            let t: Tile = s.parse().unwrap();
            assert_eq!(t.next().to_string(), expected, "failed for {s}");
        };
        test_one("1s", "2s");
        test_one("9s", "1s");
        test_one("5pg", "6p");
        test_one("n", "w");
        test_one("e", "n");
        test_one("h", "b");
        test_one("b", "l");
    }

    #[test]
    pub fn checked_new() {
        assert!(Tile::new(Family::Wind, 5).is_err());
        assert!(Tile::new(Family::Dragon, 0).is_err());
        assert!(Tile::new(Family::Suit(Suit::Pin), 9).is_ok());
    }

    #[test]
    pub fn tables() {
        assert_eq!(all_kinds().count(), 34);
        assert!(YAOKYUU.iter().all(|t| t.is_yaokyuu() && !t.is_galaxy()));
        assert_eq!(all_kinds().filter(|t| t.is_yaokyuu()).collect::<Vec<_>>(), YAOKYUU);
    }

    #[test]
    pub fn serde_as_notation() {
        let t: Tile = "1sg".parse().unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), r#""1sg""#);
        let back: Tile = serde_json::from_str(r#""1sg""#).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<Tile>(r#""10s""#).is_err());
    }
}
