//! Complete hand decomposition: standard, chiitoi and kokushi.
use super::extract::{extract_first, extract_group};
use super::search::{Partial, decompose_all};
use crate::mentsu::{Mentsu, MentsuKind};
use crate::rule::GalaxyRule;
use crate::tile::{Tile, YAOKYUU, all_kinds};

use ahash::{AHashMap, AHashSet};
use log::debug;

/// Every way to split `tiles` into one toitsu plus shuntsu/kotsu.
#[must_use]
pub fn solve_normal_hand(tiles: &[Tile]) -> Vec<Vec<Mentsu>> {
    let seeds = extract_group(2, tiles)
        .into_iter()
        .map(|(pair, rest)| Partial::new(vec![pair], rest))
        .collect();
    decompose_all(seeds, |p| extract_group(3, &p.rest))
        .into_iter()
        .filter(|p| p.rest.is_empty())
        .map(|p| p.mentsu)
        .collect()
}

/// Seven toitsu of pairwise distinct identities.
#[must_use]
pub fn solve_chiitoi(tiles: &[Tile]) -> Vec<Vec<Mentsu>> {
    if tiles.len() != 14 {
        return vec![];
    }
    let seed = Partial::new(vec![], tiles.to_vec());
    decompose_all(vec![seed], |p| extract_group(2, &p.rest))
        .into_iter()
        .filter(|p| p.rest.is_empty() && p.mentsu.len() == 7 && has_distinct_identities(&p.mentsu))
        .map(|p| p.mentsu)
        .collect()
}

fn has_distinct_identities(mentsu: &[Mentsu]) -> bool {
    let mut seen = AHashSet::new();
    mentsu.iter().all(|m| seen.insert(m.identity()))
}

/// Whether adding a koritsu of `m`'s identity to `taken` still allows a
/// thirteen orphans shape: at most two of one identity, and at most one
/// identity held twice.
pub(super) fn kokushi_admits(taken: &[Mentsu], m: &Mentsu) -> bool {
    let mut counts = AHashMap::new();
    for t in taken.iter().chain([m]) {
        *counts.entry(t.identity()).or_insert(0_u8) += 1;
    }
    let doubles = counts.values().filter(|&&c| c == 2).count();
    counts.values().all(|&c| c <= 2) && doubles <= 1
}

/// Every assignment of `tiles`, all terminals or honors, to koritsu such that
/// no identity is held more than twice and at most one is held twice.
pub(super) fn kokushi_assignments(tiles: &[Tile]) -> Vec<Vec<Mentsu>> {
    if !tiles.iter().all(|t| t.is_yaokyuu()) {
        return vec![];
    }
    let seed = Partial::new(vec![], tiles.to_vec());
    decompose_all(vec![seed], |p| {
        extract_first(&p.rest)
            .into_iter()
            .filter(|(m, _)| kokushi_admits(&p.mentsu, m))
            .collect()
    })
    .into_iter()
    .filter(|p| p.rest.is_empty())
    .map(|p| p.mentsu.into_iter().map(|m| m.retag(MentsuKind::Kokushi)).collect())
    .collect()
}

pub(super) fn covers_yaokyuu(mentsu: &[Mentsu]) -> bool {
    let ids: AHashSet<_> = mentsu.iter().map(Mentsu::identity).collect();
    YAOKYUU.iter().all(|t| ids.contains(t))
}

/// Thirteen orphans: 14 singletons covering every terminal and honor.
#[must_use]
pub fn solve_kokushi(tiles: &[Tile]) -> Vec<Vec<Mentsu>> {
    if tiles.len() != 14 {
        return vec![];
    }
    kokushi_assignments(tiles)
        .into_iter()
        .filter(|mentsu| covers_yaokyuu(mentsu))
        .collect()
}

impl GalaxyRule {
    /// Every decomposition of a complete hand under this rule.
    #[must_use]
    pub fn solve_hand(&self, tiles: &[Tile]) -> Vec<Vec<Mentsu>> {
        let mut ret = solve_normal_hand(tiles);
        let normal = ret.len();
        if self.chiitoi {
            ret.extend(solve_chiitoi(tiles));
        }
        let chiitoi = ret.len() - normal;
        if self.kokushi {
            ret.extend(solve_kokushi(tiles));
        }
        debug!(
            "{} tiles: {normal} normal, {chiitoi} chiitoi, {} kokushi",
            tiles.len(),
            ret.len() - normal - chiitoi,
        );
        ret
    }

    #[inline]
    #[must_use]
    pub fn solve_normal_hand(&self, tiles: &[Tile]) -> Vec<Vec<Mentsu>> {
        solve_normal_hand(tiles)
    }

    /// Empty when chiitoi is switched off.
    #[must_use]
    pub fn solve_chiitoi(&self, tiles: &[Tile]) -> Vec<Vec<Mentsu>> {
        if self.chiitoi { solve_chiitoi(tiles) } else { vec![] }
    }

    /// Empty when kokushi is switched off.
    #[must_use]
    pub fn solve_kokushi(&self, tiles: &[Tile]) -> Vec<Vec<Mentsu>> {
        if self.kokushi { solve_kokushi(tiles) } else { vec![] }
    }

    /// Tries every one of the 34 plain tiles as the last tile of `tiles`,
    /// returning the ones that complete the hand with their decompositions.
    #[must_use]
    pub fn solve_agari_tiles(&self, tiles: &[Tile]) -> Vec<(Tile, Vec<Vec<Mentsu>>)> {
        let mut hand = tiles.to_vec();
        all_kinds()
            .filter_map(|t| {
                hand.push(t);
                let divs = self.solve_hand(&hand);
                hand.pop();
                (!divs.is_empty()).then_some((t, divs))
            })
            .collect()
    }
}
