//! Waits of a hand one tile short of complete.
use super::agari::{covers_yaokyuu, kokushi_assignments};
use super::extract::extract_group;
use super::search::{DecompositionKey, Partial, decompose_all, decomposition_key};
use crate::mentsu::{Mentsu, MentsuKind, make_mentsu, make_taatsu};
use crate::rule::GalaxyRule;
use crate::tile::{Family, Tile, YAOKYUU};
use std::fmt;

use ahash::AHashSet;
use anyhow::{Result, bail};
use log::{debug, warn};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum HandForm {
    Normal,
    Chiitoi,
    Kokushi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum WaitShape {
    Ryanmen,
    Kanchan,
    Penchan,
    Tanki,
    Shanpon,
    KokushiIchimen,
    KokushiJuusanmen,
}

impl fmt::Display for HandForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for WaitShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wait {
    pub form: HandForm,
    /// Complete mentsu first, then the group(s) still waiting.
    pub mentsu: Vec<Mentsu>,
    /// Plain tiles that complete the hand, in family order.
    pub waiting: Vec<Tile>,
    pub shape: WaitShape,
}

impl Wait {
    fn key(&self) -> (HandForm, WaitShape, DecompositionKey) {
        (self.form, self.shape, decomposition_key(&self.mentsu))
    }
}

/// Classifies the incomplete part of a tenpai hand.
///
/// `group` must be a single koritsu, two toitsu or a single taatsu.
pub fn derive_wait_shape(group: &[Mentsu]) -> Result<(Vec<Tile>, WaitShape)> {
    match group {
        [m] if m.kind == MentsuKind::Koritsu => Ok((vec![m.identity()], WaitShape::Tanki)),
        [a, b] if a.kind == MentsuKind::Toitsu && b.kind == MentsuKind::Toitsu => {
            let mut waiting = vec![a.identity(), b.identity()];
            waiting.sort_unstable();
            Ok((waiting, WaitShape::Shanpon))
        }
        [m] if m.kind == MentsuKind::Taatsu => {
            let Family::Suit(_) = m.family else {
                bail!("taatsu {m} resolved to an honor");
            };
            let (lo, hi) = (m.rank, m.tiles[1].rank());
            let at = |rank| Tile::new_unchecked(m.family, rank);
            match (hi - lo, lo, hi) {
                (2, ..) => Ok((vec![at(lo + 1)], WaitShape::Kanchan)),
                (1, 1, _) => Ok((vec![at(3)], WaitShape::Penchan)),
                (1, _, 9) => Ok((vec![at(7)], WaitShape::Penchan)),
                (1, ..) => Ok((vec![at(lo - 1), at(hi + 1)], WaitShape::Ryanmen)),
                _ => bail!("taatsu {m} has a rank gap of {}", hi - lo),
            }
        }
        _ => bail!(
            "cannot derive a wait from {}",
            group.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" "),
        ),
    }
}

fn push_wait(waits: &mut Vec<Wait>, form: HandForm, complete: &[Mentsu], group: Vec<Mentsu>) {
    match derive_wait_shape(&group) {
        Ok((waiting, shape)) => {
            let mut mentsu = complete.to_vec();
            mentsu.extend(group);
            waits.push(Wait {
                form,
                mentsu,
                waiting,
                shape,
            });
        }
        Err(e) => warn!("skipping malformed wait: {e:#}"),
    }
}

/// Mentsu taken from the whole hand; the leftover is a tanki or a shanpon.
#[must_use]
pub fn solve_mentsu_first(tiles: &[Tile]) -> Vec<Wait> {
    if tiles.len() % 3 != 1 {
        return vec![];
    }
    let seed = Partial::new(vec![], tiles.to_vec());
    let mut waits = vec![];
    for leaf in decompose_all(vec![seed], |p| extract_group(3, &p.rest)) {
        match leaf.rest.len() {
            1 => {
                for single in make_mentsu(&leaf.rest, false) {
                    push_wait(&mut waits, HandForm::Normal, &leaf.mentsu, vec![single]);
                }
            }
            4 => {
                for (a, rest) in extract_group(2, &leaf.rest) {
                    for b in make_mentsu(&rest, false) {
                        if b.kind == MentsuKind::Toitsu {
                            push_wait(&mut waits, HandForm::Normal, &leaf.mentsu, vec![a.clone(), b]);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    waits
}

/// A toitsu, then mentsu; the leftover two tiles are a taatsu.
#[must_use]
pub fn solve_toitsu_first(tiles: &[Tile]) -> Vec<Wait> {
    if tiles.len() % 3 != 1 {
        return vec![];
    }
    let seeds = extract_group(2, tiles)
        .into_iter()
        .map(|(pair, rest)| Partial::new(vec![pair], rest))
        .collect();
    let mut waits = vec![];
    for leaf in decompose_all(seeds, |p| extract_group(3, &p.rest)) {
        if let &[a, b] = leaf.rest.as_slice() {
            for taatsu in make_taatsu(a, b) {
                push_wait(&mut waits, HandForm::Normal, &leaf.mentsu, vec![taatsu]);
            }
        }
    }
    waits
}

/// Six toitsu of distinct identities plus a single of a seventh identity.
#[must_use]
pub fn solve_chiitoi_wait(tiles: &[Tile]) -> Vec<Wait> {
    if tiles.len() != 13 {
        return vec![];
    }
    let seed = Partial::new(vec![], tiles.to_vec());
    let mut waits = vec![];
    for leaf in decompose_all(vec![seed], |p| extract_group(2, &p.rest)) {
        if leaf.mentsu.len() != 6 || leaf.rest.len() != 1 {
            continue;
        }
        let ids: AHashSet<_> = leaf.mentsu.iter().map(Mentsu::identity).collect();
        if ids.len() != 6 {
            continue;
        }
        for single in make_mentsu(&leaf.rest, false) {
            if !ids.contains(&single.identity()) {
                push_wait(&mut waits, HandForm::Chiitoi, &leaf.mentsu, vec![single]);
            }
        }
    }
    waits
}

/// Thirteen terminals and honors missing one identity, or holding all
/// thirteen once.
#[must_use]
pub fn solve_kokushi_wait(tiles: &[Tile]) -> Vec<Wait> {
    if tiles.len() != 13 {
        return vec![];
    }
    kokushi_assignments(tiles)
        .into_iter()
        .filter_map(|mentsu| {
            let ids: AHashSet<_> = mentsu.iter().map(Mentsu::identity).collect();
            let (waiting, shape) = if covers_yaokyuu(&mentsu) {
                (YAOKYUU.to_vec(), WaitShape::KokushiJuusanmen)
            } else if ids.len() == 12 {
                let missing = YAOKYUU.iter().copied().filter(|t| !ids.contains(t)).collect();
                (missing, WaitShape::KokushiIchimen)
            } else {
                return None;
            };
            Some(Wait {
                form: HandForm::Kokushi,
                mentsu,
                waiting,
                shape,
            })
        })
        .collect()
}

impl GalaxyRule {
    /// Every wait of a hand one tile short of complete, each listed once.
    #[must_use]
    pub fn solve_waits(&self, tiles: &[Tile]) -> Vec<Wait> {
        let mut candidates = solve_mentsu_first(tiles);
        candidates.extend(solve_toitsu_first(tiles));
        if self.chiitoi {
            candidates.extend(solve_chiitoi_wait(tiles));
        }
        if self.kokushi {
            candidates.extend(solve_kokushi_wait(tiles));
        }

        let mut seen = AHashSet::new();
        let waits: Vec<_> = candidates.into_iter().filter(|w| seen.insert(w.key())).collect();
        debug!("{} tiles: {} waits", tiles.len(), waits.len());
        waits
    }

    /// Distinct tiles completing the hand, in family order.
    #[must_use]
    pub fn waiting_tiles(&self, tiles: &[Tile]) -> Vec<Tile> {
        let mut ret: Vec<_> = self.solve_waits(tiles).into_iter().flat_map(|w| w.waiting).collect();
        ret.sort_unstable();
        ret.dedup();
        ret
    }
}
