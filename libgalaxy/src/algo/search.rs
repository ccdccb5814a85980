//! Breadth-first decomposition search.
//!
//! Every generation extends each partial decomposition by one meld. A partial
//! the extractor can no longer extend is a leaf; leaves with an empty
//! remainder are full decompositions, the others feed the wait solver.
use crate::mentsu::{Mentsu, MentsuKey};
use crate::tile::Tile;

use ahash::AHashSet;
use log::{debug, trace};

/// Melds in a canonical order, so that decompositions differing only in meld
/// order compare equal.
pub type DecompositionKey = Vec<MentsuKey>;

#[must_use]
pub fn decomposition_key(mentsu: &[Mentsu]) -> DecompositionKey {
    let mut key: Vec<_> = mentsu.iter().map(Mentsu::key).collect();
    key.sort_unstable();
    key
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partial {
    pub mentsu: Vec<Mentsu>,
    /// Tiles not yet assigned to any meld.
    pub rest: Vec<Tile>,
}

impl Partial {
    #[must_use]
    pub fn new(mentsu: Vec<Mentsu>, rest: Vec<Tile>) -> Self {
        Self { mentsu, rest }
    }

    #[must_use]
    pub fn key(&self) -> DecompositionKey {
        decomposition_key(&self.mentsu)
    }
}

/// Runs the search from `seeds` until no partial can be extended, returning
/// every distinct leaf.
///
/// `extractor` proposes the next meld together with the remainder it leaves.
/// It sees the whole partial, so it may refuse melds based on what has been
/// taken so far.
pub fn decompose_all<F>(seeds: Vec<Partial>, mut extractor: F) -> Vec<Partial>
where
    F: FnMut(&Partial) -> Vec<(Mentsu, Vec<Tile>)>,
{
    let mut seen = AHashSet::new();
    let mut frontier: Vec<_> = seeds.into_iter().filter(|p| seen.insert(p.key())).collect();
    let mut leaves = vec![];
    let mut generation = 0;

    while !frontier.is_empty() {
        debug!("generation {generation}: {} partials", frontier.len());
        let mut next = vec![];
        seen.clear();

        for partial in frontier {
            let extracted = extractor(&partial);
            if extracted.is_empty() {
                trace!("leaf with {} mentsu, {} tiles left", partial.mentsu.len(), partial.rest.len());
                leaves.push(partial);
                continue;
            }
            for (m, rest) in extracted {
                let mut mentsu = partial.mentsu.clone();
                mentsu.push(m);
                let candidate = Partial::new(mentsu, rest);
                if seen.insert(candidate.key()) {
                    next.push(candidate);
                }
            }
        }

        frontier = next;
        generation += 1;
    }

    debug!("search done after {generation} generations, {} leaves", leaves.len());
    leaves
}
