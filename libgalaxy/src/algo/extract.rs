use crate::mentsu::{Mentsu, make_mentsu};
use crate::tile::{Tile, cmp_by_rank};

use tinyvec::ArrayVec;

fn for_each_combination<F>(sorted: &[Tile], n: usize, start: usize, picked: &mut ArrayVec<[usize; 4]>, f: &mut F)
where
    F: FnMut(&[usize]),
{
    if picked.len() == n {
        f(picked.as_slice());
        return;
    }
    for i in start..sorted.len() {
        // equal siblings would produce the same multiset again
        if i > start && sorted[i] == sorted[i - 1] {
            continue;
        }
        picked.push(i);
        for_each_combination(sorted, n, i + 1, picked, f);
        picked.pop();
    }
}

/// Takes every distinct `n`-tile group out of `pool` that forms a meld.
///
/// Each candidate meld is returned with the tiles left over, sorted by
/// [`cmp_by_rank`]. Groups that differ only in which copy of an identical
/// tile they take are enumerated once. A pool smaller than `n` yields
/// nothing.
#[must_use]
pub fn extract_group(n: usize, pool: &[Tile]) -> Vec<(Mentsu, Vec<Tile>)> {
    if n == 0 || n > 4 || pool.len() < n {
        return vec![];
    }
    let mut sorted = pool.to_vec();
    sorted.sort_unstable_by(cmp_by_rank);

    let mut ret = vec![];
    let mut picked = ArrayVec::new();
    for_each_combination(&sorted, n, 0, &mut picked, &mut |idxs: &[usize]| {
        let group: ArrayVec<[Tile; 4]> = idxs.iter().map(|&i| sorted[i]).collect();
        let candidates = make_mentsu(&group, false);
        if candidates.is_empty() {
            return;
        }
        let rest: Vec<_> = sorted
            .iter()
            .enumerate()
            .filter(|(i, _)| !idxs.contains(i))
            .map(|(_, &t)| t)
            .collect();
        ret.extend(candidates.into_iter().map(|m| (m, rest.clone())));
    });
    ret
}

/// Takes the lowest tile of `pool` as a koritsu, once per identity it can
/// resolve to.
#[must_use]
pub fn extract_first(pool: &[Tile]) -> Vec<(Mentsu, Vec<Tile>)> {
    let mut sorted = pool.to_vec();
    sorted.sort_unstable_by(cmp_by_rank);
    let Some(&first) = sorted.first() else {
        return vec![];
    };
    let rest = sorted[1..].to_vec();
    make_mentsu(&[first], false)
        .into_iter()
        .map(|m| (m, rest.clone()))
        .collect()
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::hand::{parse_tiles, tiles_to_string};
    use crate::mentsu::MentsuKind;

    #[test]
    pub fn toitsu() {
        let test_one = |s: &str, expected: usize| {
            let pool = parse_tiles(s).unwrap();
            let ret = extract_group(2, &pool);
            assert_eq!(ret.len(), expected, "failed for {s}");
            assert!(
                ret.iter().all(|(m, rest)| m.kind == MentsuKind::Toitsu && rest.len() == pool.len() - 2),
                "failed for {s}",
            );
        };
        test_one("1s1s2w2w3s", 2);
        test_one("1s1s1sg2w2w3s", 3);
        test_one("1s2s3s4s5s", 0);
    }

    #[test]
    pub fn mentsu() {
        let test_one = |s: &str, expected: usize| {
            let ret = extract_group(3, &parse_tiles(s).unwrap());
            assert_eq!(ret.len(), expected, "failed for {s}");
        };
        test_one("1s1s1s2s3s", 2);
        test_one("1s1s1sg2s3s", 3);
        test_one("1sg2wg3pg4w", 4);
        test_one("wsenblh", 0);
    }

    #[test]
    pub fn remainder() {
        let ret = extract_group(3, &parse_tiles("3s1s2s9p").unwrap());
        assert_eq!(ret.len(), 1);
        assert_eq!(ret[0].0.kind, MentsuKind::Shuntsu);
        assert_eq!(tiles_to_string(&ret[0].1), "9p");
    }

    #[test]
    pub fn too_small() {
        let pool = parse_tiles("1s1s").unwrap();
        assert!(extract_group(3, &pool).is_empty());
        assert!(extract_group(2, &[]).is_empty());
        assert!(extract_group(0, &pool).is_empty());
        assert!(extract_first(&[]).is_empty());
    }

    #[test]
    pub fn first() {
        let ret = extract_first(&parse_tiles("9s1sg").unwrap());
        assert_eq!(ret.len(), 3);
        assert!(ret.iter().all(|(m, rest)| m.kind == MentsuKind::Koritsu && tiles_to_string(rest) == "9s"));
    }
}
