use crate::report::{HandReport, Report, WaitReport};
use galaxy::GalaxyRule;
use galaxy::hand::parse_tiles;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

pub const MAX_TILES: usize = 14;

/// Reads a hand file, gunzipping it if the name ends in `.gz`.
pub fn read_hand_file(path: &Path) -> Result<String> {
    let inner = || -> Result<String> {
        let file = File::open(path)?;
        let raw = if path.extension().is_some_and(|ext| ext == "gz") {
            io::read_to_string(GzDecoder::new(file))?
        } else {
            let mut raw = String::new();
            io::BufReader::new(file).read_to_string(&mut raw)?;
            raw
        };
        Ok(raw)
    };
    inner().with_context(|| format!("error when reading {}", path.display()))
}

/// Decomposes a complete hand or lists the waits of a tenpai one, depending
/// on its size.
pub fn solve_line(rule: &GalaxyRule, line: &str) -> Result<Report> {
    let hand = parse_tiles(line)?;
    match hand.len() {
        n if n > MAX_TILES => bail!("{n} tiles, at most {MAX_TILES} are allowed"),
        n if n % 3 == 2 => {
            let decompositions = rule.solve_hand(&hand);
            Ok(Report::Hand(HandReport { hand, decompositions }))
        }
        n if n % 3 == 1 => {
            let waits = rule.solve_waits(&hand);
            Ok(Report::Wait(WaitReport::new(hand, waits)))
        }
        n => bail!("{n} tiles is neither a complete nor a tenpai hand size"),
    }
}

/// Solves every non-empty, non-comment line of `raw` in parallel.
pub fn solve_all(rule: &GalaxyRule, raw: &str) -> Vec<Report> {
    let lines: Vec<_> = raw
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
        .collect();
    let len = lines.len() as u64;
    lines
        .into_par_iter()
        .progress_count(len)
        .map(|(line, s)| {
            solve_line(rule, s).unwrap_or_else(|e| Report::Error {
                line,
                error: format!("{e:#}"),
            })
        })
        .collect()
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    pub fn lines() {
        let raw = "
# complete
1s1s2s2s3s3s4s4s
1p2p3p4p5p6p7p8p9p1s1s1sh

1s2s
9k
";
        let reports = solve_all(&GalaxyRule::default(), raw);
        assert_eq!(reports.len(), 4);
        assert!(matches!(&reports[0], Report::Hand(r) if r.decompositions.len() == 2));
        assert!(matches!(&reports[1], Report::Wait(r) if r.waits.len() == 1));
        assert!(matches!(&reports[2], Report::Hand(r) if r.decompositions.is_empty()));
        assert!(matches!(reports[3], Report::Error { line: 7, .. }));
    }

    #[test]
    pub fn too_many_tiles() {
        let rule = GalaxyRule::default();
        assert!(solve_line(&rule, "1s1s1s2s2s2s3s3s3s4s4s4s5s5s5s").is_err());
    }
}
