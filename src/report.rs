use galaxy::hand::tiles_to_string;
use galaxy::{Mentsu, Tile, Wait};
use std::fmt;

use console::style;
use serde::Serialize;

fn mentsu_to_string(mentsu: &[Mentsu]) -> String {
    mentsu.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" ")
}

fn tiles_to_spaced(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
}

/// Every decomposition of a complete hand.
#[derive(Debug, Serialize)]
pub struct HandReport {
    pub hand: Vec<Tile>,
    pub decompositions: Vec<Vec<Mentsu>>,
}

impl fmt::Display for HandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", tiles_to_string(&self.hand))?;
        match self.decompositions.len() {
            0 => return write!(f, "{}", style("no agari").red()),
            1 => writeln!(f, "1 decomposition")?,
            n => writeln!(f, "{n} decompositions")?,
        }
        let lines = self
            .decompositions
            .iter()
            .map(|div| format!("  {}", mentsu_to_string(div)))
            .collect::<Vec<_>>()
            .join("\n");
        f.write_str(&lines)
    }
}

/// Waits of a hand one tile short.
#[derive(Debug, Serialize)]
pub struct WaitReport {
    pub hand: Vec<Tile>,
    /// Union of the waiting tiles of every wait.
    pub waiting: Vec<Tile>,
    pub waits: Vec<Wait>,
}

impl WaitReport {
    pub fn new(hand: Vec<Tile>, waits: Vec<Wait>) -> Self {
        let mut waiting: Vec<_> = waits.iter().flat_map(|w| w.waiting.iter().copied()).collect();
        waiting.sort_unstable();
        waiting.dedup();
        Self { hand, waiting, waits }
    }
}

impl fmt::Display for WaitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", tiles_to_string(&self.hand))?;
        if self.waits.is_empty() {
            return write!(f, "{}", style("noten").red());
        }
        writeln!(f, "waiting on {}", style(tiles_to_spaced(&self.waiting)).bold())?;
        let lines = self
            .waits
            .iter()
            .map(|w| {
                format!(
                    "  {:<7} {:<16} {:<11} | {}",
                    w.form.to_string(),
                    w.shape.to_string(),
                    tiles_to_spaced(&w.waiting),
                    mentsu_to_string(&w.mentsu),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        f.write_str(&lines)
    }
}

#[derive(Debug, Serialize)]
pub struct DoraReport {
    pub indicator: Tile,
    pub doras: Vec<Tile>,
}

impl fmt::Display for DoraReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.indicator, tiles_to_spaced(&self.doras))
    }
}

#[derive(Debug, Serialize)]
pub struct DealReport {
    pub seed: u64,
    pub tiles: Vec<Tile>,
}

impl fmt::Display for DealReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (seed {})", tiles_to_string(&self.tiles), self.seed)
    }
}

/// Outcome of one line of a batch file.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Hand(HandReport),
    Wait(WaitReport),
    Error { line: usize, error: String },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hand(r) => fmt::Display::fmt(r, f),
            Self::Wait(r) => fmt::Display::fmt(r, f),
            Self::Error { line, error } => write!(f, "line {line}: {}", style(error).red()),
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use galaxy::GalaxyRule;
    use galaxy::hand::parse_tiles;

    #[test]
    pub fn hand_report() {
        console::set_colors_enabled(false);
        let hand = parse_tiles("1s1s").unwrap();
        let decompositions = GalaxyRule::default().solve_hand(&hand);
        let report = HandReport { hand, decompositions };
        assert_eq!(report.to_string(), "1s1s: 1 decomposition\n  1s1s(s)");

        let report = HandReport {
            hand: parse_tiles("1s2s").unwrap(),
            decompositions: vec![],
        };
        assert_eq!(report.to_string(), "1s2s: no agari");
    }

    #[test]
    pub fn wait_report() {
        console::set_colors_enabled(false);
        let hand = parse_tiles("1p2p3p4p5p6p7p8p9p1s1s1sh").unwrap();
        let waits = GalaxyRule::default().solve_waits(&hand);
        let report = WaitReport::new(hand, waits);
        let s = report.to_string();
        assert!(s.starts_with("1p2p3p4p5p6p7p8p9p1s1s1sh: waiting on h\n"), "{s}");
        assert!(s.contains("Tanki"), "{s}");

        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["waiting"][0], "h");
        assert_eq!(v["waits"][0]["shape"], "Tanki");
    }

    #[test]
    pub fn batch_error() {
        let report = Report::Error {
            line: 3,
            error: "bad".to_owned(),
        };
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["line"], 3);
    }
}
