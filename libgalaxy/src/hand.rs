//! Tile notation.
//!
//! A tile is either a digit followed by a suit (`w`, `p`, `s`) or a single
//! honor symbol (`w s e n` for winds, `b l h` for dragons), followed by any
//! number of options (`g` galaxy, `r` aka). The leading digit is what tells
//! `1w` (a man tile) apart from `w` (the first wind).
use crate::tile::{DRAGON_SYMBOLS, Family, Suit, Tile, WIND_SYMBOLS};

use anyhow::{Context, Result, bail, ensure};

fn is_tile_start(b: u8) -> bool {
    b.is_ascii_digit() || WIND_SYMBOLS.contains(&b) || DRAGON_SYMBOLS.contains(&b)
}

/// Parses one tile token starting at `start`, returning the tile and the
/// index right after it.
fn parse_token(s: &str, start: usize) -> Result<(Tile, usize)> {
    let bytes = s.as_bytes();
    let mut i = start;

    let mut tile = match bytes[i] {
        b'0'..=b'9' => {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let digits = &s[start..i];
            let suit = match bytes.get(i) {
                Some(b'w') => Suit::Man,
                Some(b'p') => Suit::Pin,
                Some(b's') => Suit::Sou,
                Some(_) => bail!("unknown suit in {:?}", &s[start..=i]),
                None => bail!("missing suit after {digits:?}"),
            };
            i += 1;
            let rank: u8 = digits
                .parse()
                .with_context(|| format!("rank {digits:?} in {:?} is out of range", &s[start..i]))?;
            Tile::new(Family::Suit(suit), rank).with_context(|| format!("invalid tile {:?}", &s[start..i]))?
        }
        b => {
            let tile = if let Some(pos) = WIND_SYMBOLS.iter().position(|&c| c == b) {
                Tile::new_unchecked(Family::Wind, pos as u8 + 1)
            } else if let Some(pos) = DRAGON_SYMBOLS.iter().position(|&c| c == b) {
                Tile::new_unchecked(Family::Dragon, pos as u8 + 1)
            } else {
                bail!("unexpected {:?} at offset {start} in {s:?}", b as char);
            };
            i += 1;
            tile
        }
    };

    while i < bytes.len() && bytes[i].is_ascii_alphabetic() && !is_tile_start(bytes[i]) {
        tile = match bytes[i] {
            b'g' => tile.galaxy(),
            b'r' => tile.aka(),
            b => bail!("unknown option {:?} in {:?}", b as char, &s[start..=i]),
        };
        i += 1;
    }

    Ok((tile, i))
}

pub fn parse_tiles(s: &str) -> Result<Vec<Tile>> {
    ensure!(s.is_ascii(), "hand {s:?} contains non-ascii content");

    let bytes = s.as_bytes();
    let mut tiles = vec![];
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let (tile, end) = parse_token(s, i)?;
        tiles.push(tile);
        i = end;
    }

    Ok(tiles)
}

pub fn parse_tile(s: &str) -> Result<Tile> {
    let tiles = parse_tiles(s)?;
    ensure!(tiles.len() <= 1, "{s:?} holds {} tiles, expected one", tiles.len());
    tiles.into_iter().next().with_context(|| format!("missing tile in {s:?}"))
}

#[must_use]
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.to_string()).collect()
}
