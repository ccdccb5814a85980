//! Rule engine for galaxy mahjong, a riichi variant with wildcard tiles.
//!
//! A galaxy tile stands for any tile of its family: a numeral of the same
//! rank in any suit, any wind or any dragon. The engine enumerates every meld
//! such tiles can form, every decomposition of a complete hand, and every
//! wait of a hand one tile short.

pub mod algo;
pub mod hand;
pub mod mentsu;
pub mod rule;
pub mod tile;
pub mod wall;
pub mod worker;

pub use algo::machi::{HandForm, Wait, WaitShape};
pub use mentsu::{Mentsu, MentsuKind};
pub use rule::GalaxyRule;
pub use tile::Tile;
