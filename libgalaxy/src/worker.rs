//! Wait solving off the caller's thread.
use crate::algo::machi::Wait;
use crate::rule::GalaxyRule;
use crate::tile::Tile;
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Receiver};
use log::debug;

/// Solves the waits of `tiles` on a background thread.
///
/// The result arrives on the returned receiver. Dropping the receiver
/// abandons the result; the computation itself still runs to completion.
pub fn spawn_wait_solver(rule: Arc<GalaxyRule>, tiles: Vec<Tile>) -> Receiver<Vec<Wait>> {
    let (tx, rx) = channel::bounded(1);
    thread::spawn(move || {
        let waits = rule.solve_waits(&tiles);
        if tx.send(waits).is_err() {
            debug!("wait solver result for {} tiles discarded", tiles.len());
        }
    });
    rx
}
