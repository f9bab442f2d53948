//! Table change notifications
//!
//! Every committed mutation bumps a per-table version. Observers hold a
//! watch receiver and re-query when the version moves.

use tokio::sync::watch;

/// Tables that can be observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Playlist,
    Song,
}

/// Per-table version counters
#[derive(Debug)]
pub struct InvalidationTracker {
    playlist: watch::Sender<u64>,
    song: watch::Sender<u64>,
}

impl InvalidationTracker {
    pub fn new() -> Self {
        Self {
            playlist: watch::Sender::new(0),
            song: watch::Sender::new(0),
        }
    }

    fn sender(&self, table: Table) -> &watch::Sender<u64> {
        match table {
            Table::Playlist => &self.playlist,
            Table::Song => &self.song,
        }
    }

    /// Mark a table as changed and wake its observers
    pub fn notify(&self, table: Table) {
        self.sender(table)
            .send_modify(|version| *version = version.wrapping_add(1));
    }

    pub fn subscribe(&self, table: Table) -> watch::Receiver<u64> {
        self.sender(table).subscribe()
    }

    pub fn version(&self, table: Table) -> u64 {
        *self.sender(table).borrow()
    }
}

impl Default for InvalidationTracker {
    fn default() -> Self {
        Self::new()
    }
}
