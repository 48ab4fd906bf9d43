//! Score ledger: the cumulative point total shared by every mini-game.
//!
//! The total lives in memory and is written through to the store on every
//! change. A missing or unreadable value loads as zero, and a failed write is
//! logged but never surfaced to the player.

use serde::{Deserialize, Serialize};

use crate::storage::ScoreStore;

/// Coins earned and progress towards the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinProgress {
    pub coins: u64,
    pub points_to_next_coin: u64,
}

/// `coins = total / coin_value`; the remainder to the next coin is a full
/// `coin_value` when the total sits exactly on a coin boundary.
/// A zero `coin_value` never mints coins.
pub fn derive_coins(total: u64, coin_value: u64) -> CoinProgress {
    if coin_value == 0 {
        return CoinProgress {
            coins: 0,
            points_to_next_coin: 0,
        };
    }

    let remainder = total % coin_value;
    CoinProgress {
        coins: total / coin_value,
        points_to_next_coin: coin_value - remainder,
    }
}

pub struct ScoreLedger<S: ScoreStore> {
    store: S,
    key: String,
    coin_value: u64,
    total: u64,
}

impl<S: ScoreStore> ScoreLedger<S> {
    /// Open the ledger and load the persisted total
    pub fn open(store: S, key: impl Into<String>, coin_value: u64) -> Self {
        let mut ledger = Self {
            store,
            key: key.into(),
            coin_value,
            total: 0,
        };
        ledger.total = ledger.load();
        ledger
    }

    /// Read the persisted total; absent or unparseable values count as zero
    pub fn load(&self) -> u64 {
        match self.store.read(&self.key) {
            Ok(Some(raw)) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(key = %self.key, value = %raw, "Discarding unreadable score");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Score store read failed");
                0
            }
        }
    }

    /// Add points and persist immediately. Returns the new total.
    pub fn add_points(&mut self, points: u64) -> u64 {
        self.total = self.total.saturating_add(points);

        match self.store.write(&self.key, &self.total.to_string()) {
            Ok(()) => tracing::debug!(key = %self.key, total = self.total, "Score saved"),
            Err(e) => tracing::warn!(
                key = %self.key,
                total = self.total,
                error = %e,
                "Score could not be saved"
            ),
        }

        self.total
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn coins(&self) -> CoinProgress {
        derive_coins(self.total, self.coin_value)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
