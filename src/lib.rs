//! Playroom - round engine for early-learning mini-games
//!
//! Phonics, counting, shapes, colors and handwriting tracing share one round
//! controller: pick a target from a fixed catalog, offer a few options, judge
//! answers, and award a single point per round to a persisted score ledger.
//! Rendering and speech synthesis sit behind small traits so any front-end can
//! drive the engine.

pub mod config;
pub mod errors;
pub mod games;
pub mod ledger;
pub mod session;
pub mod speech;
pub mod storage;

pub use config::PlayroomConfig;
pub use errors::{PlayroomError, PlayroomResult};
pub use games::{Catalog, CatalogEntry, GameType, Outcome, Round};
pub use ledger::{derive_coins, CoinProgress, ScoreLedger};
pub use session::{AnswerReport, Playroom};
pub use speech::{Narrator, Speaker};
pub use storage::{MemoryScoreStore, RocksScoreStore, ScoreStore};
