//! Playroom session: one live round per mini-game, the shared score ledger
//! and the narrator.
//!
//! Every input is a synchronous call that returns what happened. Scheduling
//! the next round after a win is left to the caller via
//! [`AnswerReport::advance_after`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::config::PlayroomConfig;
use crate::errors::PlayroomResult;
use crate::games::{narration, start_round, submit_answer, Catalog, GameType, Outcome, Round, TracePad};
use crate::ledger::{CoinProgress, ScoreLedger};
use crate::speech::{Narrator, Speaker};
use crate::storage::ScoreStore;

/// Everything a renderer needs after an input
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReport {
    pub game: GameType,
    pub round_id: Uuid,
    pub outcome: Outcome,
    pub total_points: u64,
    pub coins: CoinProgress,
    /// Set only for the answer that earned the round's point
    pub advance_after: Option<Duration>,
}

pub struct Playroom<S: ScoreStore, V: Speaker> {
    config: PlayroomConfig,
    catalogs: Vec<Catalog>,
    rounds: Vec<Round>,
    trace_pad: TracePad,
    ledger: ScoreLedger<S>,
    narrator: Narrator<V>,
    active: GameType,
    rng: StdRng,
}

impl<S: ScoreStore, V: Speaker> Playroom<S, V> {
    pub fn new(config: PlayroomConfig, store: S, speaker: V) -> PlayroomResult<Self> {
        Self::with_rng(config, store, speaker, StdRng::from_entropy())
    }

    /// Deterministic session for tests and replays
    pub fn with_seed(config: PlayroomConfig, store: S, speaker: V, seed: u64) -> PlayroomResult<Self> {
        Self::with_rng(config, store, speaker, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlayroomConfig, store: S, speaker: V, mut rng: StdRng) -> PlayroomResult<Self> {
        config.validate()?;

        let catalogs: Vec<Catalog> = GameType::ALL.iter().map(|&game| Catalog::for_game(game)).collect();
        let rounds = catalogs
            .iter()
            .map(|catalog| start_round(catalog, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;

        let ledger = ScoreLedger::open(store, config.storage.score_key.clone(), config.scoring.coin_value);
        let narrator = Narrator::new(speaker, config.audio.clone());

        tracing::info!(total_points = ledger.total(), "Playroom ready");

        Ok(Self {
            config,
            catalogs,
            rounds,
            trace_pad: TracePad::new(),
            ledger,
            narrator,
            active: GameType::Phonics,
            rng,
        })
    }

    pub fn select_game(&mut self, game: GameType) {
        self.active = game;
    }

    pub fn active_game(&self) -> GameType {
        self.active
    }

    pub fn round(&self, game: GameType) -> &Round {
        &self.rounds[game.index()]
    }

    pub fn trace_pad(&self) -> &TracePad {
        &self.trace_pad
    }

    /// Replace the game's round with a fresh one and speak its prompt
    pub fn new_round(&mut self, game: GameType) -> PlayroomResult<&Round> {
        let round = start_round(&self.catalogs[game.index()], &mut self.rng)?;
        if game == GameType::Handwriting {
            self.trace_pad.clear();
        }
        self.rounds[game.index()] = round;
        self.listen(game);
        Ok(&self.rounds[game.index()])
    }

    /// Repeat the current prompt
    pub fn listen(&mut self, game: GameType) {
        let prompt = narration::prompt(&self.rounds[game.index()]);
        self.narrator.speak(&prompt);
    }

    /// Answer a choice game by option id or label
    pub fn answer(&mut self, game: GameType, choice: &str) -> PlayroomResult<AnswerReport> {
        let outcome = submit_answer(&mut self.rounds[game.index()], choice)?;
        Ok(self.settle(game, outcome))
    }

    pub fn pen_down(&mut self) {
        self.trace_pad.pen_down();
    }

    pub fn pen_move(&mut self) {
        self.trace_pad.pen_move();
    }

    /// Lift the pen; reports an outcome once ink has been applied
    pub fn pen_up(&mut self) -> Option<AnswerReport> {
        let round = &mut self.rounds[GameType::Handwriting.index()];
        let outcome = self.trace_pad.pen_up(round)?;
        Some(self.settle(GameType::Handwriting, outcome))
    }

    pub fn clear_canvas(&mut self) {
        self.trace_pad.clear();
    }

    /// Flip the audio switch, returning the new state
    pub fn toggle_audio(&mut self) -> bool {
        let enabled = self.narrator.toggle();
        tracing::info!(enabled, "Audio toggled");
        enabled
    }

    pub fn total_points(&self) -> u64 {
        self.ledger.total()
    }

    pub fn coins(&self) -> CoinProgress {
        self.ledger.coins()
    }

    pub fn ledger(&self) -> &ScoreLedger<S> {
        &self.ledger
    }

    pub fn narrator(&self) -> &Narrator<V> {
        &self.narrator
    }

    fn settle(&mut self, game: GameType, outcome: Outcome) -> AnswerReport {
        if outcome.earns_point() {
            self.ledger.add_points(self.config.scoring.points_per_round);
        }

        let round = &self.rounds[game.index()];
        if let Some(line) = narration::feedback(round, &outcome) {
            self.narrator.speak(&line);
        }

        AnswerReport {
            game,
            round_id: round.round_id,
            outcome,
            total_points: self.ledger.total(),
            coins: self.ledger.coins(),
            advance_after: outcome.earns_point().then(|| self.config.advance_delay()),
        }
    }
}
