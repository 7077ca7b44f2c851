use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use web_time::Instant;

use crate::{
    BoardLayout, Card, CardIndex, CardState, Difficulty, FlipOutcome, GameError, GameSummary,
    HighScoreTable, MatchOutcome, Result, ScoreEntry, Theme,
};

/// Coarse lifecycle state of a session.
///
/// Valid transitions:
/// - Active -> Paused (pause)
/// - Paused -> Active (resume)
/// - Active | Paused -> Finished (finish)
/// - any -> Idle (back to menu)
/// - any -> Active (restart)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Active,
    Paused,
    Finished,
}

impl Phase {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// A single play-through of one board: flip bookkeeping, counters, and
/// pause-aware elapsed time. All clock reads are injected through `now`
/// parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    difficulty: Difficulty,
    theme: Theme,
    board: Vec<Card>,
    flipped: SmallVec<[CardIndex; 2]>,
    matched_pairs: u32,
    total_pairs: u32,
    move_count: u32,
    combo: u32,
    max_combo: u32,
    elapsed_before_pause: Duration,
    resumed_at: Option<Instant>,
    phase: Phase,
}

impl GameSession {
    /// Starts a session on a freshly shuffled board. The board size comes
    /// from the difficulty, the faces from the theme.
    pub fn new(difficulty: Difficulty, theme: Theme, seed: u64, now: Instant) -> Self {
        Self::with_layout(
            difficulty,
            theme,
            BoardLayout::random(difficulty.pair_count(), seed),
            now,
        )
    }

    /// Starts a session on a prearranged layout. Deterministic companion to
    /// [`GameSession::new`].
    pub fn with_layout(
        difficulty: Difficulty,
        theme: Theme,
        layout: BoardLayout,
        now: Instant,
    ) -> Self {
        Self {
            difficulty,
            theme,
            board: layout.deal(),
            flipped: SmallVec::new(),
            matched_pairs: 0,
            total_pairs: layout.pair_count().into(),
            move_count: 0,
            combo: 0,
            max_combo: 0,
            elapsed_before_pause: Duration::ZERO,
            resumed_at: Some(now),
            phase: Phase::Active,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cards(&self) -> &[Card] {
        &self.board
    }

    pub fn card_at(&self, index: CardIndex) -> Result<Card> {
        self.board
            .get(usize::from(index))
            .copied()
            .ok_or(GameError::InvalidIndex)
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn flipped_count(&self) -> usize {
        self.flipped.len()
    }

    /// Turns a face-down card face up. Anything else (wrong phase, face-up
    /// card, selection already full) is reported as `NoChange`; flips race
    /// against resolution timers, so they are never an error.
    pub fn flip_card(&mut self, index: CardIndex) -> Result<FlipOutcome> {
        let slot = usize::from(index);
        if slot >= self.board.len() {
            return Err(GameError::InvalidIndex);
        }
        if !self.phase.is_active() || self.flipped.len() >= 2 {
            return Ok(FlipOutcome::NoChange);
        }
        if !self.board[slot].state.is_hidden() {
            return Ok(FlipOutcome::NoChange);
        }

        self.board[slot].state = CardState::Flipped;
        self.flipped.push(index);
        log::trace!("flipped card {}", index);

        if self.flipped.len() == 2 {
            // The move is counted when the selection fills, before the
            // delayed match check runs.
            self.move_count += 1;
            Ok(FlipOutcome::PairPending)
        } else {
            Ok(FlipOutcome::Flipped)
        }
    }

    /// Resolves the two flipped cards into matched or hidden again. Runs in
    /// the paused phase too: the match-check delay is a fire-once callback
    /// that a pause must not cancel.
    pub fn resolve_pair(&mut self) -> Result<MatchOutcome> {
        if matches!(self.phase, Phase::Idle | Phase::Finished) {
            return Ok(MatchOutcome::NoChange);
        }
        let &[first, second] = &self.flipped[..] else {
            return Ok(MatchOutcome::NoChange);
        };
        self.flipped.clear();

        let (a, b) = (usize::from(first), usize::from(second));
        if self.board[a].symbol == self.board[b].symbol {
            self.board[a].state = CardState::Matched;
            self.board[b].state = CardState::Matched;
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
            self.matched_pairs += 1;
            log::debug!(
                "matched pair {}/{} (combo x{})",
                self.matched_pairs,
                self.total_pairs,
                self.combo
            );

            if self.matched_pairs == self.total_pairs {
                Ok(MatchOutcome::AllMatched)
            } else {
                Ok(MatchOutcome::Matched)
            }
        } else {
            self.board[a].state = CardState::Hidden;
            self.board[b].state = CardState::Hidden;
            self.combo = 0;
            Ok(MatchOutcome::Mismatched)
        }
    }

    /// Total play time, excluding paused intervals.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.elapsed_before_pause + self.running_interval(now)
    }

    pub fn elapsed_secs(&self, now: Instant) -> u32 {
        self.elapsed(now).as_secs().try_into().unwrap_or(u32::MAX)
    }

    fn running_interval(&self, now: Instant) -> Duration {
        self.resumed_at
            .map_or(Duration::ZERO, |since| now.duration_since(since))
    }

    pub fn pause(&mut self, now: Instant) -> Result<()> {
        if !self.phase.is_active() {
            return Err(GameError::NotActive);
        }
        self.elapsed_before_pause += self.running_interval(now);
        self.resumed_at = None;
        self.phase = Phase::Paused;
        log::debug!("paused at {:?}", self.elapsed_before_pause);
        Ok(())
    }

    pub fn resume(&mut self, now: Instant) -> Result<()> {
        if !self.phase.is_paused() {
            return Err(GameError::NotPaused);
        }
        self.resumed_at = Some(now);
        self.phase = Phase::Active;
        Ok(())
    }

    /// Closes out a fully cleared board: freezes the clock, submits the
    /// result to the high-score table, and reports the summary. Valid once
    /// per session.
    pub fn finish(&mut self, scores: &mut HighScoreTable, now: Instant) -> Result<GameSummary> {
        if self.phase.is_finished() {
            return Err(GameError::AlreadyFinished);
        }
        if self.matched_pairs != self.total_pairs {
            return Err(GameError::BoardNotCleared);
        }

        let total = self.elapsed(now);
        self.elapsed_before_pause = total;
        self.resumed_at = None;
        self.phase = Phase::Finished;

        let entry = ScoreEntry {
            moves: self.move_count,
            time_secs: total.as_secs().try_into().unwrap_or(u32::MAX),
        };
        let is_new_record = scores.submit(self.difficulty, entry);
        log::debug!("finished in {:?}, new record: {}", total, is_new_record);

        Ok(GameSummary {
            difficulty: self.difficulty,
            theme: self.theme,
            moves: entry.moves,
            time_secs: entry.time_secs,
            max_combo: self.max_combo,
            is_new_record,
        })
    }

    /// Deals a new board for the same difficulty and theme, discarding any
    /// in-progress state. Valid from any phase; "play again" is a restart
    /// from the finished phase.
    pub fn restart(&mut self, seed: u64, now: Instant) {
        *self = Self::new(self.difficulty, self.theme, seed, now);
    }

    /// Leaves the board and stops the clock. Difficulty and theme are
    /// retained so the menu can show them preselected.
    pub fn back_to_menu(&mut self) {
        self.flipped.clear();
        self.resumed_at = None;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    /// Easy session on an unshuffled 6-pair board: symbols 0..6 then 0..6
    /// again, so slots i and i+6 always hold a pair.
    fn unshuffled_easy() -> GameSession {
        let layout = BoardLayout::from_symbols((0..6).chain(0..6).collect()).unwrap();
        GameSession::with_layout(Difficulty::Easy, Theme::Classic, layout, t0())
    }

    fn flip_pair(session: &mut GameSession, a: CardIndex, b: CardIndex) -> MatchOutcome {
        assert_eq!(session.flip_card(a).unwrap(), FlipOutcome::Flipped);
        assert_eq!(session.flip_card(b).unwrap(), FlipOutcome::PairPending);
        session.resolve_pair().unwrap()
    }

    #[test]
    fn new_session_starts_active_with_a_face_down_board() {
        let session = GameSession::new(Difficulty::Medium, Theme::Animals, 3, t0());

        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.cards().len(), Difficulty::Medium.card_count());
        assert_eq!(session.total_pairs(), 8);
        assert_eq!(session.matched_pairs(), 0);
        assert_eq!(session.move_count(), 0);
        assert!(session.cards().iter().all(|card| card.state.is_hidden()));
    }

    #[test]
    fn matching_scenario_on_an_unshuffled_board() {
        let mut session = unshuffled_easy();

        // Slots 0 and 6 hold the same symbol.
        assert_eq!(flip_pair(&mut session, 0, 6), MatchOutcome::Matched);
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.matched_pairs(), 1);
        assert_eq!(session.combo(), 1);
        assert_eq!(session.card_at(0).unwrap().state, CardState::Matched);
        assert_eq!(session.card_at(6).unwrap().state, CardState::Matched);

        // Slots 1 and 2 differ: both revert, the combo breaks.
        assert_eq!(flip_pair(&mut session, 1, 2), MatchOutcome::Mismatched);
        assert_eq!(session.move_count(), 2);
        assert_eq!(session.matched_pairs(), 1);
        assert_eq!(session.combo(), 0);
        assert_eq!(session.max_combo(), 1);
        assert_eq!(session.card_at(1).unwrap().state, CardState::Hidden);
        assert_eq!(session.card_at(2).unwrap().state, CardState::Hidden);
    }

    #[test]
    fn flip_is_a_no_op_on_face_up_cards_and_full_selections() {
        let mut session = unshuffled_easy();

        assert_eq!(session.flip_card(0).unwrap(), FlipOutcome::Flipped);
        // Same card again: already face up.
        assert_eq!(session.flip_card(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(session.flip_card(1).unwrap(), FlipOutcome::PairPending);
        // Third card while the selection is full.
        assert_eq!(session.flip_card(2).unwrap(), FlipOutcome::NoChange);
        assert_eq!(session.move_count(), 1);

        session.resolve_pair().unwrap();
        flip_pair(&mut session, 0, 6);
        // Matched cards stay out of play.
        assert_eq!(session.flip_card(0).unwrap(), FlipOutcome::NoChange);
    }

    #[test]
    fn flip_is_a_no_op_outside_the_active_phase() {
        let mut session = unshuffled_easy();

        session.pause(t0()).unwrap();
        assert_eq!(session.flip_card(0).unwrap(), FlipOutcome::NoChange);

        session.resume(t0()).unwrap();
        session.back_to_menu();
        assert_eq!(session.flip_card(0).unwrap(), FlipOutcome::NoChange);
    }

    #[test]
    fn flip_rejects_out_of_range_indices() {
        let mut session = unshuffled_easy();
        assert_eq!(session.flip_card(12), Err(GameError::InvalidIndex));
    }

    #[test]
    fn resolve_without_a_full_selection_is_a_no_op() {
        let mut session = unshuffled_easy();

        assert_eq!(session.resolve_pair().unwrap(), MatchOutcome::NoChange);
        session.flip_card(0).unwrap();
        assert_eq!(session.resolve_pair().unwrap(), MatchOutcome::NoChange);
        // The lone flipped card is untouched by the no-op.
        assert_eq!(session.card_at(0).unwrap().state, CardState::Flipped);
    }

    #[test]
    fn resolve_still_lands_while_paused() {
        let mut session = unshuffled_easy();

        session.flip_card(0).unwrap();
        session.flip_card(6).unwrap();
        session.pause(t0()).unwrap();

        assert_eq!(session.resolve_pair().unwrap(), MatchOutcome::Matched);
        assert_eq!(session.matched_pairs(), 1);
    }

    #[test]
    fn clearing_the_board_reports_all_matched_and_finishes_once() {
        let mut session = unshuffled_easy();
        for i in 0..5 {
            assert_eq!(flip_pair(&mut session, i, i + 6), MatchOutcome::Matched);
        }
        assert_eq!(flip_pair(&mut session, 5, 11), MatchOutcome::AllMatched);
        assert_eq!(session.max_combo(), 6);

        let mut scores = HighScoreTable::default();
        let summary = session.finish(&mut scores, t0()).unwrap();

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(summary.moves, 6);
        assert_eq!(summary.max_combo, 6);
        assert!(summary.is_new_record);
        assert_eq!(
            scores.best(Difficulty::Easy),
            Some(ScoreEntry {
                moves: 6,
                time_secs: summary.time_secs
            })
        );

        assert_eq!(
            session.finish(&mut scores, t0()),
            Err(GameError::AlreadyFinished)
        );
    }

    #[test]
    fn finish_requires_a_cleared_board() {
        let mut session = unshuffled_easy();
        let mut scores = HighScoreTable::default();
        assert_eq!(
            session.finish(&mut scores, t0()),
            Err(GameError::BoardNotCleared)
        );
    }

    #[test]
    fn paused_time_is_excluded_from_elapsed() {
        let start = t0();
        let mut session = unshuffled_easy();
        // Rebase the session clock on a known instant.
        session.resume_for_test(start);

        let before_pause = start + Duration::from_secs(10);
        session.pause(before_pause).unwrap();
        assert_eq!(session.elapsed(before_pause), Duration::from_secs(10));

        // A long pause does not accrue.
        let resume_at = before_pause + Duration::from_secs(500);
        assert_eq!(session.elapsed(resume_at), Duration::from_secs(10));
        session.resume(resume_at).unwrap();

        let later = resume_at + Duration::from_secs(5);
        assert_eq!(session.elapsed(later), Duration::from_secs(15));
        assert_eq!(session.elapsed_secs(later), 15);
    }

    #[test]
    fn pause_and_resume_guard_their_phases() {
        let mut session = unshuffled_easy();

        assert_eq!(session.resume(t0()), Err(GameError::NotPaused));
        session.pause(t0()).unwrap();
        assert_eq!(session.pause(t0()), Err(GameError::NotActive));
        session.resume(t0()).unwrap();

        session.back_to_menu();
        assert_eq!(session.pause(t0()), Err(GameError::NotActive));
    }

    #[test]
    fn restart_from_finished_deals_a_fresh_active_board() {
        let mut session = unshuffled_easy();
        for i in 0..6 {
            flip_pair(&mut session, i, i + 6);
        }
        let mut scores = HighScoreTable::default();
        session.finish(&mut scores, t0()).unwrap();

        session.restart(99, t0());

        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.matched_pairs(), 0);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.combo(), 0);
        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(session.theme(), Theme::Classic);
        assert!(session.cards().iter().all(|card| card.state.is_hidden()));
    }

    #[test]
    fn back_to_menu_clears_the_selection_and_goes_idle() {
        let mut session = unshuffled_easy();
        session.flip_card(0).unwrap();

        session.back_to_menu();

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.flipped_count(), 0);
        assert_eq!(session.resolve_pair().unwrap(), MatchOutcome::NoChange);
    }

    impl GameSession {
        /// Re-anchors the running clock for deterministic timing tests.
        fn resume_for_test(&mut self, now: Instant) {
            self.resumed_at = Some(now);
        }
    }
}
