//! Match engine
//!
//! Owns the roster for one match. Each round it derives the round
//! parameters from the players still in, draws a prompt, runs the round and
//! prunes eliminated players. The match ends once at most one player is
//! left.

use tracing::{info, warn};

use super::round::{RoundEngine, RoundSummary};
use crate::config::MatchConfig;
use crate::game::{PlayerId, RoundParams, Roster};
use crate::traits::{CuePlayer, MatchObserver, Prompt, PromptSource, Renderer};

/// Match progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Two or more players remain
    Running,
    /// At most one player remains
    Done,
}

impl MatchPhase {
    /// Phase for a given number of active players
    pub fn for_active(active: usize) -> Self {
        if active > 1 {
            MatchPhase::Running
        } else {
            MatchPhase::Done
        }
    }
}

/// Result of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Surviving player, if one survived
    pub winner: Option<PlayerId>,
    /// Lives the winner has left (0 without a winner)
    pub remaining_lives: u8,
    /// Rounds played
    pub rounds: u16,
}

impl MatchOutcome {
    /// 0-based seat index of the winner
    pub fn winner_index(&self) -> Option<usize> {
        self.winner.map(PlayerId::index)
    }
}

/// Drives rounds until one player is left
pub struct MatchEngine<'s, R, C, O, P> {
    config: MatchConfig,
    rounds: RoundEngine<'s, R, C, O>,
    prompts: P,
    roster: Roster,
    phase: MatchPhase,
    round: u16,
}

impl<'s, R, C, O, P> MatchEngine<'s, R, C, O, P>
where
    R: Renderer,
    C: CuePlayer,
    O: MatchObserver,
    P: PromptSource,
{
    /// Seat the players and prepare the first round
    pub fn new(config: MatchConfig, rounds: RoundEngine<'s, R, C, O>, prompts: P) -> Self {
        let roster = Roster::new(config.players(), config.lives());
        let phase = MatchPhase::for_active(roster.active_count());

        Self {
            config,
            rounds,
            prompts,
            roster,
            phase,
            round: 0,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn round_engine(&self) -> &RoundEngine<'s, R, C, O> {
        &self.rounds
    }

    /// Parameters for the next round
    pub fn next_round_params(&self) -> RoundParams {
        RoundParams::compute(
            self.config.players(),
            self.roster.active_count() as u8,
            self.config.base_deadline(),
            self.config.loss_threshold(),
        )
    }

    /// Play rounds until the match is decided
    pub async fn run(&mut self) -> MatchOutcome {
        info!(
            "Match started: {} players, {} lives, {} ms base deadline",
            self.config.players(),
            self.config.lives(),
            self.config.base_deadline().as_millis()
        );

        while self.phase == MatchPhase::Running {
            self.play_round().await;
        }

        let outcome = self.outcome();
        match outcome.winner {
            Some(winner) => info!(
                "{} wins with {} lives after {} rounds",
                winner, outcome.remaining_lives, outcome.rounds
            ),
            None => info!("Match ended without a winner after {} rounds", outcome.rounds),
        }
        outcome
    }

    /// Play a single round and prune whoever ran out of lives
    pub async fn play_round(&mut self) -> RoundSummary {
        let params = self.next_round_params();
        self.round = self.round.saturating_add(1);

        let prompt = match self.prompts.draw(params.prompt_class) {
            Some(prompt) => prompt,
            None => {
                warn!("No {} prompt available", params.prompt_class);
                Prompt::new()
            }
        };

        info!(
            "Round {}: {} players, {} prompt {:?}, {} ms per turn",
            self.round,
            params.players_remaining,
            params.prompt_class,
            prompt.as_str(),
            params.deadline.as_millis()
        );
        self.rounds
            .observer_mut()
            .round_started(self.round, &params, &prompt);

        let summary = self
            .rounds
            .run_round(&mut self.roster, params.deadline, &prompt)
            .await;

        for player in self.roster.prune_eliminated() {
            info!("{} eliminated in round {}", player, self.round);
            self.rounds
                .observer_mut()
                .player_eliminated(player, self.round);
        }

        self.phase = MatchPhase::for_active(self.roster.active_count());
        summary
    }

    /// Outcome as of now
    pub fn outcome(&self) -> MatchOutcome {
        let survivor = self.roster.survivor();
        MatchOutcome {
            winner: survivor.map(|p| p.id),
            remaining_lives: survivor.map_or(0, |p| p.lives),
            rounds: self.round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PromptClass;
    use crate::signal::InterruptSignal;
    use crate::traits::{RenderError, TurnOutcome};
    use embassy_futures::block_on;
    use embassy_time::Duration;
    use proptest::prelude::*;
    use std::string::{String, ToString};
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingRenderer {
        prompts: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn render_prompt(&mut self, prompt: &str) -> Result<(), RenderError> {
            if prompt.is_empty() {
                return Err(RenderError::Unrenderable);
            }
            self.prompts.push(prompt.to_string());
            Ok(())
        }

        fn render_blank(&mut self) -> Result<(), RenderError> {
            Ok(())
        }

        fn render_lines(&mut self, _top: &str, _bottom: &str) -> Result<(), RenderError> {
            Ok(())
        }
    }

    /// "th" for easy rounds, "the" for hard rounds
    struct FixedPrompts;

    impl PromptSource for FixedPrompts {
        fn draw(&mut self, class: PromptClass) -> Option<Prompt> {
            let text = match class {
                PromptClass::Easy => "th",
                PromptClass::Hard => "the",
            };
            Prompt::try_from(text).ok()
        }
    }

    struct NoPrompts;

    impl PromptSource for NoPrompts {
        fn draw(&mut self, _class: PromptClass) -> Option<Prompt> {
            None
        }
    }

    /// Reacts for chosen players and records everything it sees
    struct Script<'a> {
        signal: &'a InterruptSignal,
        reacting: Vec<PlayerId>,
        rounds: Vec<RoundParams>,
        turns: Vec<(PlayerId, TurnOutcome, u8)>,
        eliminated: Vec<(PlayerId, u16)>,
    }

    impl<'a> Script<'a> {
        fn new(signal: &'a InterruptSignal, reacting: &[u8]) -> Self {
            Self {
                signal,
                reacting: reacting.iter().map(|&i| PlayerId(i)).collect(),
                rounds: Vec::new(),
                turns: Vec::new(),
                eliminated: Vec::new(),
            }
        }
    }

    impl MatchObserver for Script<'_> {
        fn round_started(&mut self, _round: u16, params: &RoundParams, _prompt: &str) {
            self.rounds.push(*params);
        }

        fn turn_started(&mut self, player: PlayerId, _deadline: Duration) {
            if self.reacting.contains(&player) {
                self.signal.signal();
            }
        }

        fn turn_finished(&mut self, player: PlayerId, outcome: TurnOutcome, lives: u8) {
            self.turns.push((player, outcome, lives));
        }

        fn player_eliminated(&mut self, player: PlayerId, round: u16) {
            self.eliminated.push((player, round));
        }
    }

    fn config(players: usize, base_ms: u64, lives: u8) -> MatchConfig {
        MatchConfig::new(players, Duration::from_millis(base_ms), lives).unwrap()
    }

    #[test]
    fn test_single_player_wins_without_rounds() {
        let signal = InterruptSignal::new();
        let rounds = RoundEngine::new(&signal, RecordingRenderer::default(), (), ());
        let mut engine = MatchEngine::new(config(1, 20, 3), rounds, FixedPrompts);

        assert_eq!(engine.phase(), MatchPhase::Done);
        let outcome = block_on(engine.run());

        assert_eq!(
            outcome,
            MatchOutcome {
                winner: Some(PlayerId(0)),
                remaining_lives: 3,
                rounds: 0,
            }
        );
        assert!(engine.round_engine().renderer().prompts.is_empty());
    }

    #[test]
    fn test_everyone_times_out_until_one_is_left() {
        // Four players, two lives, nobody ever reacts
        let signal = InterruptSignal::new();
        let rounds = RoundEngine::new(
            &signal,
            RecordingRenderer::default(),
            (),
            Script::new(&signal, &[]),
        );
        let mut engine = MatchEngine::new(config(4, 20, 2), rounds, FixedPrompts);

        let outcome = block_on(engine.run());

        // Everyone hits zero in round 2 and is pruned together
        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.remaining_lives, 0);
        assert!(engine.roster().is_empty());

        let script = engine.round_engine().observer();
        assert_eq!(script.rounds.len(), 2);
        for params in &script.rounds {
            assert_eq!(params.players_remaining, 4);
            assert_eq!(params.prompt_class, PromptClass::Easy);
            assert_eq!(params.deadline, Duration::from_millis(20));
        }
        assert_eq!(script.turns.len(), 8);
        assert_eq!(script.eliminated.len(), 4);
        assert!(script.eliminated.iter().all(|&(_, round)| round == 2));
        assert_eq!(engine.round_engine().renderer().prompts, ["th", "th"]);
    }

    #[test]
    fn test_last_player_standing_wins() {
        // Five players on one life; only player 3 reacts
        let signal = InterruptSignal::new();
        let rounds = RoundEngine::new(
            &signal,
            RecordingRenderer::default(),
            (),
            Script::new(&signal, &[2]),
        );
        let mut engine = MatchEngine::new(config(5, 20, 1), rounds, FixedPrompts);

        let outcome = block_on(engine.run());

        assert_eq!(outcome.winner, Some(PlayerId(2)));
        assert_eq!(outcome.winner_index(), Some(2));
        assert_eq!(outcome.remaining_lives, 1);
        assert_eq!(outcome.rounds, 1);

        let eliminated: Vec<u8> = engine
            .round_engine()
            .observer()
            .eliminated
            .iter()
            .map(|(id, _)| id.0)
            .collect();
        assert_eq!(eliminated, [0, 1, 3, 4]);
    }

    #[test]
    fn test_rounds_tighten_as_players_drop() {
        // Players 1 and 2 keep reacting; 3, 4 and 5 drop out in round 1
        let signal = InterruptSignal::new();
        let rounds = RoundEngine::new(
            &signal,
            RecordingRenderer::default(),
            (),
            Script::new(&signal, &[0, 1]),
        );
        let mut engine = MatchEngine::new(config(5, 50, 1), rounds, FixedPrompts);

        let first = block_on(engine.play_round());
        assert_eq!(first, RoundSummary { reacted: 2, timed_out: 3 });
        assert_eq!(engine.roster().len(), 2);
        assert_eq!(engine.phase(), MatchPhase::Running);

        // Two of five left: 0.6 loss ratio, so the next round is hard
        let next = engine.next_round_params();
        assert_eq!(next.players_remaining, 2);
        assert_eq!(next.prompt_class, PromptClass::Hard);
        assert_eq!(next.deadline, Duration::from_millis(20));

        block_on(engine.play_round());
        let script = engine.round_engine().observer();
        assert_eq!(script.rounds[1], next);
        assert_eq!(engine.round_engine().renderer().prompts, ["th", "the"]);
    }

    #[test]
    fn test_missing_prompt_blanks_the_round() {
        let signal = InterruptSignal::new();
        let rounds = RoundEngine::new(
            &signal,
            RecordingRenderer::default(),
            (),
            Script::new(&signal, &[1]),
        );
        let mut engine = MatchEngine::new(config(2, 10, 1), rounds, NoPrompts);

        let outcome = block_on(engine.run());

        assert_eq!(outcome.winner, Some(PlayerId(1)));
        assert!(engine.round_engine().renderer().prompts.is_empty());
    }

    /// Times out the first turn of every round and otherwise follows a
    /// fixed pattern, so every round costs at least one life
    struct Pattern<'a> {
        signal: &'a InterruptSignal,
        mask: u32,
        turn: u32,
        first_in_round: bool,
        start: u8,
        lives: [Option<u8>; 16],
        violations: u32,
    }

    impl MatchObserver for Pattern<'_> {
        fn round_started(&mut self, _round: u16, _params: &RoundParams, _prompt: &str) {
            self.first_in_round = true;
        }

        fn turn_started(&mut self, _player: PlayerId, _deadline: Duration) {
            let react = !self.first_in_round && self.mask & (1 << (self.turn % 32)) != 0;
            self.first_in_round = false;
            self.turn += 1;
            if react {
                self.signal.signal();
            }
        }

        fn turn_finished(&mut self, player: PlayerId, outcome: TurnOutcome, lives: u8) {
            let previous = self.lives[player.index()].unwrap_or(self.start);
            let expected = match outcome {
                TurnOutcome::Reacted => previous,
                TurnOutcome::TimedOut => previous.saturating_sub(1),
            };
            if lives != expected {
                self.violations += 1;
            }
            self.lives[player.index()] = Some(lives);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn test_match_terminates_with_monotonic_lives(
            players in 1usize..=5,
            lives in 1u8..=3,
            mask in any::<u32>(),
        ) {
            let signal = InterruptSignal::new();
            let observer = Pattern {
                signal: &signal,
                mask,
                turn: 0,
                first_in_round: false,
                start: lives,
                lives: [None; 16],
                violations: 0,
            };
            let rounds = RoundEngine::new(&signal, RecordingRenderer::default(), (), observer);
            let mut engine = MatchEngine::new(config(players, 4, lives), rounds, FixedPrompts);

            let outcome = block_on(engine.run());

            prop_assert!(outcome.rounds as usize <= players * lives as usize);
            prop_assert!(engine.roster().len() <= 1);
            prop_assert_eq!(engine.round_engine().observer().violations, 0);
            if let Some(winner) = outcome.winner {
                prop_assert!(outcome.remaining_lives >= 1);
                prop_assert!(outcome.remaining_lives <= lives);
                prop_assert!(winner.index() < players);
            }
        }
    }
}
