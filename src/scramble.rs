//! Move sequences and their strictly sequential playback.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::animator::{CompletedTurn, FaceTurnAnimator};
use crate::error::{TurnError, TurnResult};
use crate::moves::{self, Direction, Move, FACES};
use crate::player::{AnimationPlayer, TurnId};

/// An ordered list of moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scramble {
    moves: Vec<Move>,
}

impl Scramble {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    /// `len` moves, each with a uniformly random face and direction.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let moves = (0..len)
            .map(|_| {
                let face = FACES[rng.gen_range(0..FACES.len())];
                let direction = if rng.gen() {
                    Direction::Clockwise
                } else {
                    Direction::CounterClockwise
                };
                Move::new(face, direction)
            })
            .collect();
        Self { moves }
    }

    pub fn parse(notation: &str) -> TurnResult<Self> {
        moves::parse_sequence(notation).map(Self::new)
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The sequence that undoes this one.
    pub fn inverse(&self) -> Self {
        Self {
            moves: self.moves.iter().rev().map(|mv| mv.inverse()).collect(),
        }
    }
}

impl fmt::Display for Scramble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&moves::format_sequence(&self.moves))
    }
}

impl FromStr for Scramble {
    type Err = TurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How far a [`ScrambleRunner`] has got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }
}

/// Plays moves one at a time: the next move starts only after the previous
/// one has been committed, so no two turns ever overlap.
#[derive(Debug, Default)]
pub struct ScrambleRunner {
    pending: VecDeque<Move>,
    current: Option<(TurnId, Move)>,
    completed: usize,
    total: usize,
    /// Completions of turns started on the animator by someone else.
    other_turns: Vec<CompletedTurn>,
}

impl ScrambleRunner {
    pub fn new(scramble: &Scramble) -> Self {
        Self {
            pending: scramble.moves().iter().copied().collect(),
            current: None,
            completed: 0,
            total: scramble.len(),
            other_turns: Vec::new(),
        }
    }

    /// Appends a move to the end of the queue.
    pub fn push(&mut self, mv: Move) {
        self.pending.push_back(mv);
        self.total += 1;
    }

    /// The move currently playing, if any.
    pub fn current_move(&self) -> Option<Move> {
        self.current.map(|(_, mv)| mv)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.completed,
            total: self.total,
        }
    }

    /// Takes the completions of turns this runner did not start.
    ///
    /// [`Self::tick`] drives the animator's clock, so turns performed on the
    /// animator directly finish inside it and are kept here.
    pub fn take_other_turns(&mut self) -> Vec<CompletedTurn> {
        std::mem::take(&mut self.other_turns)
    }

    /// Advances the animator by `frames`, starting the next move as soon as
    /// the current one completes.
    ///
    /// A move whose commit was refused is dropped from the queue and reported
    /// as an error.
    pub fn tick<P: AnimationPlayer>(
        &mut self,
        animator: &mut FaceTurnAnimator<P>,
        frames: f32,
    ) -> TurnResult<Progress> {
        self.start_next(animator)?;

        let mut fault = None;
        for turn in animator.advance(frames) {
            if !self.current.is_some_and(|(id, _)| id == turn.id) {
                self.other_turns.push(turn);
                continue;
            }
            self.current = None;
            match turn.into_result() {
                Ok(_) => self.completed += 1,
                Err(err) => {
                    self.total -= 1;
                    fault = Some(err);
                }
            }
        }
        if let Some(err) = fault {
            return Err(err);
        }

        self.start_next(animator)?;
        Ok(self.progress())
    }

    /// Runs the remaining moves to completion, one keyframe step per tick.
    pub fn run<P: AnimationPlayer>(
        &mut self,
        animator: &mut FaceTurnAnimator<P>,
    ) -> TurnResult<Progress> {
        let step = animator.config().frame_step as f32;
        let mut progress = self.progress();
        while !progress.is_done() {
            progress = self.tick(animator, step)?;
        }
        Ok(progress)
    }

    fn start_next<P: AnimationPlayer>(
        &mut self,
        animator: &mut FaceTurnAnimator<P>,
    ) -> TurnResult<()> {
        if self.current.is_some() {
            return Ok(());
        }
        let Some(mv) = self.pending.pop_front() else {
            return Ok(());
        };
        match animator.perform_move(mv) {
            Ok(id) => {
                self.current = Some((id, mv));
                Ok(())
            }
            Err(err) => {
                self.pending.push_front(mv);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::moves::Face;

    #[test]
    fn test_random_scramble_is_reproducible() {
        let first = Scramble::random(50, &mut StdRng::seed_from_u64(7));
        let second = Scramble::random(50, &mut StdRng::seed_from_u64(7));
        assert_eq!(first.len(), 50);
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_scramble_uses_every_face_and_direction() {
        let scramble = Scramble::random(500, &mut StdRng::seed_from_u64(1));
        for mv in Move::all() {
            assert!(scramble.moves().contains(&mv), "{mv} never drawn");
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let scramble: Scramble = "L'R'UDFBL'R'".parse().unwrap();
        assert_eq!(scramble.to_string(), "L'R'UDFBL'R'");
        assert_eq!(scramble.inverse().to_string(), "RLB'F'D'U'RL");
    }

    #[test]
    fn test_runner_serializes_moves() {
        let mut animator = FaceTurnAnimator::default();
        let scramble = Scramble::parse("LUFRDB").unwrap();
        let mut runner = ScrambleRunner::new(&scramble);

        let mut ticks = 0;
        loop {
            let progress = runner.tick(&mut animator, 4.0).unwrap();
            ticks += 1;
            assert!(animator.player().in_flight() <= 1);
            if progress.is_done() {
                break;
            }
        }
        // 16 frames per turn at 4 frames per tick
        assert_eq!(ticks, 6 * 4);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_scramble_then_inverse_solves() {
        let mut animator = FaceTurnAnimator::default();
        let scramble = Scramble::random(40, &mut StdRng::seed_from_u64(99));

        ScrambleRunner::new(&scramble).run(&mut animator).unwrap();
        let progress = ScrambleRunner::new(&scramble.inverse())
            .run(&mut animator)
            .unwrap();

        assert_eq!(progress.completed, 40);
        assert!(animator.cube().is_solved());
        assert!(animator.cube().check_invariants().is_empty());
    }

    #[test]
    fn test_empty_runner_is_done() {
        let mut animator = FaceTurnAnimator::default();
        let progress = ScrambleRunner::default().run(&mut animator).unwrap();
        assert_eq!(progress, Progress { completed: 0, total: 0 });
    }

    #[test]
    fn test_runner_keeps_turns_it_did_not_start() {
        let mut animator = FaceTurnAnimator::default();
        let left = animator.perform_move(Move::clockwise(Face::Left)).unwrap();
        let mut runner = ScrambleRunner::new(&Scramble::parse("R").unwrap());

        let progress = runner.run(&mut animator).unwrap();
        assert_eq!(progress.completed, 1);
        let others = runner.take_other_turns();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].id, left);
        assert!(runner.take_other_turns().is_empty());
        assert!(animator.is_idle());
    }
}
