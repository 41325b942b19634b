//! Face-turn animator.
//!
//! Turning a face:
//! - select the 9 blocks on the face through the coordinate index
//! - build (or reuse) one position curve and one orientation curve per block,
//!   rotating about the face normal through the face center
//! - play them as one group
//! - when the group finishes, snap every block to its grid cell and
//!   orientation class and update the index
//!
//! Blocks of an in-flight turn are marked busy; a request touching a busy
//! block is rejected instead of interleaving two rotations on one block.

use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::cache::{CurveCache, CurveKey};
use crate::config::AnimatorConfig;
use crate::cube::{BlockMove, Cube};
use crate::curve::build_turn_curves;
use crate::error::{TurnError, TurnResult};
use crate::grid::{self, BlockId};
use crate::moves::{Face, Move};
use crate::player::{AnimationPlayer, FramePlayer, Track, TurnGroup, TurnId};

/// Completion record of one turn, reported once by [`FaceTurnAnimator::advance`].
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedTurn {
    pub id: TurnId,
    pub mv: Move,
    pub moved: Vec<BlockMove>,
    /// Problems found while committing; the blocks stay where they were.
    pub faults: Vec<TurnError>,
}

impl CompletedTurn {
    /// The turn as a result: `Err` with the first fault if the commit failed.
    pub fn into_result(self) -> TurnResult<Self> {
        match self.faults.first() {
            Some(fault) => Err(fault.clone()),
            None => Ok(self),
        }
    }
}

pub struct FaceTurnAnimator<P: AnimationPlayer = FramePlayer> {
    config: AnimatorConfig,
    cube: Cube,
    player: P,
    cache: CurveCache,
    /// Blocks that belong to a turn still playing.
    busy: FxHashSet<BlockId>,
    next_id: u64,
    /// Turns that finished without animating, delivered on the next advance.
    resolved: Vec<CompletedTurn>,
}

impl FaceTurnAnimator<FramePlayer> {
    pub fn new(config: AnimatorConfig) -> TurnResult<Self> {
        Self::with_player(config, FramePlayer::new())
    }
}

impl Default for FaceTurnAnimator<FramePlayer> {
    fn default() -> Self {
        Self::build(AnimatorConfig::default(), FramePlayer::new())
    }
}

impl<P: AnimationPlayer> FaceTurnAnimator<P> {
    /// Creates an animator over a solved cube built with `config.spacing`.
    pub fn with_player(config: AnimatorConfig, player: P) -> TurnResult<Self> {
        config.validate()?;
        Ok(Self::build(config, player))
    }

    fn build(config: AnimatorConfig, player: P) -> Self {
        Self {
            config,
            cube: Cube::new(config.spacing),
            player,
            cache: CurveCache::new(),
            busy: FxHashSet::default(),
            next_id: 0,
            resolved: Vec::new(),
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn cache(&self) -> &CurveCache {
        &self.cache
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// True when no turn is playing or waiting to be reported.
    pub fn is_idle(&self) -> bool {
        self.busy.is_empty() && self.resolved.is_empty() && self.player.in_flight() == 0
    }

    pub fn is_busy(&self, id: BlockId) -> bool {
        self.busy.contains(&id)
    }

    /// World-space center of a face layer.
    pub fn pivot(&self, face: Face) -> Vec3 {
        self.cube.grid_position(grid::layer_center(face))
    }

    /// Starts a turn and returns its id; completion is reported by [`Self::advance`].
    pub fn perform_move(&mut self, mv: Move) -> TurnResult<TurnId> {
        let selected = self.cube.index().select(mv.face);

        let overlapping: Vec<String> = selected
            .iter()
            .filter(|&&id| self.busy.contains(&id))
            .map(|&id| self.cube.block(id).name())
            .collect();
        if !overlapping.is_empty() {
            log::warn!("rejecting {mv}: {} blocks still turning", overlapping.len());
            return Err(TurnError::Overlap {
                mv,
                blocks: overlapping,
            });
        }

        let id = TurnId(self.next_id);
        self.next_id += 1;

        if selected.is_empty() {
            self.resolved.push(CompletedTurn {
                id,
                mv,
                moved: Vec::new(),
                faults: Vec::new(),
            });
            return Ok(id);
        }

        let tracks = self.tracks(mv, &selected);
        self.busy.extend(selected.iter().copied());
        log::debug!("playing {mv} as turn {}", id.0);
        self.player.play(TurnGroup { id, mv, tracks });
        Ok(id)
    }

    /// Advances playback by `frames` and commits every turn that finished.
    pub fn advance(&mut self, frames: f32) -> Vec<CompletedTurn> {
        let finished = self.player.advance(frames, &mut self.cube);

        let mut completed = std::mem::take(&mut self.resolved);
        for group in finished {
            completed.push(self.commit(group));
        }
        completed
    }

    /// Performs one turn and plays it to the end.
    ///
    /// Turns that were already in flight and finish along the way are kept
    /// and reported by the next [`Self::advance`]. A turn whose commit was
    /// refused is returned as its first fault.
    pub fn run_move(&mut self, mv: Move) -> TurnResult<CompletedTurn> {
        let id = self.perform_move(mv)?;
        let step = self.config.frame_step as f32;
        let max_steps = self.config.turn_frames.div_ceil(self.config.frame_step) + 1;

        let mut others = Vec::new();
        let mut result = None;
        for _ in 0..=max_steps {
            for turn in self.advance(step) {
                if turn.id == id {
                    result = Some(turn);
                } else {
                    others.push(turn);
                }
            }
            if result.is_some() {
                break;
            }
        }

        self.resolved.extend(others);
        result.ok_or(TurnError::Stalled(mv))?.into_result()
    }

    /// Curves the next `mv` would play, without starting it.
    ///
    /// Curves only depend on the rest state of each block, so a preview taken
    /// while the blocks are mid-turn matches what the move will play later.
    pub fn preview(&mut self, mv: Move) -> Vec<Track> {
        let selected = self.cube.index().select(mv.face);
        self.tracks(mv, &selected)
    }

    fn tracks(&mut self, mv: Move, selected: &[BlockId]) -> Vec<Track> {
        let pivot = self.pivot(mv.face);
        let axis = mv.face.normal();
        let sign = mv.direction.sign();
        let profile = self.config.profile();

        let cube = &self.cube;
        let cache = &mut self.cache;
        let mut tracks = Vec::with_capacity(selected.len());
        for &id in selected {
            let block = cube.block(id);
            let key = CurveKey {
                coord: block.coord,
                orientation: block.orientation,
                mv,
            };
            let start = cube.grid_position(block.coord);
            let baseline = block.orientation.to_quat();
            let curves = cache.get_or_build(key, || {
                build_turn_curves(start, baseline, pivot, axis, sign, profile)
            });
            tracks.push(Track { block: id, curves });
        }
        tracks
    }

    fn commit(&mut self, group: TurnGroup) -> CompletedTurn {
        let landings: Vec<_> = group
            .tracks
            .iter()
            .map(|track| {
                let (position, rotation) = track.curves.final_transform();
                (track.block, position, rotation)
            })
            .collect();

        let mut faults = Vec::new();
        let moved = match self.cube.settle(&landings) {
            Ok(moved) => moved,
            Err(err) => {
                log::error!("refusing to commit {}: {err}", group.mv);
                for track in &group.tracks {
                    self.cube.rest(track.block);
                }
                faults.push(err);
                Vec::new()
            }
        };
        for track in &group.tracks {
            self.busy.remove(&track.block);
        }

        let violations = self.cube.check_invariants();
        for violation in &violations {
            log::warn!("after {}: {violation}", group.mv);
        }
        debug_assert!(violations.is_empty(), "after {}: {violations:?}", group.mv);
        faults.extend(violations.into_iter().map(TurnError::Invariant));

        log::debug!("committed {} ({} blocks)", group.mv, moved.len());
        CompletedTurn {
            id: group.id,
            mv: group.mv,
            moved,
            faults,
        }
    }
}
