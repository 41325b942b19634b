//! Playback of turn animations.
//!
//! The animator does not own a clock. It hands each turn to an
//! [`AnimationPlayer`] as a [`TurnGroup`] and learns about completion from the
//! groups `advance` returns. [`FramePlayer`] is the built-in frame clock;
//! a renderer or a test harness can supply its own.

use std::rc::Rc;

use glam::{Quat, Vec3};

use crate::curve::TurnCurves;
use crate::grid::BlockId;
use crate::moves::Move;

/// The node side of playback: where animated transforms are written.
pub trait NodeStore {
    /// Looks up a node by its current 3-digit name.
    fn find_by_name(&self, name: &str) -> Option<BlockId>;

    /// Writes the live transform of a node.
    fn set_transform(&mut self, id: BlockId, position: Vec3, rotation: Quat);
}

/// Identity of one requested turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

/// One block's curves within a turn.
#[derive(Clone, Debug)]
pub struct Track {
    pub block: BlockId,
    pub curves: Rc<TurnCurves>,
}

/// All tracks of one in-flight turn, played in lockstep.
#[derive(Clone, Debug)]
pub struct TurnGroup {
    pub id: TurnId,
    pub mv: Move,
    pub tracks: Vec<Track>,
}

impl TurnGroup {
    pub fn last_frame(&self) -> u32 {
        self.tracks
            .iter()
            .map(|track| track.curves.last_frame())
            .max()
            .unwrap_or(0)
    }

    /// Writes every track's transform at `frame` into `nodes`.
    pub fn apply(&self, frame: f32, nodes: &mut dyn NodeStore) {
        for track in &self.tracks {
            let (position, rotation) = track.curves.sample(frame);
            nodes.set_transform(track.block, position, rotation);
        }
    }
}

/// Plays turn groups and reports each one exactly once when it finishes.
pub trait AnimationPlayer {
    /// Starts a group at frame 0.
    fn play(&mut self, group: TurnGroup);

    /// Moves the clock forward, writes sampled transforms into `nodes`, and
    /// returns the groups that reached their final frame.
    fn advance(&mut self, frames: f32, nodes: &mut dyn NodeStore) -> Vec<TurnGroup>;

    /// Number of groups currently playing.
    fn in_flight(&self) -> usize;
}

struct Playing {
    group: TurnGroup,
    frame: f32,
}

/// Default player: a plain frame counter per group.
#[derive(Default)]
pub struct FramePlayer {
    playing: Vec<Playing>,
}

impl FramePlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimationPlayer for FramePlayer {
    fn play(&mut self, group: TurnGroup) {
        self.playing.push(Playing { group, frame: 0.0 });
    }

    fn advance(&mut self, frames: f32, nodes: &mut dyn NodeStore) -> Vec<TurnGroup> {
        let mut finished = Vec::new();
        let mut still_playing = Vec::with_capacity(self.playing.len());

        for mut playing in self.playing.drain(..) {
            let last_frame = playing.group.last_frame() as f32;
            playing.frame = (playing.frame + frames.max(0.0)).min(last_frame);
            playing.group.apply(playing.frame, nodes);

            if playing.frame >= last_frame {
                finished.push(playing.group);
            } else {
                still_playing.push(playing);
            }
        }

        self.playing = still_playing;
        finished
    }

    fn in_flight(&self) -> usize {
        self.playing.len()
    }
}
