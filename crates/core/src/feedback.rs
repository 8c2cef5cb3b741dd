//! Deterministic scheduled presentation events.
//!
//! Gameplay code schedules events at a simulation time; the present step
//! drains everything due. Nothing here feeds back into gameplay.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::types::{AbilityId, Cell, EnemyKind, Rgba, Vec2};

/// Spacing between the rings of a cascading explosion.
pub const CASCADE_STEP: f32 = 0.08;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Cast(AbilityId),
    Hit,
    Crit,
    Kill,
    PlayerHurt,
    WardBlock,
    Pickup,
    Chest,
    LevelUp,
    SecretDoor,
    BossRoar,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeedbackEvent {
    ScreenFlash { color: Rgba, intensity: f32 },
    HitSpark { pos: Vec2, crit: bool },
    Explosion { pos: Vec2, radius: f32 },
    LevelUp { level: u32 },
    BossIntro { kind: EnemyKind },
    SecretRevealed { cell: Cell },
    Sound(SoundCue),
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    at: f32,
    seq: u64,
    event: FeedbackEvent,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.total_cmp(&other.at).then(self.seq.cmp(&other.seq))
    }
}

/// Min-ordered by trigger time, then by scheduling order.
#[derive(Clone, Debug, Default)]
pub struct FeedbackQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl FeedbackQueue {
    pub fn schedule(&mut self, at: f32, event: FeedbackEvent) {
        let at = if at.is_finite() { at } else { 0.0 };
        self.heap.push(Reverse(Scheduled { at, seq: self.next_seq, event }));
        self.next_seq += 1;
    }

    /// Schedules `count` copies of `event` at `now`, `now + step`, ...
    pub fn schedule_cascade(&mut self, now: f32, count: usize, event: FeedbackEvent) {
        for k in 0..count {
            self.schedule(now + k as f32 * CASCADE_STEP, event);
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Removes and returns every event with trigger time `<= now`, in order.
    pub fn drain_due(&mut self, now: f32) -> Vec<FeedbackEvent> {
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.heap.peek()
            && next.at <= now
        {
            due.push(next.event);
            self.heap.pop();
        }
        due
    }
}

/// Presentation events released by one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameFeedback {
    pub events: Vec<FeedbackEvent>,
}

impl FrameFeedback {
    pub fn sounds(&self) -> impl Iterator<Item = SoundCue> + '_ {
        self.events.iter().filter_map(|event| match event {
            FeedbackEvent::Sound(cue) => Some(*cue),
            _ => None,
        })
    }
}
