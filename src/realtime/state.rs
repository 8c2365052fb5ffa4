use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::AxisBaselines;
use crate::models::{Axis, Coordinate, RealtimeUpdate};

/// Lifecycle of a streaming session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Consuming partial transcripts
    Accumulating,
    /// End of utterance seen; further chunks are ignored
    Finalized,
}

/// Per-session state for the realtime engine
///
/// Owned by exactly one session and threaded through
/// `RealtimeEngine::append_chunk` by value. Axis floats keep full
/// precision and change only through smoothing; they are clamped when
/// read into an update.
#[derive(Debug, Clone)]
pub struct RealtimeState {
    pub(super) session_id: Uuid,
    pub(super) phase: SessionPhase,
    /// Accumulated normalized tokens
    pub(super) tokens: Vec<String>,
    pub(super) mood: f64,
    pub(super) energy: f64,
    pub(super) anxiety: f64,
    /// Last normalized partial that contributed content
    pub(super) last_partial: String,
    pub(super) last_coordinate: Coordinate,
    pub(super) gate_expires_at: Option<DateTime<Utc>>,
    pub(super) last_update: Option<RealtimeUpdate>,
    pub(super) chunks_seen: usize,
    /// `(pattern_index, first_token)` of every match already scored; a
    /// retracted fragment's match stays here so its completion is skipped
    pub(super) consumed: HashSet<(usize, usize)>,
}

impl RealtimeState {
    pub(super) fn new(baselines: &AxisBaselines, coordinate: Coordinate) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            phase: SessionPhase::Accumulating,
            tokens: Vec::new(),
            mood: baselines.mood,
            energy: baselines.energy,
            anxiety: baselines.anxiety,
            last_partial: String::new(),
            last_coordinate: coordinate,
            gate_expires_at: None,
            last_update: None,
            chunks_seen: 0,
            consumed: HashSet::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finalized(&self) -> bool {
        self.phase == SessionPhase::Finalized
    }

    /// Accumulated normalized text
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Unclamped axis value
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Mood => self.mood,
            Axis::Energy => self.energy,
            Axis::Anxiety => self.anxiety,
        }
    }

    pub fn last_coordinate(&self) -> Coordinate {
        self.last_coordinate
    }

    /// Whether the gate holds the coordinate at `now`
    pub fn gate_active(&self, now: DateTime<Utc>) -> bool {
        self.gate_expires_at.is_some_and(|expires| now < expires)
    }

    /// Exponential moving average step toward `target`
    pub(super) fn smooth(&mut self, axis: Axis, target: f64, alpha: f64) {
        let slot = match axis {
            Axis::Mood => &mut self.mood,
            Axis::Energy => &mut self.energy,
            Axis::Anxiety => &mut self.anxiety,
        };
        *slot += alpha * (target - *slot);
    }

    /// Drop `count` tokens from the end, then append `tokens`
    pub(super) fn splice_tail(&mut self, count: usize, tokens: Vec<String>) {
        let keep = self.tokens.len().saturating_sub(count);
        self.tokens.truncate(keep);
        self.tokens.extend(tokens);
    }
}
