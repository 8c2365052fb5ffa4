use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::AnalysisError;
use crate::heuristics::collect_text_signals;
use crate::lexicon::CompiledLexicon;
use crate::models::{Axis, Coordinate, RealtimeUpdate};
use crate::realtime::{evaluate_gate, next_expiry, reconcile, RealtimeState, SessionPhase};
use crate::stages::stage0_normalize::normalize;
use crate::stages::{find_matches_from, score_axes, AxisScores, ExplicitBoost, NormalizedText};

/// Evidence extracted from the newly added token region
#[derive(Debug)]
struct RegionScore {
    targets: AxisScores,
    signal: f64,
    /// Axes with a declaration that ends inside the new region
    fired: Vec<Axis>,
    /// `(pattern_index, first_token)` of the matches scored this chunk
    scored: Vec<(usize, usize)>,
    /// Matches skipped because an earlier chunk already scored them
    refound: usize,
}

/// Incremental scorer for streaming partial transcripts
///
/// Stateless itself; all session data lives in `RealtimeState`, which the
/// caller threads through each call.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    lexicon: Arc<CompiledLexicon>,
    config: Arc<EngineConfig>,
}

impl RealtimeEngine {
    pub fn new(lexicon: Arc<CompiledLexicon>, config: Arc<EngineConfig>) -> Self {
        Self { lexicon, config }
    }

    /// Open a session at the axis baselines
    pub fn begin(&self) -> RealtimeState {
        let baselines = &self.config.scoring.baselines;
        let coordinate = self.coordinate(baselines.mood, baselines.energy);
        let state = RealtimeState::new(baselines, coordinate);
        debug!(session = %state.session_id(), "Realtime session started");
        state
    }

    pub fn append_chunk(&self, state: RealtimeState, raw: &str, now: DateTime<Utc>) -> (RealtimeState, RealtimeUpdate) {
        self.process_chunk(state, raw, false, now)
    }

    /// Consume the final partial and close the session
    pub fn finalize(&self, state: RealtimeState, raw: &str, now: DateTime<Utc>) -> (RealtimeState, RealtimeUpdate) {
        self.process_chunk(state, raw, true, now)
    }

    /// Run one partial transcript through the session
    ///
    /// 1. Reconcile against the previous partial to find the new tokens
    /// 2. With nothing new, report the previous values with zero signal
    /// 3. Otherwise match the new region with recency weights
    /// 4. Score axis targets, letting recent explicit declarations override
    /// 5. Smooth each axis toward its target
    /// 6. Update the stability gate and the display coordinate
    pub fn process_chunk(
        &self,
        mut state: RealtimeState,
        raw: &str,
        is_final: bool,
        now: DateTime<Utc>,
    ) -> (RealtimeState, RealtimeUpdate) {
        if state.is_finalized() {
            warn!(session = %state.session_id, "Chunk received after finalization, ignoring");
            let update = state
                .last_update
                .clone()
                .unwrap_or_else(|| self.snapshot(&state, 0.0, false, now));
            return (state, update);
        }

        let rt = &self.config.realtime;
        let current = normalize(raw);
        let delta = reconcile(&state.tokens, &state.last_partial, &current, rt);

        if delta.is_empty() {
            debug!(session = %state.session_id, kind = ?delta.kind, "No new content in chunk");
            if is_final {
                state.phase = SessionPhase::Finalized;
            }
            let update = self.snapshot(&state, 0.0, false, now);
            if is_final {
                state.last_update = Some(update.clone());
            }
            return (state, update);
        }

        state.chunks_seen += 1;
        let region_start = state.tokens.len() - delta.retract;
        let delta_tokens = delta.tokens.clone();
        state.splice_tail(delta.retract, delta.tokens);
        state.last_partial = current;

        let (signal, fired) = match self.score_region(&state, region_start) {
            Ok(region) if region.scored.is_empty() && region.refound > 0 && region.fired.is_empty() => {
                debug!(
                    session = %state.session_id,
                    chunk = state.chunks_seen,
                    "Chunk only completes {} already scored matches",
                    region.refound
                );
                (0.0, Vec::new())
            }
            Ok(region) => {
                let alpha = (rt.smoothing_floor + rt.smoothing_gain * region.signal)
                    .clamp(rt.smoothing_floor, rt.max_alpha);
                for axis in Axis::ALL {
                    let axis_alpha = if region.fired.contains(&axis) {
                        rt.explicit_alpha
                    } else {
                        alpha
                    };
                    state.smooth(axis, region.targets.get(axis), axis_alpha);
                }
                debug!(
                    session = %state.session_id,
                    chunk = state.chunks_seen,
                    "{} new matches, signal {:.2}, alpha {:.2}, explicit {:?}",
                    region.scored.len(),
                    region.signal,
                    alpha,
                    region.fired
                );
                state.consumed.extend(region.scored);
                (region.signal, region.fired)
            }
            Err(e) => {
                warn!(session = %state.session_id, "Chunk scoring failed, keeping previous values: {}", e);
                (0.0, Vec::new())
            }
        };

        let explicit = !fired.is_empty();
        let decision = evaluate_gate(explicit, signal, &delta_tokens, rt);
        state.gate_expires_at = next_expiry(decision, state.gate_expires_at, now, rt);

        if !state.gate_active(now) {
            let scoring = &self.config.scoring;
            state.last_coordinate = self.coordinate(
                scoring.clamp_axis(state.mood),
                scoring.clamp_axis(state.energy),
            );
        } else {
            debug!(session = %state.session_id, ?decision, "Gate holding coordinate");
        }

        if is_final {
            state.phase = SessionPhase::Finalized;
            debug!(session = %state.session_id, "Realtime session finalized");
        }

        let update = self.snapshot(&state, signal, explicit, now);
        state.last_update = Some(update.clone());
        (state, update)
    }

    fn score_region(&self, state: &RealtimeState, region_start: usize) -> Result<RegionScore, AnalysisError> {
        let scoring = &self.config.scoring;
        let rt = &self.config.realtime;

        let full = NormalizedText::from_normalized(state.text());
        let region = NormalizedText::from_normalized(state.tokens[region_start..].join(" "));
        let signals = collect_text_signals(&region, &self.lexicon, scoring);

        let mut matches = find_matches_from(
            &full,
            &self.lexicon,
            scoring,
            signals.repetition_multiplier,
            region_start,
        );
        let before = matches.len();
        matches.retain(|m| !state.consumed.contains(&(m.pattern_index, m.first_token)));
        let refound = before - matches.len();

        let newest = state.tokens.len().saturating_sub(1);
        for m in &mut matches {
            let distance = newest.saturating_sub(m.last_token) as f64;
            m.recency = (-distance / rt.recency_decay).exp();
        }

        // Declarations are re-checked over the new region plus recent history
        let window_start = region_start.saturating_sub(rt.explicit_window_tokens);
        let history = state.tokens[window_start..region_start].join(" ");
        let region_offset = if history.is_empty() { 0 } else { history.len() + 1 };
        let window_text = state.tokens[window_start..].join(" ");
        let declarations = self.lexicon.explicit.detect(&window_text);
        let mut fired: Vec<Axis> = declarations
            .iter()
            .filter(|d| d.end > region_offset)
            .map(|d| d.axis)
            .collect();
        fired.dedup();

        let boost = ExplicitBoost {
            center: rt.coordinate_center,
            amount: rt.explicit_boost,
        };
        let targets = score_axes(&matches, &signals, &declarations, &self.lexicon, scoring, Some(boost))?;
        let signal = (1.0 - (-targets.contributions.magnitude / rt.signal_saturation).exp()).clamp(0.0, 1.0);

        Ok(RegionScore {
            targets,
            signal,
            fired,
            scored: matches.iter().map(|m| (m.pattern_index, m.first_token)).collect(),
            refound,
        })
    }

    /// Map mood and energy onto the valence/arousal plane
    pub fn coordinate(&self, mood: f64, energy: f64) -> Coordinate {
        let rt = &self.config.realtime;
        Coordinate {
            x: ((mood - rt.coordinate_center) / rt.coordinate_span).clamp(-1.0, 1.0),
            y: ((energy - rt.coordinate_center) / rt.coordinate_span).clamp(-1.0, 1.0),
        }
    }

    fn snapshot(&self, state: &RealtimeState, signal: f64, explicit: bool, now: DateTime<Utc>) -> RealtimeUpdate {
        let scoring = &self.config.scoring;
        let mood = scoring.clamp_axis(state.mood);
        let energy = scoring.clamp_axis(state.energy);
        let anxiety = scoring.clamp_axis(state.anxiety);

        RealtimeUpdate {
            mood_score: scoring.axis_score(mood),
            energy_level: scoring.axis_score(energy),
            anxiety_level: scoring.axis_score(anxiety),
            mood_float: mood,
            energy_float: energy,
            anxiety_float: anxiety,
            coord_x: state.last_coordinate.x,
            coord_y: state.last_coordinate.y,
            signal_strength: signal,
            explicit,
            gate_active: state.gate_active(now),
            finalized: state.is_finalized(),
        }
    }
}
