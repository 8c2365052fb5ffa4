use serde::{Deserialize, Serialize};

/// Valence/arousal point, each component in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// Per-chunk output of the realtime engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeUpdate {
    pub mood_score: u8,
    pub energy_level: u8,
    pub anxiety_level: u8,
    pub mood_float: f64,
    pub energy_float: f64,
    pub anxiety_float: f64,
    pub coord_x: f64,
    pub coord_y: f64,
    /// 0-1 strength of this chunk's evidence
    pub signal_strength: f64,
    /// An explicit self-report fired in this chunk
    pub explicit: bool,
    /// Coordinate is frozen at its last value
    pub gate_active: bool,
    pub finalized: bool,
}

impl RealtimeUpdate {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            x: self.coord_x,
            y: self.coord_y,
        }
    }
}
