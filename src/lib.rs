pub mod config;
pub mod crisis;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod lexicon;
pub mod models;
pub mod realtime;
pub mod stages;

pub use config::{AxisBaselines, ConfidenceConfig, EngineConfig, RealtimeConfig, ScoringConfig};
pub use crisis::{detect_crisis, CrisisAssessment};
pub use error::{AnalysisError, ConfigError, LexiconError};
pub use io::{
    load_config, load_lexicon, parse_transcription_file, parse_transcription_json, CheckInReport,
    HumanSummary, ReportMetadata,
};
pub use lexicon::CompiledLexicon;
pub use models::{
    AnalysisDetails, AnalysisResult, Axis, Coordinate, IntensityBucket, Lexicon, RealtimeUpdate,
    SentimentBucket, TranscriptionRecord,
};
pub use realtime::{RealtimeEngine, RealtimeState, SessionPhase};
pub use stages::{normalize, MoodAnalyzer};
