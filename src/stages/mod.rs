pub mod pipeline;
pub mod stage0_normalize;
pub mod stage1_match;
pub mod stage2_score;
pub mod stage3_entities;
pub mod stage4_confidence;

pub use pipeline::*;
pub use stage0_normalize::*;
pub use stage1_match::*;
pub use stage2_score::*;
pub use stage3_entities::*;
pub use stage4_confidence::*;
