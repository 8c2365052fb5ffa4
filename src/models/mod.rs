pub mod lexicon;
pub mod realtime;
pub mod result;
pub mod transcription;

pub use lexicon::*;
pub use realtime::*;
pub use result::*;
pub use transcription::*;
