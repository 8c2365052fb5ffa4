pub mod delta;
pub mod engine;
pub mod gate;
pub mod state;

pub use delta::*;
pub use engine::*;
pub use gate::*;
pub use state::*;
