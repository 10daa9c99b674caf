pub mod decorator;
pub mod event_type;
pub mod hydrator;
pub mod memory;
pub mod preprocessor;
pub mod recognizer;
pub mod trigger;
pub mod types;

pub use decorator::{Decorator, Instant, LogStyle, TimelineAnchor};
pub use event_type::{Collector, EventFamily, EventType};
pub use hydrator::Hydrator;
pub use memory::{Memory, MemoryDelta, MemoryUnit};
pub use preprocessor::{PreprocessState, Preprocessor};
pub use recognizer::classify;
pub use trigger::Trigger;
pub use types::*;
