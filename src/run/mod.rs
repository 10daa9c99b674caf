pub mod aggregator;
pub mod jvm_run;

pub use aggregator::{PipelineState, RunAggregator};
pub use jvm_run::{Bottleneck, JvmRun, SafepointSummary};
