pub mod carry_forward;
pub mod config;
pub mod error;
pub mod explode;
pub mod identity;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod schedule;
pub mod table;

pub use config::PipelineConfig;
pub use error::{Result, ScheduleError};
pub use pipeline::{ExamPipeline, InvigilatorPipeline};
pub use table::{PayloadSource, RawTable, TableSource};

pub const TARGET_PIPELINE: &str = "pipeline";
