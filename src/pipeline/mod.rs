// src/pipeline/mod.rs
mod builder;
mod orchestrator;
mod report;

pub use builder::PipelineBuilder;
pub use orchestrator::LabelPipeline;
pub use report::RunReport;
