//! Observability setup for Marketeer: tracing subscriber initialization and
//! OTel GenAI span attribute constants.

pub mod genai_attrs;
pub mod tracing_setup;
