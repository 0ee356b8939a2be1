//! Request orchestration for inkvert.
//!
//! One call, [`process`], runs an upload through the whole chain:
//! preprocess, trace, normalize, assemble. The engine is injected as
//! an [`inkvert_trace::Vectorizer`] so callers choose the
//! implementation; everything else is fixed by the mode.

pub mod error;
pub mod stage;

use std::sync::Arc;

use inkvert_pipeline::ProcessingMode;
use inkvert_trace::Vectorizer;
use serde::Serialize;

pub use error::ServiceError;

/// Metadata reported alongside a traced document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceMeta {
    /// Authoritative raster width after preprocessing.
    pub width: u32,
    /// Authoritative raster height after preprocessing.
    pub height: u32,
    /// Wall-clock processing time, receipt to assembly.
    pub duration_ms: u64,
    /// Number of `<path` elements in the normalized markup.
    pub paths: usize,
    /// The processing mode that ran.
    pub mode: ProcessingMode,
    /// Preset label for the mode.
    pub preset: &'static str,
}

/// A completed trace: normalized markup plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceResult {
    /// The normalized SVG document.
    pub svg: String,
    /// Processing metadata.
    pub meta: TraceMeta,
}

/// Process one upload end to end.
///
/// # Errors
///
/// Returns [`ServiceError`] if any stage fails; the request produces
/// either a complete result or an error, never partial output.
pub async fn process(
    engine: Arc<dyn Vectorizer>,
    mode: ProcessingMode,
    bytes: Vec<u8>,
) -> Result<TraceResult, ServiceError> {
    let result = stage::Received::new(mode, bytes)
        .preprocess()
        .await?
        .trace(engine)
        .await?
        .normalize();
    tracing::info!(
        mode = mode.as_str(),
        width = result.meta.width,
        height = result.meta.height,
        paths = result.meta.paths,
        duration_ms = result.meta.duration_ms,
        "trace complete"
    );
    Ok(result)
}
