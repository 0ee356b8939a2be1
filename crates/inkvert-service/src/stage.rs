//! Typestate request stages.
//!
//! A request can only move forward: `Received` → `Preprocessed` →
//! `Traced` → result. Each transition consumes the previous stage, so
//! skipping or repeating a stage does not compile. The CPU-bound
//! stages run on the blocking thread pool to keep the runtime's
//! reactor threads free.

use std::sync::Arc;
use std::time::Instant;

use inkvert_pipeline::{Dimensions, ProcessingMode, RasterImage};
use inkvert_trace::Vectorizer;

use crate::error::ServiceError;
use crate::{TraceMeta, TraceResult};

/// A validated upload, ready for preprocessing.
#[derive(Debug)]
pub struct Received {
    mode: ProcessingMode,
    bytes: Vec<u8>,
    started: Instant,
}

impl Received {
    /// Start the request clock and hold the upload.
    #[must_use]
    pub fn new(mode: ProcessingMode, bytes: Vec<u8>) -> Self {
        Self {
            mode,
            bytes,
            started: Instant::now(),
        }
    }

    /// Run the preprocessing pipeline on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Preprocess`] if the upload cannot be
    /// decoded or re-encoded, or [`ServiceError::Worker`] if the
    /// worker task dies.
    pub async fn preprocess(self) -> Result<Preprocessed, ServiceError> {
        let Self {
            mode,
            bytes,
            started,
        } = self;
        let raster = tokio::task::spawn_blocking(move || inkvert_pipeline::preprocess(&bytes, mode))
            .await
            .map_err(ServiceError::worker)??;
        Ok(Preprocessed {
            mode,
            raster,
            started,
        })
    }
}

/// A tracer-ready raster.
#[derive(Debug)]
pub struct Preprocessed {
    mode: ProcessingMode,
    raster: RasterImage,
    started: Instant,
}

impl Preprocessed {
    /// Run the tracing engine on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Trace`] if the engine fails, or
    /// [`ServiceError::Worker`] if the worker task dies.
    pub async fn trace(self, engine: Arc<dyn Vectorizer>) -> Result<Traced, ServiceError> {
        let Self {
            mode,
            raster,
            started,
        } = self;
        let dimensions = raster.dimensions();
        let markup =
            tokio::task::spawn_blocking(move || inkvert_trace::trace(engine.as_ref(), &raster, mode))
                .await
                .map_err(ServiceError::worker)??;
        Ok(Traced {
            mode,
            dimensions,
            markup,
            started,
        })
    }
}

/// Raw engine markup awaiting normalization.
#[derive(Debug)]
pub struct Traced {
    mode: ProcessingMode,
    dimensions: Dimensions,
    markup: String,
    started: Instant,
}

impl Traced {
    /// Repair the markup and assemble the response payload. The
    /// duration is measured here, at the end of the last stage.
    #[must_use]
    pub fn normalize(self) -> TraceResult {
        let document = inkvert_svg::normalize(&self.markup, self.dimensions);
        let duration_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        TraceResult {
            meta: TraceMeta {
                width: self.dimensions.width,
                height: self.dimensions.height,
                duration_ms,
                paths: document.path_count(),
                mode: self.mode,
                preset: self.mode.preset(),
            },
            svg: document.into_markup(),
        }
    }
}
