//! Engine parameter sets.
//!
//! Both modes run with fixed, curated parameter bundles; nothing here
//! is exposed per request. The numbers were tuned against logo and
//! icon uploads and are part of the service contract.

use inkvert_pipeline::ProcessingMode;

/// How ambiguous corners are resolved while walking a boundary.
///
/// At a checkerboard junction the boundary can legally turn either
/// way; the policy picks one, which decides whether diagonally
/// touching regions connect or separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPolicy {
    /// Always turn left (keeps diagonal foreground connected).
    Left,
    /// Always turn right (splits diagonal foreground).
    Right,
    /// Turn toward the locally dominant color.
    Majority,
    /// Turn toward the locally rarer color.
    Minority,
}

/// How the engine binarizes a grayscale image before boundary
/// extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binarization {
    /// Derive the cutoff from the image histogram (Otsu).
    Auto,
    /// Fixed luminance cutoff; pixels below it are foreground.
    Fixed(u8),
}

/// How layer fill colors are chosen in posterized tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStrategy {
    /// Fill each layer with its own threshold luminance.
    Cutoff,
    /// Spread fills evenly across the tonal range, darkest on top.
    Spread,
}

/// Parameters for two-tone (single path) tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceParams {
    /// Regions with a smaller pixel area than this are dropped as
    /// noise.
    pub turd_size: u32,
    /// Ambiguity resolution at checkerboard corners.
    pub turn_policy: TurnPolicy,
    /// Corner smoothing threshold as a fraction of a right angle;
    /// turns sharper than `alpha_max * 90°` stay corners.
    pub alpha_max: f64,
    /// Maximum deviation, in pixels, allowed when simplifying a
    /// boundary polygon.
    pub opt_tolerance: f64,
    /// Foreground/background cutoff selection.
    pub binarization: Binarization,
}

/// Parameters for posterized (layered) tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterizeParams {
    /// Number of tonal layers.
    pub steps: u8,
    /// Layer fill color selection.
    pub fill: FillStrategy,
    /// Corner smoothing threshold; looser than the two-tone default
    /// so tonal boundaries read as soft shapes.
    pub alpha_max: f64,
    /// Boundary simplification tolerance in pixels.
    pub opt_tolerance: f64,
    /// Minimum region area per layer, in pixels.
    pub turd_size: u32,
}

/// A complete engine configuration for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineParams {
    /// Two-tone tracing producing a single compound path.
    Trace(TraceParams),
    /// Layered tracing producing one path per tonal layer.
    Posterize(PosterizeParams),
}

/// Fixed bundle for the `bw` mode.
pub const BW_PARAMS: EngineParams = EngineParams::Trace(TraceParams {
    turd_size: 3,
    turn_policy: TurnPolicy::Minority,
    alpha_max: 1.0,
    opt_tolerance: 0.18,
    binarization: Binarization::Auto,
});

/// Fixed bundle for the `color` mode.
pub const COLOR_PARAMS: EngineParams = EngineParams::Posterize(PosterizeParams {
    steps: 12,
    fill: FillStrategy::Spread,
    alpha_max: 1.3,
    opt_tolerance: 0.18,
    turd_size: 2,
});

impl EngineParams {
    /// The fixed parameter bundle for a processing mode.
    #[must_use]
    pub const fn for_mode(mode: ProcessingMode) -> &'static Self {
        match mode {
            ProcessingMode::Bw => &BW_PARAMS,
            ProcessingMode::Color => &COLOR_PARAMS,
        }
    }
}
