//! Processing modes and their fixed filter chains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::filter::FilterOp;

/// Filter chain for [`ProcessingMode::Bw`]: flatten the image toward a
/// crisp two-tone original before binary tracing. The trailing light
/// blur rounds staircase edges left by thresholding.
pub const BW_FILTERS: [FilterOp; 5] = [
    FilterOp::Despeckle { radius: 1 },
    FilterOp::Normalize,
    FilterOp::Grayscale,
    FilterOp::Threshold { value: 128 },
    FilterOp::Blur { sigma: 0.3 },
];

/// Filter chain for [`ProcessingMode::Color`]: smooth speckle and
/// stretch contrast while keeping the full tonal range for layered
/// tracing.
pub const COLOR_FILTERS: [FilterOp; 2] = [
    FilterOp::Blur { sigma: 0.6 },
    FilterOp::Normalize,
];

/// How an upload is preprocessed and traced.
///
/// The mode fixes everything downstream: filter chain, tracing
/// strategy and the preset label reported in response metadata. There
/// are no per-request tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Two-tone line-art tracing; emits a single black path.
    Bw,
    /// Layered posterized tracing; emits one path per tonal layer.
    Color,
}

impl ProcessingMode {
    /// Stable wire name, as used in route paths and response metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bw => "bw",
            Self::Color => "color",
        }
    }

    /// Preset label reported in response metadata.
    #[must_use]
    pub const fn preset(self) -> &'static str {
        match self {
            Self::Bw => "logo",
            Self::Color => "posterize",
        }
    }

    /// The fixed filter chain for this mode.
    #[must_use]
    pub const fn filters(self) -> &'static [FilterOp] {
        match self {
            Self::Bw => &BW_FILTERS,
            Self::Color => &COLOR_FILTERS,
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown processing mode: {0:?} (expected \"bw\" or \"color\")")]
pub struct UnknownMode(pub String);

impl FromStr for ProcessingMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bw" => Ok(Self::Bw),
            "color" => Ok(Self::Color),
            other => Err(UnknownMode(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for mode in [ProcessingMode::Bw, ProcessingMode::Color] {
            assert_eq!(mode.as_str().parse::<ProcessingMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "sepia".parse::<ProcessingMode>().unwrap_err();
        assert_eq!(err, UnknownMode("sepia".to_owned()));
    }

    #[test]
    fn presets_match_modes() {
        assert_eq!(ProcessingMode::Bw.preset(), "logo");
        assert_eq!(ProcessingMode::Color.preset(), "posterize");
    }

    #[test]
    fn bw_chain_shape() {
        let chain = ProcessingMode::Bw.filters();
        assert_eq!(chain.len(), 5);
        assert_eq!(chain[0], FilterOp::Despeckle { radius: 1 });
        assert_eq!(chain[3], FilterOp::Threshold { value: 128 });
        assert_eq!(chain[4], FilterOp::Blur { sigma: 0.3 });
    }

    #[test]
    fn color_chain_shape() {
        let chain = ProcessingMode::Color.filters();
        assert_eq!(chain, &[FilterOp::Blur { sigma: 0.6 }, FilterOp::Normalize]);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&ProcessingMode::Color).unwrap();
        assert_eq!(json, "\"color\"");
        let parsed: ProcessingMode = serde_json::from_str("\"bw\"").unwrap();
        assert_eq!(parsed, ProcessingMode::Bw);
    }
}
