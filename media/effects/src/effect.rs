/*!
    Effect selection and parameter validation.
*/

use std::collections::HashMap;

use tinge_types::{Error, Result, VideoFrame};

use crate::ops;

/**
    A selected color transform and its parameters.

    This is a closed set: front ends bind their string commands to one of
    these variants (via [`Effect::from_name`]) instead of dispatching
    dynamically. Immutable once constructed; call [`Effect::validate`]
    before running a pipeline with it.
*/
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Convert to greyscale.
    Greyscale,
    /// Shift hue (half-degrees, wraps at 180) and scale saturation and
    /// lightness.
    HslAdjust {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
    /// Per-channel affine rescale.
    ContrastBrightness { contrast: f32, brightness: f32 },
    /// Sepia tone; intensity 0 is the identity, 1 the canonical matrix.
    Sepia { intensity: f32 },
    /// Bitwise channel inversion.
    Invert,
}

impl Effect {
    /**
        The transform's canonical name, as accepted by [`Effect::from_name`].
    */
    pub fn name(&self) -> &'static str {
        match self {
            Self::Greyscale => "greyscale",
            Self::HslAdjust { .. } => "hsl",
            Self::ContrastBrightness { .. } => "contrast-brightness",
            Self::Sepia { .. } => "sepia",
            Self::Invert => "invert",
        }
    }

    /**
        Check that every numeric parameter is finite.

        Out-of-range but finite values are allowed; they clamp during
        application. NaN and infinity are rejected here, before any I/O
        happens.
    */
    pub fn validate(&self) -> Result<()> {
        let params: Vec<(&str, f32)> = match self {
            Self::Greyscale | Self::Invert => vec![],
            Self::HslAdjust {
                hue,
                saturation,
                lightness,
            } => vec![
                ("hue", *hue),
                ("saturation", *saturation),
                ("lightness", *lightness),
            ],
            Self::ContrastBrightness {
                contrast,
                brightness,
            } => vec![("contrast", *contrast), ("brightness", *brightness)],
            Self::Sepia { intensity } => vec![("intensity", *intensity)],
        };
        for (name, value) in params {
            if !value.is_finite() {
                return Err(Error::invalid_parameters(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /**
        Apply this effect to one frame, producing a new frame of identical
        geometry.
    */
    pub fn apply(&self, frame: &VideoFrame) -> VideoFrame {
        match *self {
            Self::Greyscale => ops::greyscale(frame),
            Self::HslAdjust {
                hue,
                saturation,
                lightness,
            } => ops::hsl_adjust(frame, hue, saturation, lightness),
            Self::ContrastBrightness {
                contrast,
                brightness,
            } => ops::contrast_brightness(frame, contrast, brightness),
            Self::Sepia { intensity } => ops::sepia(frame, intensity),
            Self::Invert => ops::invert(frame),
        }
    }

    /**
        Build an effect from a transform name and named parameters.

        This is the contract consumed by front ends: `name` is one of
        `greyscale`, `hsl`, `contrast-brightness` (alias `cb`), `sepia`,
        `invert`. Unknown names and missing required parameters are
        `InvalidParameters`. `sepia` accepts a missing `intensity` and
        defaults it to 1.0; `hsl` accepts `brightness` as an alias for
        `lightness`.
    */
    pub fn from_name(name: &str, params: &HashMap<String, f64>) -> Result<Self> {
        let required = |key: &str| -> Result<f32> {
            params
                .get(key)
                .map(|v| *v as f32)
                .ok_or_else(|| Error::invalid_parameters(format!("{name} requires `{key}`")))
        };

        let effect = match name {
            "greyscale" => Self::Greyscale,
            "hsl" => Self::HslAdjust {
                hue: required("hue")?,
                saturation: required("saturation")?,
                lightness: params
                    .get("lightness")
                    .or_else(|| params.get("brightness"))
                    .map(|v| *v as f32)
                    .ok_or_else(|| Error::invalid_parameters("hsl requires `lightness`"))?,
            },
            "contrast-brightness" | "cb" => Self::ContrastBrightness {
                contrast: required("contrast")?,
                brightness: required("brightness")?,
            },
            "sepia" => Self::Sepia {
                intensity: params.get("intensity").map(|v| *v as f32).unwrap_or(1.0),
            },
            "invert" => Self::Invert,
            other => {
                return Err(Error::invalid_parameters(format!(
                    "unknown transform `{other}`"
                )));
            }
        };
        effect.validate()?;
        Ok(effect)
    }
}
