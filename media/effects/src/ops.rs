/*!
    The transform functions.

    Each function maps one frame to a new frame of identical geometry. All
    arithmetic happens per pixel in `f32`, rounded to the nearest 8-bit
    value and saturated to [0, 255] on the way back out.
*/

use tinge_types::{BGR_CHANNELS, VideoFrame};

use crate::hsl::{bgr_to_hls, hls_to_bgr};

/// Round and saturate one channel value to the 8-bit range.
pub(crate) fn clamp_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Hue storage range: degrees halved to fit 8-bit OpenCV-style HLS.
const HUE_RANGE: f32 = 180.0;

/// Canonical sepia color-mixing matrix, rows in R, G, B output order.
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

fn map_pixels(frame: &VideoFrame, f: impl Fn([u8; 3]) -> [u8; 3]) -> VideoFrame {
    let mut data = Vec::with_capacity(frame.data.len());
    for bgr in frame.data.chunks_exact(BGR_CHANNELS) {
        data.extend_from_slice(&f([bgr[0], bgr[1], bgr[2]]));
    }
    VideoFrame::new(data, frame.width, frame.height)
}

/**
    Convert the frame to greyscale.

    Computes BT.601 luma (0.299 R + 0.587 G + 0.114 B) and replicates it
    into all three channels, so the result stays in the standard packed
    BGR24 format.
*/
pub fn greyscale(frame: &VideoFrame) -> VideoFrame {
    map_pixels(frame, |[b, g, r]| {
        let y = clamp_channel(0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32);
        [y, y, y]
    })
}

/**
    Shift hue and scale saturation and lightness.

    `hue` is added to the hue channel and folded back into [0, 180); the
    saturation and lightness channels are multiplied by their factors and
    clamped. Negative or greater-than-one multipliers are permitted and
    simply clamp.
*/
pub fn hsl_adjust(frame: &VideoFrame, hue: f32, saturation: f32, lightness: f32) -> VideoFrame {
    map_pixels(frame, |bgr| {
        let (h, l, s) = bgr_to_hls(bgr);
        let h = (h + hue).rem_euclid(HUE_RANGE);
        let s = (s * saturation).clamp(0.0, 255.0);
        let l = (l * lightness).clamp(0.0, 255.0);
        hls_to_bgr(h, l, s)
    })
}

/**
    Per-channel affine rescale: `clamp(contrast * v + brightness, 0, 255)`.
*/
pub fn contrast_brightness(frame: &VideoFrame, contrast: f32, brightness: f32) -> VideoFrame {
    map_pixels(frame, |bgr| {
        bgr.map(|v| clamp_channel(contrast * v as f32 + brightness))
    })
}

/**
    Apply a sepia tone.

    Mixes channels through `(1 - intensity) * I + intensity * S`, where `S`
    is the canonical sepia matrix: intensity 0 is the identity, intensity 1
    the full canonical tone. Each output channel is clamped to [0, 255].
*/
pub fn sepia(frame: &VideoFrame, intensity: f32) -> VideoFrame {
    map_pixels(frame, |[b, g, r]| {
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        let toned = [
            SEPIA[0][0] * rf + SEPIA[0][1] * gf + SEPIA[0][2] * bf,
            SEPIA[1][0] * rf + SEPIA[1][1] * gf + SEPIA[1][2] * bf,
            SEPIA[2][0] * rf + SEPIA[2][1] * gf + SEPIA[2][2] * bf,
        ];
        [
            clamp_channel((1.0 - intensity) * bf + intensity * toned[2]),
            clamp_channel((1.0 - intensity) * gf + intensity * toned[1]),
            clamp_channel((1.0 - intensity) * rf + intensity * toned[0]),
        ]
    })
}

/**
    Bitwise inversion: `255 - v` per channel. Applying it twice restores
    the original frame exactly.
*/
pub fn invert(frame: &VideoFrame) -> VideoFrame {
    let data = frame.data.iter().map(|v| 255 - v).collect();
    VideoFrame::new(data, frame.width, frame.height)
}
