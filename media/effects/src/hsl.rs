/*!
    BGR ↔ HLS color space conversion.

    Uses 8-bit-scaled HLS storage: hue on [0, 180) (degrees halved so the
    full circle fits an 8-bit channel), lightness and saturation on
    [0, 255]. Hue for achromatic pixels is defined as 0.
*/

use crate::ops::clamp_channel;

/**
    Convert a packed `[b, g, r]` pixel to `(hue, lightness, saturation)`.

    Hue is on [0, 180), lightness and saturation on [0, 255].
*/
pub(crate) fn bgr_to_hls(bgr: [u8; 3]) -> (f32, f32, f32) {
    let b = bgr[0] as f32 / 255.0;
    let g = bgr[1] as f32 / 255.0;
    let r = bgr[2] as f32 / 255.0;

    let vmax = r.max(g).max(b);
    let vmin = r.min(g).min(b);
    let lightness = (vmax + vmin) / 2.0;
    let delta = vmax - vmin;

    if delta == 0.0 {
        return (0.0, lightness * 255.0, 0.0);
    }

    let saturation = if lightness < 0.5 {
        delta / (vmax + vmin)
    } else {
        delta / (2.0 - vmax - vmin)
    };

    let mut hue = if vmax == r {
        60.0 * (g - b) / delta
    } else if vmax == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    (hue / 2.0, lightness * 255.0, saturation * 255.0)
}

/**
    Convert `(hue, lightness, saturation)` back to a packed `[b, g, r]`
    pixel, rounding each channel to the nearest 8-bit value.
*/
pub(crate) fn hls_to_bgr(hue: f32, lightness: f32, saturation: f32) -> [u8; 3] {
    let h = (hue * 2.0) / 360.0;
    let l = lightness / 255.0;
    let s = saturation / 255.0;

    if s <= 0.0 {
        let v = clamp_channel(l * 255.0);
        return [v, v, v];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let r = hue_component(p, q, h + 1.0 / 3.0);
    let g = hue_component(p, q, h);
    let b = hue_component(p, q, h - 1.0 / 3.0);

    [
        clamp_channel(b * 255.0),
        clamp_channel(g * 255.0),
        clamp_channel(r * 255.0),
    ]
}

fn hue_component(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: [u8; 3], expected: [u8; 3], tolerance: u8) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!(
                a.abs_diff(*e) <= tolerance,
                "channel {a} not within {tolerance} of {e} ({actual:?} vs {expected:?})"
            );
        }
    }

    #[test]
    fn achromatic_has_zero_hue_and_saturation() {
        let (h, l, s) = bgr_to_hls([128, 128, 128]);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 128.0).abs() < 1.0);
    }

    #[test]
    fn primary_hues() {
        // Pure red sits at hue 0, green at 60, blue at 120 (half degrees).
        let (h, _, _) = bgr_to_hls([0, 0, 255]);
        assert!((h - 0.0).abs() < 0.5);
        let (h, _, _) = bgr_to_hls([0, 255, 0]);
        assert!((h - 60.0).abs() < 0.5);
        let (h, _, _) = bgr_to_hls([255, 0, 0]);
        assert!((h - 120.0).abs() < 0.5);
    }

    #[test]
    fn full_saturation_for_primaries() {
        let (_, l, s) = bgr_to_hls([0, 0, 255]);
        assert!((s - 255.0).abs() < 0.5);
        assert!((l - 127.5).abs() < 0.5);
    }

    #[test]
    fn round_trip_within_tolerance() {
        let pixels: [[u8; 3]; 7] = [
            [0, 0, 0],
            [255, 255, 255],
            [12, 200, 34],
            [200, 12, 34],
            [34, 12, 200],
            [250, 128, 1],
            [77, 77, 80],
        ];
        for bgr in pixels {
            let (h, l, s) = bgr_to_hls(bgr);
            assert_close(hls_to_bgr(h, l, s), bgr, 2);
        }
    }
}
