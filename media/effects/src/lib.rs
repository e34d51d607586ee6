/*!
    Per-frame color transforms for the tinge crate ecosystem.

    Every transform here is pure and stateless: it maps one [`VideoFrame`]
    to a new frame of identical geometry, holds nothing between calls, and
    never references neighboring frames. Frames can therefore be processed
    in any order, although the pipeline driver always preserves input order.

    # Selecting a transform

    [`Effect`] is the closed set of supported transforms, each variant
    carrying only the numeric parameters it needs:

    ```
    use tinge_effects::Effect;
    use tinge_types::VideoFrame;

    let effect = Effect::Sepia { intensity: 0.8 };
    effect.validate()?;

    let frame = VideoFrame::black(64, 64);
    let toned = effect.apply(&frame);
    assert_eq!(toned.geometry(), frame.geometry());
    # Ok::<(), tinge_types::Error>(())
    ```

    # Failure model

    The transform functions assume well-formed, same-geometry input and
    never fail on their own. Bad numeric parameters (NaN, infinity) are
    rejected up front by [`Effect::validate`]; out-of-range but finite
    parameters are permitted and simply clamp to the 8-bit channel range
    during application.
*/

pub use tinge_types::{Error, Result, VideoFrame};

mod effect;
mod hsl;
mod ops;

pub use effect::Effect;
pub use ops::{contrast_brightness, greyscale, hsl_adjust, invert, sepia};
