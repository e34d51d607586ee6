/*!
    Shared types for the tinge crate ecosystem.

    This crate defines the vocabulary of the ecosystem — the types that cross
    crate boundaries. It has no dependency on FFmpeg, making it lightweight and
    enabling consumers (and their tests) to depend on it without pulling in
    FFmpeg bindings.

    # Core Types

    - [`Rational`] - Rational numbers for frame rates
    - [`VideoFrame`] - A decoded frame in packed BGR24
    - [`VideoStreamInfo`] - Stream geometry and timing metadata

    # Codec Boundary

    - [`FrameSource`] and [`FrameSink`] - Traits that the decode and encode
      adapters implement, and that the pipeline driver consumes

    # Error Handling

    - [`Error`] and [`Result`] - Common error types
*/

mod codec;
mod error;
mod frame;
mod rational;
mod stream;

pub use codec::{FrameSink, FrameSource};
pub use error::{Error, Result};
pub use frame::{BGR_CHANNELS, VideoFrame};
pub use rational::Rational;
pub use stream::VideoStreamInfo;
