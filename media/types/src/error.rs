/*!
    Error types for the tinge crate ecosystem.
*/

use std::fmt;

/**
    Error type for the tinge crate ecosystem.

    This is a closed taxonomy: every failure the pipeline can surface maps to
    exactly one of these variants, with enough context (stage, frame index)
    for the caller to decide whether to retry the whole run, discard partial
    output, or surface the message to an end user.
*/
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Effect parameters failed validation. Raised before any I/O.
    InvalidParameters { message: String },
    /// Source cannot be opened or decoded, or reports zero geometry.
    UnreadableMedia { message: String },
    /// Sink cannot be created, or its encoder cannot be opened.
    UnwritableTarget { message: String },
    /// A frame's geometry differs from the sink's declared geometry.
    /// An internal invariant violation, never expected in normal operation.
    GeometryMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// A specific frame failed to decode, transform, or write.
    FrameFailure { index: u64, message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { message } => write!(f, "invalid parameters: {message}"),
            Self::UnreadableMedia { message } => write!(f, "unreadable media: {message}"),
            Self::UnwritableTarget { message } => write!(f, "unwritable target: {message}"),
            Self::GeometryMismatch { expected, actual } => write!(
                f,
                "geometry mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::FrameFailure { index, message } => {
                write!(f, "frame {index} failed: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /**
        Create an invalid-parameters error with the given message.
    */
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /**
        Create an unreadable-media error with the given message.
    */
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::UnreadableMedia {
            message: message.into(),
        }
    }

    /**
        Create an unwritable-target error with the given message.
    */
    pub fn unwritable(message: impl Into<String>) -> Self {
        Self::UnwritableTarget {
            message: message.into(),
        }
    }

    /**
        Create a frame-failure error for the frame at `index`.
    */
    pub fn frame_failure(index: u64, message: impl Into<String>) -> Self {
        Self::FrameFailure {
            index,
            message: message.into(),
        }
    }

    /**
        Create a geometry-mismatch error from expected and actual dimensions.
    */
    pub fn geometry_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::GeometryMismatch { expected, actual }
    }

    /**
        Returns the failing frame index if this is a frame failure.
    */
    pub fn index(&self) -> Option<u64> {
        match self {
            Self::FrameFailure { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/**
    Result type alias for the tinge crate ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let e = Error::invalid_parameters("saturation is NaN");
        assert_eq!(format!("{e}"), "invalid parameters: saturation is NaN");

        let e = Error::unreadable("no video stream");
        assert_eq!(format!("{e}"), "unreadable media: no video stream");

        let e = Error::unwritable("permission denied");
        assert_eq!(format!("{e}"), "unwritable target: permission denied");

        let e = Error::geometry_mismatch((1920, 1080), (1280, 720));
        assert_eq!(
            format!("{e}"),
            "geometry mismatch: expected 1920x1080, got 1280x720"
        );

        let e = Error::frame_failure(5, "decode error");
        assert_eq!(format!("{e}"), "frame 5 failed: decode error");
    }

    #[test]
    fn error_index() {
        assert_eq!(Error::frame_failure(7, "x").index(), Some(7));
        assert_eq!(Error::unreadable("x").index(), None);
        assert_eq!(Error::geometry_mismatch((1, 1), (2, 2)).index(), None);
    }
}
