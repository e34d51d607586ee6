/*!
    Stream information types.
*/

use crate::Rational;

/**
    Metadata describing a video stream.

    Captured once when a source is opened and used to initialize the paired
    sink, so every written frame is geometrically compatible with what was
    read.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoStreamInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate (frames per second).
    pub frame_rate: Rational,
    /// Total frame count, when the container reports one.
    pub frame_count: Option<u64>,
}

impl VideoStreamInfo {
    /**
        Create stream info with the given geometry and frame rate.
    */
    pub fn new(width: u32, height: u32, frame_rate: Rational) -> Self {
        Self {
            width,
            height,
            frame_rate,
            frame_count: None,
        }
    }

    /**
        Set the total frame count.
    */
    pub fn with_frame_count(mut self, count: u64) -> Self {
        self.frame_count = Some(count);
        self
    }

    /**
        Returns the stream geometry as `(width, height)`.
    */
    pub fn geometry(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_info_construction() {
        let info = VideoStreamInfo::new(1280, 720, Rational::new(30, 1));
        assert_eq!(info.geometry(), (1280, 720));
        assert_eq!(info.frame_rate, Rational::new(30, 1));
        assert_eq!(info.frame_count, None);
    }

    #[test]
    fn with_frame_count() {
        let info = VideoStreamInfo::new(640, 480, Rational::new(24, 1)).with_frame_count(240);
        assert_eq!(info.frame_count, Some(240));
    }
}
