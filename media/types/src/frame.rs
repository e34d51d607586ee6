/*!
    Decoded frame type.
*/

/// Bytes per pixel in a packed BGR24 frame.
pub const BGR_CHANNELS: usize = 3;

/**
    A decoded video frame in packed BGR24.

    Pixel data is row-major with three bytes per pixel in blue-green-red
    order and no row padding, so `data.len()` is always
    `width * height * 3` for a well-formed frame. Every frame read from one
    source has identical width and height.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    /// Raw pixel data, tightly packed.
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl VideoFrame {
    /**
        Create a new video frame.
    */
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /**
        Create an all-black frame of the given geometry.
    */
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * BGR_CHANNELS],
            width,
            height,
        }
    }

    /**
        Returns the expected data length in bytes for this geometry.
    */
    pub fn expected_data_len(&self) -> usize {
        self.width as usize * self.height as usize * BGR_CHANNELS
    }

    /**
        Returns the frame geometry as `(width, height)`.
    */
    pub fn geometry(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /**
        Read the `[b, g, r]` channels of the pixel at `(x, y)`.

        # Panics

        Panics if `(x, y)` is outside the frame.
    */
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.pixel_offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /**
        Write the `[b, g, r]` channels of the pixel at `(x, y)`.

        # Panics

        Panics if `(x, y)` is outside the frame.
    */
    pub fn set_pixel(&mut self, x: u32, y: u32, bgr: [u8; 3]) {
        let i = self.pixel_offset(x, y);
        self.data[i..i + BGR_CHANNELS].copy_from_slice(&bgr);
    }

    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * BGR_CHANNELS
    }
}

// Ensure frames can cross thread boundaries between pipeline invocations
static_assertions::assert_impl_all!(VideoFrame: Send, Sync);
