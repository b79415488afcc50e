//! The open tracking pixel.

/// MIME type of [`TRACKING_PIXEL`].
pub const PIXEL_MIME_TYPE: &str = "image/png";

/// A 1×1 fully transparent PNG (8-bit grayscale with alpha).
pub const TRACKING_PIXEL: [u8; 68] = [
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x04, 0x00, 0x00, 0x00, 0xb5, 0x1c, 0x0c,
    0x02, 0x00, 0x00, 0x00, 0x0b, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64, 0x60, 0x00, 0x00,
    0x00, 0x06, 0x00, 0x02, 0x30, 0x81, 0xd0, 0x2f, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44,
    0xae, 0x42, 0x60, 0x82,
];

/// Returns the tracking pixel bytes and their MIME type.
pub fn open_tracking_pixel() -> (&'static [u8], &'static str) {
    (&TRACKING_PIXEL, PIXEL_MIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size_and_mime() {
        let (pixel, mime) = open_tracking_pixel();

        assert_eq!(pixel.len(), 68);
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn test_pixel_is_png() {
        let (pixel, _) = open_tracking_pixel();

        assert_eq!(&pixel[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(&pixel[12..16], b"IHDR");
        assert_eq!(&pixel[pixel.len() - 8..pixel.len() - 4], b"IEND");
    }

    #[test]
    fn test_pixel_is_constant() {
        assert_eq!(open_tracking_pixel(), open_tracking_pixel());
    }
}
