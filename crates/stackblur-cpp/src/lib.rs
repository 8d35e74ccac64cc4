#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The bridge hands a caller-owned pixel buffer to the blur kernel without copying it.
//! On the C++ side every function takes a `rust::Slice<uint8_t>` and throws
//! `rust::Error` when the arguments are rejected.

#[cxx::bridge(namespace = "stackblur")]
mod ffi {
    /// Image size in pixels
    ///
    /// Wraps stackblur::ImageSize
    #[derive(Debug, Clone, Copy)]
    pub struct ImageSize {
        /// Width of the image in pixels
        pub width: usize,
        /// Height of the image in pixels
        pub height: usize,
    }

    // Buffer layouts following OpenCV naming convention:
    // U8C1 - Unsigned 8-bit, 1 Channel  (Grayscale)
    // U8C3 - Unsigned 8-bit, 3 Channels (RGB)
    // U8C4 - Unsigned 8-bit, 4 Channels (RGBA)

    extern "Rust" {
        /// Blur a grayscale buffer in place
        ///
        /// # Arguments
        ///
        /// * `data` - Pixel data, at least width * height bytes
        /// * `size` - Image size in pixels
        /// * `radius` - Blur radius in 0..=254
        ///
        /// # Errors
        ///
        /// Throws exception if the radius, size or buffer length is invalid
        fn stack_blur_u8c1(data: &mut [u8], size: ImageSize, radius: usize) -> Result<()>;

        /// Blur an RGB buffer in place, each channel independently
        ///
        /// # Errors
        ///
        /// Throws exception if the radius, size or buffer length is invalid
        fn stack_blur_u8c3(data: &mut [u8], size: ImageSize, radius: usize) -> Result<()>;

        /// Blur an RGBA buffer in place, each channel independently
        ///
        /// # Errors
        ///
        /// Throws exception if the radius, size or buffer length is invalid
        fn stack_blur_u8c4(data: &mut [u8], size: ImageSize, radius: usize) -> Result<()>;

        /// Version of the library
        fn version() -> String;
    }
}

use stackblur::{ExecutionStrategy, StackBlurError};

impl From<stackblur::ImageSize> for ffi::ImageSize {
    fn from(size: stackblur::ImageSize) -> Self {
        ffi::ImageSize {
            width: size.width,
            height: size.height,
        }
    }
}

impl From<ffi::ImageSize> for stackblur::ImageSize {
    fn from(size: ffi::ImageSize) -> Self {
        stackblur::ImageSize {
            width: size.width,
            height: size.height,
        }
    }
}

/// Macro to define one bridged blur function per channel count
///
/// Usage: define_stack_blur!(stack_blur_u8c3, 3);
macro_rules! define_stack_blur {
    ($name:ident, $ch:expr) => {
        fn $name(
            data: &mut [u8],
            size: ffi::ImageSize,
            radius: usize,
        ) -> Result<(), StackBlurError> {
            log::debug!("{} called from C++ with {:?}", stringify!($name), size);
            stackblur::stack_blur_with_strategy(
                data,
                size.into(),
                $ch,
                radius,
                ExecutionStrategy::Auto,
            )
        }
    };
}

define_stack_blur!(stack_blur_u8c1, 1); // Grayscale
define_stack_blur!(stack_blur_u8c3, 3); // RGB
define_stack_blur!(stack_blur_u8c4, 4); // RGBA

fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
