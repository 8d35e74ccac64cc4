use crate::parallel::ParallelError;

/// An error type for the stack blur operations.
///
/// Every variant is a precondition violation detected before the buffer is touched.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum StackBlurError {
    /// The radius is outside the range covered by the scaling tables.
    #[error("Radius {0} is outside the supported range 0..=254")]
    InvalidRadius(usize),

    /// The image has zero width or height.
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Width of the image in pixels
        width: usize,
        /// Height of the image in pixels
        height: usize,
    },

    /// The channel count is zero.
    #[error("Channel count must be > 0, got {0}")]
    InvalidChannels(usize),

    /// A line of zero samples was requested.
    #[error("Line length must be > 0")]
    EmptyLine,

    /// The buffer holds fewer samples than the image requires.
    #[error("Buffer length ({actual}) is smaller than the image size ({expected})")]
    BufferTooSmall {
        /// Number of samples required by the image
        expected: usize,
        /// Number of samples in the buffer
        actual: usize,
    },

    /// The parallel execution failed to start.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
