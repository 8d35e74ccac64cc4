use crate::{
    image::ImageSize,
    kernel::{blur_pass, Axis},
    parallel::ExecutionStrategy,
    tables::{ScaleFactor, MAX_RADIUS},
    StackBlurError,
};

/// Check the arguments of a blur call before anything is written.
///
/// # Errors
///
/// * [`StackBlurError::InvalidRadius`] if `radius > MAX_RADIUS`.
/// * [`StackBlurError::InvalidDimensions`] if the width or the height is zero.
/// * [`StackBlurError::InvalidChannels`] if `channels` is zero.
/// * [`StackBlurError::BufferTooSmall`] if `len < width * height * channels`.
pub(crate) fn validate(
    len: usize,
    size: ImageSize,
    channels: usize,
    radius: usize,
) -> Result<(), StackBlurError> {
    if radius > MAX_RADIUS {
        return Err(StackBlurError::InvalidRadius(radius));
    }

    if size.width == 0 || size.height == 0 {
        return Err(StackBlurError::InvalidDimensions {
            width: size.width,
            height: size.height,
        });
    }

    if channels == 0 {
        return Err(StackBlurError::InvalidChannels(channels));
    }

    let expected = size
        .num_pixels()
        .checked_mul(channels)
        .ok_or(StackBlurError::InvalidDimensions {
            width: size.width,
            height: size.height,
        })?;

    if len < expected {
        return Err(StackBlurError::BufferTooSmall {
            expected,
            actual: len,
        });
    }

    Ok(())
}

/// Validate, then run the passes in order under one installation of `strategy`.
///
/// A [`ExecutionStrategy::Fixed`] pool is built once and shared by all passes.
fn run_passes(
    data: &mut [u8],
    size: ImageSize,
    channels: usize,
    radius: usize,
    strategy: ExecutionStrategy,
    axes: &[Axis],
) -> Result<(), StackBlurError> {
    validate(data.len(), size, channels, radius)?;
    let factor = ScaleFactor::for_radius(radius)?;
    let data = &mut data[..size.num_pixels() * channels];

    log::debug!(
        "stack blur {} with {} channels, radius {}, strategy {:?}, passes {:?}",
        size,
        channels,
        radius,
        strategy,
        axes
    );

    let run = |data: &mut [u8], parallel: bool| {
        for &axis in axes {
            blur_pass(data, size, channels, radius, factor, axis, parallel);
        }
    };

    if strategy.is_parallel(size.num_pixels()) {
        strategy.install(|| run(data, true))?;
    } else {
        run(data, false);
    }

    Ok(())
}

/// Blur a single channel image in place using the stack blur algorithm.
///
/// A horizontal pass over every row is followed by a vertical pass over every column,
/// each replacing a sample by the tent-weighted average of the `2 * radius + 1` samples
/// around it. Samples outside the image repeat the nearest edge sample.
///
/// # Arguments
///
/// * `data` - The image buffer with shape (H, W), row-major.
/// * `size` - The size of the image.
/// * `radius` - The blur radius in `0..=254`. A radius of 0 leaves the image unchanged.
///
/// # Errors
///
/// Returns an error if the arguments are invalid; the buffer is then left untouched.
///
/// # Examples
///
/// ```
/// use stackblur::{stack_blur, ImageSize};
///
/// let mut data = vec![0, 0, 255, 0, 0];
/// stack_blur(&mut data, ImageSize { width: 5, height: 1 }, 1).unwrap();
///
/// assert_eq!(data, vec![0, 63, 127, 63, 0]);
/// ```
pub fn stack_blur(data: &mut [u8], size: ImageSize, radius: usize) -> Result<(), StackBlurError> {
    stack_blur_with_strategy(data, size, 1, radius, ExecutionStrategy::Auto)
}

/// Blur an image with interleaved channels in place using the stack blur algorithm.
///
/// # Arguments
///
/// * `data` - The image buffer with shape (H, W, C), row-major.
/// * `size` - The size of the image.
/// * `channels` - The number of interleaved channels, each blurred independently.
/// * `radius` - The blur radius in `0..=254`.
/// * `strategy` - How the rows and columns are scheduled.
///
/// # Errors
///
/// Returns an error if the arguments are invalid; the buffer is then left untouched.
pub fn stack_blur_with_strategy(
    data: &mut [u8],
    size: ImageSize,
    channels: usize,
    radius: usize,
    strategy: ExecutionStrategy,
) -> Result<(), StackBlurError> {
    // the vertical pass reads the output of the horizontal one
    run_passes(
        data,
        size,
        channels,
        radius,
        strategy,
        &[Axis::Horizontal, Axis::Vertical],
    )
}

/// Blur every row of an image in place.
///
/// This is the first of the two passes run by [`stack_blur_with_strategy`].
///
/// # Errors
///
/// Returns an error if the arguments are invalid; the buffer is then left untouched.
pub fn stack_blur_horizontal(
    data: &mut [u8],
    size: ImageSize,
    channels: usize,
    radius: usize,
    strategy: ExecutionStrategy,
) -> Result<(), StackBlurError> {
    run_passes(data, size, channels, radius, strategy, &[Axis::Horizontal])
}

/// Blur every column of an image in place.
///
/// This is the second of the two passes run by [`stack_blur_with_strategy`].
///
/// # Errors
///
/// Returns an error if the arguments are invalid; the buffer is then left untouched.
pub fn stack_blur_vertical(
    data: &mut [u8],
    size: ImageSize,
    channels: usize,
    radius: usize,
    strategy: ExecutionStrategy,
) -> Result<(), StackBlurError> {
    run_passes(data, size, channels, radius, strategy, &[Axis::Vertical])
}
