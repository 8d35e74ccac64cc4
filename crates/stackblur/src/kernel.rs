use crate::{
    image::ImageSize,
    parallel::{par_iter_rows_mut, par_transpose},
    tables::{ScaleFactor, MAX_WINDOW},
    StackBlurError,
};

/// Direction along which a blur pass slides its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Blur along rows, one line per row and channel.
    Horizontal,
    /// Blur along columns, one line per column and channel.
    Vertical,
}

/// Blur a single line of samples in place with a tent-weighted sliding window.
///
/// The line holds `len` samples, the first at `data[start]` and each following one `step`
/// elements further. Reads past either end of the line repeat the edge sample.
///
/// # Arguments
///
/// * `data` - The buffer containing the line.
/// * `start` - Offset of the first sample of the line.
/// * `step` - Distance between consecutive samples of the line.
/// * `len` - Number of samples in the line.
/// * `radius` - The blur radius in `0..=254`, the window spans `2 * radius + 1` samples.
///
/// # Errors
///
/// * [`StackBlurError::InvalidRadius`] if `radius > MAX_RADIUS`.
/// * [`StackBlurError::EmptyLine`] if `len` is zero.
/// * [`StackBlurError::BufferTooSmall`] if the last sample of the line is past the end of `data`.
///
/// The buffer is left untouched on error.
pub fn blur_line(
    data: &mut [u8],
    start: usize,
    step: usize,
    len: usize,
    radius: usize,
) -> Result<(), StackBlurError> {
    let factor = ScaleFactor::for_radius(radius)?;

    if len == 0 {
        return Err(StackBlurError::EmptyLine);
    }

    let expected = (len - 1)
        .checked_mul(step)
        .and_then(|offset| offset.checked_add(start))
        .and_then(|last| last.checked_add(1))
        .unwrap_or(usize::MAX);

    if data.len() < expected {
        return Err(StackBlurError::BufferTooSmall {
            expected,
            actual: data.len(),
        });
    }

    blur_line_unchecked(data, start, step, len, radius, factor);

    Ok(())
}

/// PRECONDITION: `len > 0`, `factor` belongs to `radius` and the line lies inside `data`.
fn blur_line_unchecked(
    data: &mut [u8],
    start: usize,
    step: usize,
    len: usize,
    radius: usize,
    factor: ScaleFactor,
) {
    let div = 2 * radius + 1;
    let last = len - 1;
    let at = |i: usize| start + i.min(last) * step;

    let mut stack = [0u8; MAX_WINDOW];
    let stack = &mut stack[..div];

    let mut sum = 0u32;
    let mut sum_in = 0u32;
    let mut sum_out = 0u32;

    // left half and centre: the first sample repeated
    let first = data[start] as u32;
    for (i, slot) in stack.iter_mut().take(radius + 1).enumerate() {
        *slot = first as u8;
        sum += first * (i as u32 + 1);
        sum_out += first;
    }

    // right half
    for i in 1..=radius {
        let val = data[at(i)];
        stack[i + radius] = val;
        sum += val as u32 * (radius + 1 - i) as u32;
        sum_in += val as u32;
    }

    let mut sp = radius;
    let mut xp = radius.min(last);

    for x in 0..len {
        data[start + x * step] = factor.scale(sum);

        sum -= sum_out;

        let mut stack_start = sp + div - radius;
        if stack_start >= div {
            stack_start -= div;
        }
        sum_out -= stack[stack_start] as u32;

        if xp < last {
            xp += 1;
        }

        // xp is ahead of x except on the last step, where the sample just written is
        // read back into a window that no later output uses
        let val = data[start + xp * step];
        stack[stack_start] = val;
        sum_in += val as u32;
        sum += sum_in;

        sp += 1;
        if sp >= div {
            sp = 0;
        }
        sum_out += stack[sp] as u32;
        sum_in -= stack[sp] as u32;
    }
}

/// Run one blur pass over every line of an image along `axis`.
///
/// Channels are interleaved and blurred independently of each other. The parallel path
/// runs on whichever Rayon pool the caller has installed.
///
/// # Arguments
///
/// * `data` - The image buffer with shape (H, W, C), exactly `H * W * C` samples.
/// * `size` - The size of the image.
/// * `channels` - The number of interleaved channels.
/// * `radius` - The blur radius.
/// * `factor` - The scale factor for `radius`.
/// * `axis` - The direction of the pass.
/// * `parallel` - Whether the lines are blurred in parallel.
///
/// PRECONDITION: the arguments have been validated by the caller in `ops`.
pub(crate) fn blur_pass(
    data: &mut [u8],
    size: ImageSize,
    channels: usize,
    radius: usize,
    factor: ScaleFactor,
    axis: Axis,
    parallel: bool,
) {
    log::trace!("stack blur {:?} pass over {}, radius {}", axis, size, radius);

    if parallel {
        blur_pass_parallel(data, size, channels, radius, axis, factor);
    } else {
        blur_pass_serial(data, size, channels, radius, axis, factor);
    }
}

fn blur_pass_serial(
    data: &mut [u8],
    size: ImageSize,
    channels: usize,
    radius: usize,
    axis: Axis,
    factor: ScaleFactor,
) {
    let row_stride = size.width * channels;
    match axis {
        Axis::Horizontal => {
            for y in 0..size.height {
                for ch in 0..channels {
                    let start = y * row_stride + ch;
                    blur_line_unchecked(data, start, channels, size.width, radius, factor);
                }
            }
        }
        Axis::Vertical => {
            for x in 0..size.width {
                for ch in 0..channels {
                    let start = x * channels + ch;
                    blur_line_unchecked(data, start, row_stride, size.height, radius, factor);
                }
            }
        }
    }
}

fn blur_pass_parallel(
    data: &mut [u8],
    size: ImageSize,
    channels: usize,
    radius: usize,
    axis: Axis,
    factor: ScaleFactor,
) {
    let blur_rows = |rows: &mut [u8], cols: usize| {
        par_iter_rows_mut(rows, cols * channels, |row| {
            for ch in 0..channels {
                blur_line_unchecked(row, ch, channels, cols, radius, factor);
            }
        });
    };

    match axis {
        Axis::Horizontal => blur_rows(data, size.width),
        Axis::Vertical => {
            // columns are strided, blur them as rows of the transposed image
            let mut transposed = vec![0u8; data.len()];
            par_transpose(data, &mut transposed, size.height, size.width, channels);
            blur_rows(&mut transposed, size.height);
            par_transpose(&transposed, data, size.width, size.height, channels);
        }
    }
}
