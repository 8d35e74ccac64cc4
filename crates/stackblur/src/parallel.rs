use rayon::prelude::*;
use thiserror::Error;

/// Images with at least this many pixels are blurred in parallel by [`ExecutionStrategy::Auto`].
pub const PARALLEL_PIXEL_THRESHOLD: usize = 256 * 256;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the lines of a blur pass are scheduled.
///
/// Lines within a pass are independent, so every strategy produces the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run in parallel for large images and sequentially for small ones.
    ///
    /// The cut-off is [`PARALLEL_PIXEL_THRESHOLD`].
    #[default]
    Auto,

    /// Run sequentially on the current thread, mutating the buffer in place.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process lines in parallel.
    Parallel,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Whether an image with `num_pixels` pixels is processed in parallel.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Auto => num_pixels >= PARALLEL_PIXEL_THRESHOLD,
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel | ExecutionStrategy::Fixed(_) => true,
        }
    }

    /// Run `op` under this strategy.
    ///
    /// [`ExecutionStrategy::Fixed`] installs a local pool for the duration of `op`;
    /// every other strategy runs `op` directly, so Rayon calls inside it use the global pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the local thread pool cannot be built.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> Result<R, ParallelError> {
        match *self {
            ExecutionStrategy::Fixed(n) => {
                if n == 0 {
                    return Err(ParallelError::InvalidThreadCount(n));
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;
                Ok(pool.install(op))
            }
            _ => Ok(op()),
        }
    }
}

/// Apply a function to each contiguous row of a buffer in parallel.
///
/// # Arguments
///
/// * `data` - The buffer, split into rows of `row_len` elements.
/// * `row_len` - The number of elements per row.
/// * `f` - The function applied to every row.
pub fn par_iter_rows_mut<T: Send>(
    data: &mut [T],
    row_len: usize,
    f: impl Fn(&mut [T]) + Send + Sync,
) {
    data.par_chunks_exact_mut(row_len).for_each(f);
}

/// Transpose a row-major image of `rows x cols` pixels with `channels` interleaved samples.
///
/// Each destination row is filled independently, in parallel.
pub fn par_transpose<T: Copy + Send + Sync>(
    src: &[T],
    dst: &mut [T],
    rows: usize,
    cols: usize,
    channels: usize,
) {
    let row_stride = cols * channels;
    dst.par_chunks_exact_mut(rows * channels)
        .enumerate()
        .for_each(|(c, dst_row)| {
            dst_row
                .chunks_exact_mut(channels)
                .enumerate()
                .for_each(|(r, dst_pixel)| {
                    let offset = r * row_stride + c * channels;
                    dst_pixel.copy_from_slice(&src[offset..offset + channels]);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_parallel() {
        assert!(!ExecutionStrategy::Serial.is_parallel(usize::MAX));
        assert!(ExecutionStrategy::Parallel.is_parallel(1));
        assert!(ExecutionStrategy::Fixed(2).is_parallel(1));
        assert!(!ExecutionStrategy::Auto.is_parallel(PARALLEL_PIXEL_THRESHOLD - 1));
        assert!(ExecutionStrategy::Auto.is_parallel(PARALLEL_PIXEL_THRESHOLD));
    }

    #[test]
    fn test_install_fixed_success() -> Result<(), ParallelError> {
        let threads = ExecutionStrategy::Fixed(2).install(rayon::current_num_threads)?;
        assert_eq!(threads, 2);
        Ok(())
    }

    #[test]
    fn test_install_fixed_error() {
        let res = ExecutionStrategy::Fixed(0).install(|| ());
        assert!(matches!(res, Err(ParallelError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_par_iter_rows_mut() {
        let mut data = vec![1, 2, 3, 4, 5, 6];
        par_iter_rows_mut(&mut data, 3, |row| row.reverse());
        assert_eq!(data, vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_par_transpose() {
        #[rustfmt::skip]
        let src = [
            1, 10, 2, 20, 3, 30,
            4, 40, 5, 50, 6, 60,
        ];
        let mut dst = [0; 12];
        par_transpose(&src, &mut dst, 2, 3, 2);

        #[rustfmt::skip]
        assert_eq!(
            dst,
            [
                1, 10, 4, 40,
                2, 20, 5, 50,
                3, 30, 6, 60,
            ]
        );
    }
}
