#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the stack blur operations.
pub mod error;

/// image geometry types.
pub mod image;

/// sliding window kernel shared by both passes.
pub mod kernel;

/// two-pass stack blur entry points.
pub mod ops;

/// module containing parallization utilities.
pub mod parallel;

/// fixed-point scaling tables.
pub mod tables;

pub use crate::error::StackBlurError;
pub use crate::image::ImageSize;
pub use crate::kernel::Axis;
pub use crate::ops::{
    stack_blur, stack_blur_horizontal, stack_blur_vertical, stack_blur_with_strategy,
};
pub use crate::parallel::ExecutionStrategy;
