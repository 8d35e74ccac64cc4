use crate::error::StackBlurError;

/// Largest radius covered by the scaling tables.
pub const MAX_RADIUS: usize = 254;

/// Largest sliding window, `2 * MAX_RADIUS + 1` samples.
pub const MAX_WINDOW: usize = 2 * MAX_RADIUS + 1;

/// Fixed-point multipliers indexed by radius.
///
/// Together with [`STACK_BLUR_SHR`] they replace the division by `(radius + 1)^2`,
/// the total weight of the tent kernel, with a multiply and a shift.
#[rustfmt::skip]
pub const STACK_BLUR_MUL: [u16; MAX_RADIUS + 1] = [
    512, 512, 456, 512, 328, 456, 335, 512, 405, 328, 271, 456, 388, 335, 292, 512,
    454, 405, 364, 328, 298, 271, 496, 456, 420, 388, 360, 335, 312, 292, 273, 512,
    482, 454, 428, 405, 383, 364, 345, 328, 312, 298, 284, 271, 259, 496, 475, 456,
    437, 420, 404, 388, 374, 360, 347, 335, 323, 312, 302, 292, 282, 273, 265, 512,
    497, 482, 468, 454, 441, 428, 417, 405, 394, 383, 373, 364, 354, 345, 337, 328,
    320, 312, 305, 298, 291, 284, 278, 271, 265, 259, 507, 496, 485, 475, 465, 456,
    446, 437, 428, 420, 412, 404, 396, 388, 381, 374, 367, 360, 354, 347, 341, 335,
    329, 323, 318, 312, 307, 302, 297, 292, 287, 282, 278, 273, 269, 265, 261, 512,
    505, 497, 489, 482, 475, 468, 461, 454, 447, 441, 435, 428, 422, 417, 411, 405,
    399, 394, 389, 383, 378, 373, 368, 364, 359, 354, 350, 345, 341, 337, 332, 328,
    324, 320, 316, 312, 309, 305, 301, 298, 294, 291, 287, 284, 281, 278, 274, 271,
    268, 265, 262, 259, 257, 507, 501, 496, 491, 485, 480, 475, 470, 465, 460, 456,
    451, 446, 442, 437, 433, 428, 424, 420, 416, 412, 408, 404, 400, 396, 392, 388,
    385, 381, 377, 374, 370, 367, 363, 360, 357, 354, 350, 347, 344, 341, 338, 335,
    332, 329, 326, 323, 320, 318, 315, 312, 310, 307, 304, 302, 299, 297, 294, 292,
    289, 287, 285, 282, 280, 278, 275, 273, 271, 269, 267, 265, 263, 261, 259,
];

/// Right shifts indexed by radius, paired with [`STACK_BLUR_MUL`].
#[rustfmt::skip]
pub const STACK_BLUR_SHR: [u8; MAX_RADIUS + 1] = [
    9, 11, 12, 13, 13, 14, 14, 15, 15, 15, 15, 16, 16, 16, 16, 17,
    17, 17, 17, 17, 17, 17, 18, 18, 18, 18, 18, 18, 18, 18, 18, 19,
    19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 20, 20, 20,
    20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 21,
    21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21,
    21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 22, 22, 22, 22, 22, 22,
    22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22,
    22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 23,
    23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23,
    23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23,
    23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23,
    23, 23, 23, 23, 23, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
    24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
    24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
    24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
    24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
];

/// Multiply and shift pair normalizing a tent-weighted sum for one radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleFactor {
    /// Fixed-point multiplier.
    pub mul: u32,
    /// Right shift applied after the multiplication.
    pub shr: u32,
}

impl ScaleFactor {
    /// Look up the scale factor for a radius.
    ///
    /// # Arguments
    ///
    /// * `radius` - The blur radius, in `0..=MAX_RADIUS`.
    ///
    /// # Errors
    ///
    /// Returns [`StackBlurError::InvalidRadius`] if the radius is outside the tables.
    pub fn for_radius(radius: usize) -> Result<Self, StackBlurError> {
        match (STACK_BLUR_MUL.get(radius), STACK_BLUR_SHR.get(radius)) {
            (Some(&mul), Some(&shr)) => Ok(Self {
                mul: mul as u32,
                shr: shr as u32,
            }),
            _ => Err(StackBlurError::InvalidRadius(radius)),
        }
    }

    /// Normalize a tent-weighted sum back to a sample value.
    #[inline(always)]
    pub fn scale(&self, sum: u32) -> u8 {
        ((sum as u64 * self.mul as u64) >> self.shr).min(255) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries() -> Result<(), StackBlurError> {
        assert_eq!(ScaleFactor::for_radius(0)?, ScaleFactor { mul: 512, shr: 9 });
        assert_eq!(ScaleFactor::for_radius(1)?, ScaleFactor { mul: 512, shr: 11 });
        assert_eq!(ScaleFactor::for_radius(2)?, ScaleFactor { mul: 456, shr: 12 });
        assert_eq!(ScaleFactor::for_radius(15)?, ScaleFactor { mul: 512, shr: 17 });
        assert_eq!(ScaleFactor::for_radius(254)?, ScaleFactor { mul: 259, shr: 24 });
        Ok(())
    }

    #[test]
    fn test_invalid_radius() {
        assert_eq!(
            ScaleFactor::for_radius(MAX_RADIUS + 1),
            Err(StackBlurError::InvalidRadius(255))
        );
    }

    #[test]
    fn test_scale_is_division_by_weight_total() -> Result<(), StackBlurError> {
        // flat input: every weight sees the same value
        for radius in 0..=MAX_RADIUS {
            let factor = ScaleFactor::for_radius(radius)?;
            let weight_total = ((radius + 1) * (radius + 1)) as u32;
            for value in 0..=255u32 {
                assert_eq!(factor.scale(value * weight_total), value as u8);
            }
        }
        Ok(())
    }

    #[test]
    fn test_table_shape() {
        // multipliers are normalized into a 9-bit mantissa
        assert!(STACK_BLUR_MUL.iter().all(|&m| (257..=512).contains(&m)));
        assert!(STACK_BLUR_SHR.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(MAX_WINDOW, 509);
    }
}
