//! Stencil test state.
//!
//! Upstream passes paint the stencil buffer with a small set of region bits.
//! Compositing passes select a region by testing against those bits without
//! writing to the stencil buffer. The region tests are plain data in
//! [`StencilTestMode::test`], so a new region is a table entry.

/// Stencil value of pixels covered by scene shapes.
pub const STENCIL_SHAPE: u8 = 0;
/// Stencil bit set for background pixels.
pub const STENCIL_BACKGROUND: u8 = 1 << 0;
/// Stencil bit set for masked-out pixels (e.g. overlays that must stay clean).
pub const STENCIL_MASK: u8 = 1 << 1;

/// Comparison function for stencil (and depth) tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    /// Never passes.
    Never,
    /// Passes if reference < stored.
    Less,
    /// Passes if reference == stored.
    Equal,
    /// Passes if reference <= stored.
    LessEqual,
    /// Passes if reference > stored.
    Greater,
    /// Passes if reference != stored.
    NotEqual,
    /// Passes if reference >= stored.
    GreaterEqual,
    /// Always passes.
    #[default]
    Always,
}

impl CompareFunction {
    /// Evaluate the comparison.
    pub fn compare(self, reference: u8, stored: u8) -> bool {
        match self {
            Self::Never => false,
            Self::Less => reference < stored,
            Self::Equal => reference == stored,
            Self::LessEqual => reference <= stored,
            Self::Greater => reference > stored,
            Self::NotEqual => reference != stored,
            Self::GreaterEqual => reference >= stored,
            Self::Always => true,
        }
    }
}

/// Operation applied to the stored stencil value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOperation {
    /// Keep the stored value.
    #[default]
    Keep,
    /// Set the stored value to zero.
    Zero,
    /// Replace the stored value with the reference.
    Replace,
    /// Increment, clamping at the maximum.
    IncrementClamp,
    /// Decrement, clamping at zero.
    DecrementClamp,
    /// Bitwise invert.
    Invert,
}

/// A complete stencil test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilTest {
    /// Reference value compared against the stored value.
    pub reference: u8,
    /// Mask applied to both reference and stored value before comparing.
    pub read_mask: u8,
    /// Bits of the stored value that operations may modify.
    pub write_mask: u8,
    /// Comparison function.
    pub compare: CompareFunction,
    /// Operation when the stencil test fails.
    pub fail_op: StencilOperation,
    /// Operation when the stencil test passes but the depth test fails.
    pub depth_fail_op: StencilOperation,
    /// Operation when both tests pass.
    pub pass_op: StencilOperation,
}

impl StencilTest {
    /// A read-only test: compares and never modifies the stencil buffer.
    pub const fn read_only(reference: u8, read_mask: u8, compare: CompareFunction) -> Self {
        Self {
            reference,
            read_mask,
            write_mask: 0x00,
            compare,
            fail_op: StencilOperation::Keep,
            depth_fail_op: StencilOperation::Keep,
            pass_op: StencilOperation::Keep,
        }
    }

    /// Returns true if a pixel with the given stored value passes the test.
    pub fn passes(&self, stored: u8) -> bool {
        self.compare
            .compare(self.reference & self.read_mask, stored & self.read_mask)
    }

    /// Returns true if the test can never modify the stencil buffer.
    pub fn is_read_only(&self) -> bool {
        self.write_mask == 0
            || [self.fail_op, self.depth_fail_op, self.pass_op]
                .iter()
                .all(|op| *op == StencilOperation::Keep)
    }
}

/// Stencil regions a compositing pass can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilTestMode {
    /// Everything except masked-out pixels.
    Mask,
    /// Only pixels covered by shapes (not background, not masked).
    Shape,
    /// Only background pixels (not masked).
    Background,
}

impl StencilTestMode {
    /// All modes, in table order.
    pub const ALL: [StencilTestMode; 3] = [Self::Mask, Self::Shape, Self::Background];

    /// The stencil test for this region.
    pub const fn test(self) -> StencilTest {
        match self {
            Self::Mask => {
                StencilTest::read_only(STENCIL_MASK, STENCIL_MASK, CompareFunction::NotEqual)
            }
            Self::Shape => StencilTest::read_only(
                STENCIL_SHAPE,
                STENCIL_MASK | STENCIL_BACKGROUND,
                CompareFunction::Equal,
            ),
            Self::Background => StencilTest::read_only(
                STENCIL_BACKGROUND,
                STENCIL_MASK | STENCIL_BACKGROUND,
                CompareFunction::Equal,
            ),
        }
    }
}

impl From<StencilTestMode> for StencilTest {
    fn from(mode: StencilTestMode) -> Self {
        mode.test()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPE: u8 = STENCIL_SHAPE;
    const BACKGROUND: u8 = STENCIL_BACKGROUND;
    const MASKED: u8 = STENCIL_MASK;
    const MASKED_BACKGROUND: u8 = STENCIL_MASK | STENCIL_BACKGROUND;

    #[test]
    fn test_mask_mode_excludes_masked_pixels() {
        let test = StencilTestMode::Mask.test();
        assert!(test.passes(SHAPE));
        assert!(test.passes(BACKGROUND));
        assert!(!test.passes(MASKED));
        assert!(!test.passes(MASKED_BACKGROUND));
    }

    #[test]
    fn test_shape_mode_only_shapes() {
        let test = StencilTestMode::Shape.test();
        assert!(test.passes(SHAPE));
        assert!(!test.passes(BACKGROUND));
        assert!(!test.passes(MASKED));
    }

    #[test]
    fn test_background_mode_only_background() {
        let test = StencilTestMode::Background.test();
        assert!(test.passes(BACKGROUND));
        assert!(!test.passes(SHAPE));
        assert!(!test.passes(MASKED_BACKGROUND));
    }

    #[test]
    fn test_shape_and_background_partition_unmasked_pixels() {
        for stored in 0..=u8::MAX {
            let shape = StencilTestMode::Shape.test().passes(stored);
            let background = StencilTestMode::Background.test().passes(stored);
            assert!(!(shape && background), "overlap at stencil value {stored}");
            if stored & STENCIL_MASK == 0 {
                assert_eq!(
                    shape || background,
                    StencilTestMode::Mask.test().passes(stored),
                    "gap at stencil value {stored}"
                );
            }
        }
    }

    #[test]
    fn test_region_tests_are_read_only() {
        for mode in StencilTestMode::ALL {
            assert!(mode.test().is_read_only());
        }
    }

    #[test]
    fn test_compare_functions() {
        assert!(CompareFunction::Always.compare(1, 2));
        assert!(!CompareFunction::Never.compare(1, 1));
        assert!(CompareFunction::Less.compare(1, 2));
        assert!(CompareFunction::GreaterEqual.compare(2, 2));
    }
}
