use num_traits::{AsPrimitive, NumCast, PrimInt, Unsigned};

/// Trait for types which can act as indices within an array (or an array-like structure).
///
/// Implemented for every unsigned primitive integer, so index buffers can be emitted as `u8`,
/// `u16`, `u32`, `u64`, or `usize` as a consumer sees fit.
pub trait ArrayIndex:
    PrimInt
    + Unsigned
    + AsPrimitive<usize>
    + std::fmt::Debug
    + std::fmt::Display
    + std::hash::Hash
    + Send
    + Sync
    + 'static
{
    /// Convert an array position into this index type, or `None` if it does not fit.
    #[inline]
    fn from_position(pos: usize) -> Option<Self> {
        <Self as NumCast>::from(pos)
    }

    /// Widen this index back into an array position.
    #[inline]
    fn position(self) -> usize {
        self.as_()
    }

    /// Name of the underlying primitive, for diagnostics.
    #[inline]
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<P> ArrayIndex for P where
    P: PrimInt
        + Unsigned
        + AsPrimitive<usize>
        + std::fmt::Debug
        + std::fmt::Display
        + std::hash::Hash
        + Send
        + Sync
        + 'static
{
}
