//! Operand types shared by every dotv strategy.

use num_traits::Float;
use std::fmt::Debug;

/// Conjugation flag carried alongside each operand.
///
/// For the real element types handled here conjugation is the identity. The
/// flag is still threaded through so the reference kernel keeps the full
/// `conj(x) . conj(y)` argument shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Conj {
    #[default]
    NoConjugate,
    Conjugate,
}

impl Conj {
    pub fn is_conj(self) -> bool {
        self == Conj::Conjugate
    }

    /// Apply the flag to a real value (a no-op).
    #[inline(always)]
    pub fn apply<T: Float>(self, value: T) -> T {
        value
    }
}

/// Element types the reduction kernel is built for (`f32` and `f64`).
pub trait DotvElement: Float + Default + Debug + Send + Sync + 'static {
    /// Short precision tag used in variant names and logs.
    const NAME: &'static str;

    /// Reduce `n` strided element pairs with the default strategy for this precision.
    fn dotv(
        conjx: Conj,
        conjy: Conj,
        n: usize,
        x: &[Self],
        incx: isize,
        y: &[Self],
        incy: isize,
    ) -> Self;
}

/// Minimum slice length holding `n` logical elements at stride `inc`.
///
/// Saturates at `usize::MAX` when the span does not fit in memory, so no
/// slice can satisfy it.
#[inline]
pub fn required_len(n: usize, inc: isize) -> usize {
    if n == 0 {
        return 0;
    }
    (n - 1)
        .checked_mul(inc.unsigned_abs())
        .and_then(|span| span.checked_add(1))
        .unwrap_or(usize::MAX)
}

/// Slice index of logical element `i`.
///
/// Negative strides walk the slice backwards from its far end, so element 0
/// sits at `(n - 1) * |inc|`.
#[inline(always)]
pub fn strided_index(i: usize, n: usize, inc: isize) -> usize {
    if inc >= 0 {
        i * inc as usize
    } else {
        (n - 1 - i) * inc.unsigned_abs()
    }
}
