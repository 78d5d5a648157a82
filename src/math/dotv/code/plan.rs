//! Strategy selection for a single dotv call.

use std::mem;

/// What a dotv call will do, decided before touching any element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotvPlan {
    /// `n == 0`: the result is zero.
    Empty,
    /// Delegate to the reference kernel.
    Reference,
    /// Run the vector loop after consuming `prologue` scalar elements.
    Vector { prologue: usize },
}

/// Number of elements `ptr` sits past the previous `align`-byte boundary.
#[inline(always)]
pub fn misalignment<T>(ptr: *const T, align: usize) -> usize {
    (ptr as usize % align) / mem::size_of::<T>()
}

/// Decide how to reduce `n` elements of `x` and `y`.
///
/// `align` is the register boundary in bytes required by aligned vector
/// loads, or `None` for strategies built on unaligned loads.
///
/// With alignment in play the operands must share one alignment class: both
/// on the boundary, or both the same number of elements past it, in which
/// case the prologue walks them onto the boundary together. Any mismatch
/// falls back to the reference kernel.
pub fn plan<T>(
    n: usize,
    x: *const T,
    incx: isize,
    y: *const T,
    incy: isize,
    align: Option<usize>,
) -> DotvPlan {
    if n == 0 {
        return DotvPlan::Empty;
    }

    if incx != 1 || incy != 1 {
        return DotvPlan::Reference;
    }

    let Some(align) = align else {
        return DotvPlan::Vector { prologue: 0 };
    };

    let per_boundary = (align / mem::size_of::<T>()).max(1);
    match (misalignment(x, align), misalignment(y, align)) {
        (0, 0) => DotvPlan::Vector { prologue: 0 },
        (mx, my) if mx == my => DotvPlan::Vector {
            prologue: (per_boundary - mx).min(n),
        },
        _ => DotvPlan::Reference,
    }
}
