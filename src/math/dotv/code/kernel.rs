//! Vectorized dotv kernels.
//!
//! One driver, [`run`], is instantiated per strategy with a lane group, an
//! unroll factor and an alignment requirement:
//!
//! | strategy            | lanes | unroll | loads     |
//! |---------------------|-------|--------|-----------|
//! | `ddotv` 2x4         | 2     | 4      | aligned   |
//! | `ddotv` 4x2         | 4     | 2      | unaligned |
//! | `sdotv` 8x1         | 8     | 1      | unaligned |
//!
//! Partial sums accumulate in parallel lane groups and are folded at the
//! end, so results match [`dotv_reference`] up to rounding only.

use std::mem;

use log::trace;
use num_traits::Zero;

use super::error::{DotvError, Operand, Result};
use super::lanes::{accumulate, Double2, Double4, LaneGroup, Single8};
use super::original::dotv_reference;
use super::plan::{plan, DotvPlan};
use super::types::{required_len, Conj, DotvElement};

/// Double-precision vector strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DdotvStrategy {
    /// 128-bit registers, 2 lanes, 4 accumulators, aligned loads with a
    /// one-element prologue for operands sharing an 8-byte offset.
    Lanes2x4,
    /// 256-bit registers, 4 lanes, 2 accumulators, unaligned loads.
    Lanes4x2,
}

impl DdotvStrategy {
    pub const ALL: [DdotvStrategy; 2] = [DdotvStrategy::Lanes2x4, DdotvStrategy::Lanes4x2];

    pub fn name(self) -> &'static str {
        match self {
            DdotvStrategy::Lanes2x4 => "lanes2x4",
            DdotvStrategy::Lanes4x2 => "lanes4x2",
        }
    }

    pub fn lanes(self) -> usize {
        match self {
            DdotvStrategy::Lanes2x4 => Double2::LANES,
            DdotvStrategy::Lanes4x2 => Double4::LANES,
        }
    }

    pub fn unroll(self) -> usize {
        match self {
            DdotvStrategy::Lanes2x4 => 4,
            DdotvStrategy::Lanes4x2 => 2,
        }
    }

    /// Byte boundary both operands must share, if the strategy uses aligned loads.
    pub fn alignment(self) -> Option<usize> {
        match self {
            DdotvStrategy::Lanes2x4 => Some(Double2::LANES * mem::size_of::<f64>()),
            DdotvStrategy::Lanes4x2 => None,
        }
    }

    /// Plan a call without running it.
    pub fn plan(self, n: usize, x: &[f64], incx: isize, y: &[f64], incy: isize) -> DotvPlan {
        plan(n, x.as_ptr(), incx, y.as_ptr(), incy, self.alignment())
    }
}

impl Default for DdotvStrategy {
    fn default() -> Self {
        if cfg!(feature = "wide-ddotv") {
            DdotvStrategy::Lanes4x2
        } else {
            DdotvStrategy::Lanes2x4
        }
    }
}

/// Plan an `sdotv` call without running it.
pub fn sdotv_plan(n: usize, x: &[f32], incx: isize, y: &[f32], incy: isize) -> DotvPlan {
    plan(n, x.as_ptr(), incx, y.as_ptr(), incy, None)
}

/// Shared driver for every vector strategy.
///
/// # Panics
/// Panics if either slice is too short for `n` elements at its stride.
#[inline(always)]
pub(crate) fn run<G: LaneGroup, const U: usize, const ALIGNED: bool>(
    conjx: Conj,
    conjy: Conj,
    n: usize,
    x: &[G::Elem],
    incx: isize,
    y: &[G::Elem],
    incy: isize,
) -> G::Elem {
    let align = ALIGNED.then(|| G::LANES * mem::size_of::<G::Elem>());

    let prologue = match plan(n, x.as_ptr(), incx, y.as_ptr(), incy, align) {
        DotvPlan::Empty => return G::Elem::zero(),
        DotvPlan::Reference => {
            trace!(
                "{}dotv: falling back to reference kernel (n={}, incx={}, incy={})",
                <G::Elem as DotvElement>::NAME,
                n,
                incx,
                incy
            );
            return dotv_reference(conjx, conjy, n, x, incx, y, incy);
        }
        DotvPlan::Vector { prologue } => prologue,
    };

    assert!(x.len() >= n, "x holds {} elements, {} required", x.len(), n);
    assert!(y.len() >= n, "y holds {} elements, {} required", y.len(), n);

    let mut rho = G::Elem::zero();

    for i in 0..prologue {
        rho = rho + x[i] * y[i];
    }

    let step = G::LANES * U;
    let n_run = (n - prologue) / step;

    // SAFETY: both slices hold at least n elements and the loop reads
    // n_run * step <= n - prologue of them past the prologue. After the
    // prologue both pointers sit on the register boundary whenever ALIGNED.
    rho = rho
        + unsafe {
            accumulate::<G, U, ALIGNED>(n_run, x.as_ptr().add(prologue), y.as_ptr().add(prologue))
        };

    for i in (prologue + n_run * step)..n {
        rho = rho + x[i] * y[i];
    }

    rho
}

/// Double-precision dot product with the default strategy.
///
/// # Panics
/// Panics if either slice is too short for `n` elements at its stride.
///
/// # Example
/// ```
/// use micro_blas_core::math::dotv::{ddotv, Conj};
///
/// let x = [1.0; 9];
/// let y = [2.0; 9];
/// let rho = ddotv(Conj::NoConjugate, Conj::NoConjugate, 9, &x, 1, &y, 1);
/// assert_eq!(rho, 18.0);
/// ```
pub fn ddotv(
    conjx: Conj,
    conjy: Conj,
    n: usize,
    x: &[f64],
    incx: isize,
    y: &[f64],
    incy: isize,
) -> f64 {
    ddotv_with(DdotvStrategy::default(), conjx, conjy, n, x, incx, y, incy)
}

/// Double-precision dot product with an explicit strategy.
///
/// # Panics
/// Panics if either slice is too short for `n` elements at its stride.
#[allow(clippy::too_many_arguments)]
pub fn ddotv_with(
    strategy: DdotvStrategy,
    conjx: Conj,
    conjy: Conj,
    n: usize,
    x: &[f64],
    incx: isize,
    y: &[f64],
    incy: isize,
) -> f64 {
    match strategy {
        DdotvStrategy::Lanes2x4 => run::<Double2, 4, true>(conjx, conjy, n, x, incx, y, incy),
        DdotvStrategy::Lanes4x2 => run::<Double4, 2, false>(conjx, conjy, n, x, incx, y, incy),
    }
}

/// Single-precision dot product (8 lanes, no unrolling, unaligned loads).
///
/// # Panics
/// Panics if either slice is too short for `n` elements at its stride.
pub fn sdotv(
    conjx: Conj,
    conjy: Conj,
    n: usize,
    x: &[f32],
    incx: isize,
    y: &[f32],
    incy: isize,
) -> f32 {
    run::<Single8, 1, false>(conjx, conjy, n, x, incx, y, incy)
}

impl DotvElement for f64 {
    const NAME: &'static str = "d";

    #[inline]
    fn dotv(conjx: Conj, conjy: Conj, n: usize, x: &[f64], incx: isize, y: &[f64], incy: isize) -> f64 {
        ddotv(conjx, conjy, n, x, incx, y, incy)
    }
}

impl DotvElement for f32 {
    const NAME: &'static str = "s";

    #[inline]
    fn dotv(conjx: Conj, conjy: Conj, n: usize, x: &[f32], incx: isize, y: &[f32], incy: isize) -> f32 {
        sdotv(conjx, conjy, n, x, incx, y, incy)
    }
}

/// Generic dot product dispatching on the element type.
///
/// # Panics
/// Panics if either slice is too short for `n` elements at its stride.
#[inline]
pub fn dotv<T: DotvElement>(
    conjx: Conj,
    conjy: Conj,
    n: usize,
    x: &[T],
    incx: isize,
    y: &[T],
    incy: isize,
) -> T {
    T::dotv(conjx, conjy, n, x, incx, y, incy)
}

fn check_operand(operand: Operand, n: usize, len: usize, inc: isize) -> Result<()> {
    if n == 0 {
        return Ok(());
    }
    if inc == 0 {
        return Err(DotvError::ZeroStride { operand });
    }
    let required = required_len(n, inc);
    if len < required {
        return Err(DotvError::OutOfBounds {
            operand,
            required,
            len,
        });
    }
    Ok(())
}

/// Validating variant of [`dotv`] for callers outside the hot path.
///
/// Rejects zero strides and slices too short for their stride instead of
/// panicking.
pub fn try_dotv<T: DotvElement>(
    conjx: Conj,
    conjy: Conj,
    n: usize,
    x: &[T],
    incx: isize,
    y: &[T],
    incy: isize,
) -> Result<T> {
    check_operand(Operand::X, n, x.len(), incx)?;
    check_operand(Operand::Y, n, y.len(), incy)?;
    Ok(T::dotv(conjx, conjy, n, x, incx, y, incy))
}
