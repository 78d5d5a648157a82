//! Reference (fallback) implementation of dotv.
//!
//! A plain strided accumulation in index order. It is the correctness
//! baseline for every vector strategy and the path taken whenever the fast
//! path preconditions (unit stride, compatible alignment) do not hold.

use super::types::{required_len, strided_index, Conj};
use num_traits::Float;

/// Compute `sum conj(x[i]) * conj(y[i])` over `n` strided elements.
///
/// # Arguments
/// * `conjx`, `conjy` - Conjugation flags (identity for real values)
/// * `n` - Logical vector length
/// * `x`, `incx` - First operand and its stride
/// * `y`, `incy` - Second operand and its stride
///
/// # Panics
/// Panics if either slice is too short for `n` elements at its stride.
///
/// # Example
/// ```
/// use micro_blas_core::math::dotv::{dotv_reference, Conj};
///
/// let x = [1.0, 2.0, 3.0];
/// let y = [4.0, 5.0, 6.0];
/// let rho = dotv_reference(Conj::NoConjugate, Conj::NoConjugate, 3, &x, 1, &y, 1);
/// assert!((rho - 32.0f64).abs() < 1e-12);
/// ```
pub fn dotv_reference<T: Float>(
    conjx: Conj,
    conjy: Conj,
    n: usize,
    x: &[T],
    incx: isize,
    y: &[T],
    incy: isize,
) -> T {
    let mut rho = T::zero();
    if n == 0 {
        return rho;
    }

    assert!(
        x.len() >= required_len(n, incx),
        "x holds {} elements, {} required",
        x.len(),
        required_len(n, incx)
    );
    assert!(
        y.len() >= required_len(n, incy),
        "y holds {} elements, {} required",
        y.len(),
        required_len(n, incy)
    );

    for i in 0..n {
        let x1c = conjx.apply(x[strided_index(i, n, incx)]);
        let y1c = conjy.apply(y[strided_index(i, n, incy)]);
        rho = rho + x1c * y1c;
    }

    rho
}
