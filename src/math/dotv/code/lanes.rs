//! Lane groups: register-width accumulators used by the vector loop.
//!
//! Every implementation reduces its lanes in index order (lane 0 first), so a
//! SIMD lane group and the portable [`Lanes`] of the same width produce
//! bit-identical kernel results.

use super::types::DotvElement;

/// A fixed-width group of lanes processed by one vector instruction.
pub trait LaneGroup: Copy {
    type Elem: DotvElement;

    /// Number of lanes in the group.
    const LANES: usize;

    fn zero() -> Self;

    /// Load `LANES` consecutive elements.
    ///
    /// # Safety
    /// `ptr` must be valid for `LANES` reads.
    unsafe fn load(ptr: *const Self::Elem) -> Self;

    /// Load `LANES` consecutive elements from a register-aligned address.
    ///
    /// # Safety
    /// `ptr` must be valid for `LANES` reads and aligned to
    /// `LANES * size_of::<Elem>()` bytes.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const Self::Elem) -> Self {
        Self::load(ptr)
    }

    /// `self + x * y`, rounded after the multiply and after the add.
    fn add_product(self, x: Self, y: Self) -> Self;

    /// Lane-wise sum of two groups.
    fn combine(self, other: Self) -> Self;

    /// Sum of all lanes, lane 0 first.
    fn horizontal_sum(self) -> Self::Elem;
}

/// Fold extracted lanes in index order.
#[inline(always)]
pub fn sum_lanes<T: DotvElement>(lanes: &[T]) -> T {
    lanes.iter().fold(T::zero(), |acc, &lane| acc + lane)
}

/// Portable array-backed lane group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

impl<T: DotvElement, const N: usize> LaneGroup for Lanes<T, N> {
    type Elem = T;
    const LANES: usize = N;

    #[inline(always)]
    fn zero() -> Self {
        Lanes([T::zero(); N])
    }

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        Lanes(std::ptr::read_unaligned(ptr as *const [T; N]))
    }

    #[inline(always)]
    fn add_product(self, x: Self, y: Self) -> Self {
        let mut out = self.0;
        for i in 0..N {
            out[i] = out[i] + x.0[i] * y.0[i];
        }
        Lanes(out)
    }

    #[inline(always)]
    fn combine(self, other: Self) -> Self {
        let mut out = self.0;
        for i in 0..N {
            out[i] = out[i] + other.0[i];
        }
        Lanes(out)
    }

    #[inline(always)]
    fn horizontal_sum(self) -> T {
        sum_lanes(&self.0)
    }
}

/// Two `f64` lanes: a 128-bit register.
#[cfg(target_arch = "x86_64")]
pub type Double2 = super::x86_64_sse2::F64x2;
#[cfg(not(target_arch = "x86_64"))]
pub type Double2 = Lanes<f64, 2>;

/// Four `f64` lanes: a 256-bit register.
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub type Double4 = super::x86_64_avx::F64x4;
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub type Double4 = Lanes<f64, 4>;

/// Eight `f32` lanes: a 256-bit register.
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub type Single8 = super::x86_64_avx::F32x8;
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub type Single8 = Lanes<f32, 8>;

/// Run the unrolled vector loop over `n_run` chunks of `G::LANES * U`
/// elements and return the horizontally reduced partial sum.
///
/// Each unrolled slot owns an independent accumulator. The slots are combined
/// in order (slot 0 first) only after the loop.
///
/// # Safety
/// `x` and `y` must be valid for `n_run * G::LANES * U` reads. When `ALIGNED`
/// is set both must also be aligned to the register width.
#[inline(always)]
pub unsafe fn accumulate<G: LaneGroup, const U: usize, const ALIGNED: bool>(
    n_run: usize,
    x: *const G::Elem,
    y: *const G::Elem,
) -> G::Elem {
    let step = G::LANES * U;
    let mut acc = [G::zero(); U];

    for i in 0..n_run {
        let x1 = x.add(i * step);
        let y1 = y.add(i * step);
        for (u, slot) in acc.iter_mut().enumerate() {
            let offset = u * G::LANES;
            let (xv, yv) = if ALIGNED {
                (G::load_aligned(x1.add(offset)), G::load_aligned(y1.add(offset)))
            } else {
                (G::load(x1.add(offset)), G::load(y1.add(offset)))
            };
            *slot = slot.add_product(xv, yv);
        }
    }

    let mut total = acc[0];
    for slot in &acc[1..] {
        total = total.combine(*slot);
    }
    total.horizontal_sum()
}
