//! Tests for the dotv kernels.

#[cfg(test)]
mod tests {
    use crate::math::dotv::code::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const NC: Conj = Conj::NoConjugate;

    fn random_f64(rng: &mut StdRng, len: usize) -> Vec<f64> {
        (0..len).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    fn random_f32(rng: &mut StdRng, len: usize) -> Vec<f32> {
        (0..len).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    fn assert_close<T: DotvElement>(got: T, expected: T, x: &[T], y: &[T], tol: f64, msg: &str) {
        let scale = x
            .iter()
            .zip(y)
            .map(|(a, b)| (*a * *b).abs().to_f64().unwrap())
            .sum::<f64>()
            .max(f64::MIN_POSITIVE);
        let diff = (got - expected).abs().to_f64().unwrap();
        assert!(
            diff <= tol * scale,
            "{}: expected {:?}, got {:?}, diff = {}",
            msg,
            expected,
            got,
            diff
        );
    }

    /// Scalar replay of the vector kernel's summation order.
    fn lane_order_sum<T: DotvElement>(x: &[T], y: &[T], lanes: usize, unroll: usize, prologue: usize) -> T {
        let n = x.len();
        let mut rho = T::zero();
        for i in 0..prologue {
            rho = rho + x[i] * y[i];
        }

        let step = lanes * unroll;
        let n_run = (n - prologue) / step;
        let mut acc = vec![vec![T::zero(); lanes]; unroll];
        for r in 0..n_run {
            for (u, slot) in acc.iter_mut().enumerate() {
                for (l, lane) in slot.iter_mut().enumerate() {
                    let i = prologue + r * step + u * lanes + l;
                    *lane = *lane + x[i] * y[i];
                }
            }
        }

        let mut total = acc[0].clone();
        for slot in &acc[1..] {
            for (t, v) in total.iter_mut().zip(slot) {
                *t = *t + *v;
            }
        }
        rho = rho + total.iter().fold(T::zero(), |a, &v| a + v);

        for i in (prologue + n_run * step)..n {
            rho = rho + x[i] * y[i];
        }
        rho
    }

    /// Offset into `buf` whose address is (mis)aligned to 16 bytes.
    fn offset_16(buf: &[f64], misaligned: bool) -> usize {
        let base = misalignment(buf.as_ptr(), 16);
        if misaligned {
            1 - base
        } else {
            base
        }
    }

    #[test]
    fn test_reference_basic() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [5.0, 6.0, 7.0, 8.0];
        // 1*5 + 2*6 + 3*7 + 4*8 = 70
        let rho: f64 = dotv_reference(NC, NC, 4, &x, 1, &y, 1);
        assert_eq!(rho, 70.0);
    }

    #[test]
    fn test_reference_conjugation_is_identity_for_reals() {
        let x = [1.5f32, -2.0, 3.0];
        let y = [2.0f32, 4.0, -1.0];
        let plain = dotv_reference(NC, NC, 3, &x, 1, &y, 1);
        let conj = dotv_reference(Conj::Conjugate, Conj::Conjugate, 3, &x, 1, &y, 1);
        assert_eq!(plain.to_bits(), conj.to_bits());
        assert!(Conj::Conjugate.is_conj());
        assert!(!Conj::default().is_conj());
    }

    #[test]
    fn test_empty_returns_zero() {
        let empty: [f64; 0] = [];
        let some = [3.0f64, 4.0];
        for strategy in DdotvStrategy::ALL {
            assert_eq!(ddotv_with(strategy, NC, NC, 0, &empty, 1, &empty, 1), 0.0);
            assert_eq!(ddotv_with(strategy, NC, NC, 0, &some, 5, &some, -3), 0.0);
            assert_eq!(
                strategy.plan(0, &some, 1, &some, 1),
                DotvPlan::Empty,
                "{}",
                strategy.name()
            );
        }
        let empty32: [f32; 0] = [];
        assert_eq!(sdotv(NC, NC, 0, &empty32, 1, &empty32, 1), 0.0);
        assert_eq!(sdotv_plan(0, &empty32, 2, &empty32, 2), DotvPlan::Empty);
    }

    #[test]
    fn test_nine_ones_times_twos() {
        let x64 = [1.0f64; 9];
        let y64 = [2.0f64; 9];
        for strategy in DdotvStrategy::ALL {
            assert_eq!(ddotv_with(strategy, NC, NC, 9, &x64, 1, &y64, 1), 18.0);
        }

        let x32 = [1.0f32; 9];
        let y32 = [2.0f32; 9];
        assert_eq!(sdotv(NC, NC, 9, &x32, 1, &y32, 1), 18.0);

        // Same scenario with both operands one element off the boundary.
        let xb = vec![1.0f64; 10];
        let yb = vec![2.0f64; 10];
        let (xo, yo) = (offset_16(&xb, true), offset_16(&yb, true));
        let (xs, ys) = (&xb[xo..xo + 9], &yb[yo..yo + 9]);
        assert_eq!(
            DdotvStrategy::Lanes2x4.plan(9, xs, 1, ys, 1),
            DotvPlan::Vector { prologue: 1 }
        );
        assert_eq!(ddotv_with(DdotvStrategy::Lanes2x4, NC, NC, 9, xs, 1, ys, 1), 18.0);
    }

    #[test]
    fn test_ddotv_matches_reference_all_short_lengths() {
        let mut rng = StdRng::seed_from_u64(0xd07);
        for strategy in DdotvStrategy::ALL {
            let limit = 2 * strategy.lanes() * strategy.unroll();
            let lengths = (0..=limit).chain([255, 1000, 4099]);
            for n in lengths {
                let x = random_f64(&mut rng, n);
                let y = random_f64(&mut rng, n);
                let expected = dotv_reference(NC, NC, n, &x, 1, &y, 1);
                let got = ddotv_with(strategy, NC, NC, n, &x, 1, &y, 1);
                assert_close(got, expected, &x, &y, 1e-12, &format!("{} n={}", strategy.name(), n));
            }
        }
    }

    #[test]
    fn test_sdotv_matches_reference_all_short_lengths() {
        let mut rng = StdRng::seed_from_u64(0x5d07);
        for n in (0..=16).chain([255, 1000, 4099]) {
            let x = random_f32(&mut rng, n);
            let y = random_f32(&mut rng, n);
            let expected = dotv_reference(NC, NC, n, &x, 1, &y, 1);
            let got = sdotv(NC, NC, n, &x, 1, &y, 1);
            assert_close(got, expected, &x, &y, 1e-6, &format!("sdotv n={}", n));
        }
    }

    #[test]
    fn test_integer_inputs_are_exact() {
        // Small integers keep every product and partial sum exact in both precisions.
        let mut rng = StdRng::seed_from_u64(11);
        for n in [3usize, 8, 9, 16, 17, 31, 1024, 4095] {
            let xi: Vec<i32> = (0..n).map(|_| rng.random_range(-4..=4)).collect();
            let yi: Vec<i32> = (0..n).map(|_| rng.random_range(-4..=4)).collect();
            let exact: i32 = xi.iter().zip(&yi).map(|(a, b)| a * b).sum();

            let x64: Vec<f64> = xi.iter().map(|&v| v as f64).collect();
            let y64: Vec<f64> = yi.iter().map(|&v| v as f64).collect();
            for strategy in DdotvStrategy::ALL {
                assert_eq!(ddotv_with(strategy, NC, NC, n, &x64, 1, &y64, 1), exact as f64);
            }

            let x32: Vec<f32> = xi.iter().map(|&v| v as f32).collect();
            let y32: Vec<f32> = yi.iter().map(|&v| v as f32).collect();
            assert_eq!(sdotv(NC, NC, n, &x32, 1, &y32, 1), exact as f32);
        }
    }

    #[test]
    fn test_non_unit_stride_never_vectorizes() {
        // Contiguous reads would pick up the 1000s.
        let n = 17;
        let x: Vec<f64> = (0..2 * n).map(|i| if i % 2 == 0 { 1.0 } else { 1000.0 }).collect();
        let y: Vec<f64> = (0..3 * n).map(|i| if i % 3 == 0 { 2.0 } else { -1000.0 }).collect();

        for strategy in DdotvStrategy::ALL {
            assert_eq!(strategy.plan(n, &x, 2, &y, 3), DotvPlan::Reference);
            assert_eq!(strategy.plan(n, &x, 1, &y, 3), DotvPlan::Reference);
            let got = ddotv_with(strategy, NC, NC, n, &x, 2, &y, 3);
            let expected = dotv_reference(NC, NC, n, &x, 2, &y, 3);
            assert_eq!(got.to_bits(), expected.to_bits());
            assert_eq!(got, 2.0 * n as f64);
        }

        let x32: Vec<f32> = x.iter().map(|&v| v as f32).collect();
        assert_eq!(sdotv_plan(n, &x32, 2, &x32, 2), DotvPlan::Reference);
        assert_eq!(sdotv(NC, NC, n, &x32, 2, &x32, 2), n as f32);
    }

    #[test]
    fn test_negative_strides_walk_backwards() {
        let x = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0f64, 20.0, 30.0, 40.0, 50.0];
        // x logical order with incx = -1: 5, 4, 3, 2, 1.
        let rho = ddotv(NC, NC, 5, &x, -1, &y, 1);
        assert_eq!(rho, 5.0 * 10.0 + 4.0 * 20.0 + 3.0 * 30.0 + 2.0 * 40.0 + 50.0);

        // incx = -2 over 3 elements: indices 4, 2, 0.
        let rho = ddotv(NC, NC, 3, &x, -2, &y, 1);
        assert_eq!(rho, 5.0 * 10.0 + 3.0 * 20.0 + 1.0 * 30.0);

        // Reversing both operands reverses nothing in the product pairs.
        let both = dotv_reference(NC, NC, 5, &x, -1, &y, -1);
        assert_eq!(both, 550.0);
    }

    #[test]
    fn test_alignment_classes_lanes2x4() {
        let mut rng = StdRng::seed_from_u64(0xa11);
        for n in [1usize, 2, 8, 9, 10, 17, 33, 1001] {
            let xb = random_f64(&mut rng, n + 1);
            let yb = random_f64(&mut rng, n + 1);

            for (x_mis, y_mis) in [(false, false), (true, true), (false, true), (true, false)] {
                let xo = offset_16(&xb, x_mis);
                let yo = offset_16(&yb, y_mis);
                let (x, y) = (&xb[xo..xo + n], &yb[yo..yo + n]);
                assert_eq!(misalignment(x.as_ptr(), 16), x_mis as usize);
                assert_eq!(misalignment(y.as_ptr(), 16), y_mis as usize);

                let plan = DdotvStrategy::Lanes2x4.plan(n, x, 1, y, 1);
                let got = ddotv_with(DdotvStrategy::Lanes2x4, NC, NC, n, x, 1, y, 1);

                match (x_mis, y_mis) {
                    (false, false) => {
                        assert_eq!(plan, DotvPlan::Vector { prologue: 0 });
                        assert_eq!(got.to_bits(), lane_order_sum(x, y, 2, 4, 0).to_bits());
                    }
                    (true, true) => {
                        assert_eq!(plan, DotvPlan::Vector { prologue: 1 });
                        assert_eq!(got.to_bits(), lane_order_sum(x, y, 2, 4, 1).to_bits());
                    }
                    _ => {
                        assert_eq!(plan, DotvPlan::Reference, "n={} x_mis={} y_mis={}", n, x_mis, y_mis);
                        let expected = dotv_reference(NC, NC, n, x, 1, y, 1);
                        assert_eq!(got.to_bits(), expected.to_bits());
                    }
                }
            }
        }
    }

    #[test]
    fn test_unaligned_strategies_ignore_alignment() {
        let xb = vec![0.5f64; 12];
        let yb = vec![0.25f64; 12];
        let xo = offset_16(&xb, false);
        let yo = offset_16(&yb, true);
        let (x, y) = (&xb[xo..xo + 11], &yb[yo..yo + 11]);
        assert_eq!(
            DdotvStrategy::Lanes4x2.plan(11, x, 1, y, 1),
            DotvPlan::Vector { prologue: 0 }
        );
        assert_eq!(DdotvStrategy::Lanes4x2.alignment(), None);
        assert_eq!(DdotvStrategy::Lanes2x4.alignment(), Some(16));

        let xs = [1.0f32; 11];
        assert_eq!(sdotv_plan(10, &xs[1..], 1, &xs[..10], 1), DotvPlan::Vector { prologue: 0 });
    }

    #[test]
    fn test_summation_order_lanes4x2_and_sdotv() {
        let mut rng = StdRng::seed_from_u64(0x0bde);
        for n in [7usize, 8, 16, 23, 64, 129] {
            let x = random_f64(&mut rng, n);
            let y = random_f64(&mut rng, n);
            let got = ddotv_with(DdotvStrategy::Lanes4x2, NC, NC, n, &x, 1, &y, 1);
            assert_eq!(got.to_bits(), lane_order_sum(&x, &y, 4, 2, 0).to_bits(), "n={}", n);

            let xs = random_f32(&mut rng, n);
            let ys = random_f32(&mut rng, n);
            let got = sdotv(NC, NC, n, &xs, 1, &ys, 1);
            assert_eq!(got.to_bits(), lane_order_sum(&xs, &ys, 8, 1, 0).to_bits(), "n={}", n);
        }
    }

    #[test]
    fn test_vector_order_differs_from_sequential() {
        // 1e17 swallows each 1.0 when added one at a time, but lane 0 holds
        // both large values apart from the 1.0s until the final fold.
        let x = [1e17f64, 1.0, 1.0, 1.0, -1e17, 0.0, 0.0, 0.0];
        let y = [1.0f64; 8];
        let sequential = dotv_reference(NC, NC, 8, &x, 1, &y, 1);
        let vectorized = ddotv_with(DdotvStrategy::Lanes4x2, NC, NC, 8, &x, 1, &y, 1);
        assert_eq!(sequential, 0.0);
        assert_eq!(vectorized, 3.0);
        assert_eq!(vectorized, lane_order_sum(&x, &y, 4, 2, 0));
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_sse2_lanes_match_portable_lanes() {
        use crate::math::dotv::code::run;

        let mut rng = StdRng::seed_from_u64(0x55e2);
        let xb = random_f64(&mut rng, 1025);
        let yb = random_f64(&mut rng, 1025);
        for start in [0usize, 1] {
            for n in [0usize, 1, 9, 15, 16, 1024] {
                let (x, y) = (&xb[start..start + n], &yb[start..start + n]);
                let simd = run::<Double2, 4, true>(NC, NC, n, x, 1, y, 1);
                let portable = run::<Lanes<f64, 2>, 4, true>(NC, NC, n, x, 1, y, 1);
                assert_eq!(simd.to_bits(), portable.to_bits(), "start={} n={}", start, n);
            }
        }
    }

    #[test]
    fn test_wide_lanes_match_portable_lanes() {
        use crate::math::dotv::code::run;

        let mut rng = StdRng::seed_from_u64(0xa7c);
        let x = random_f64(&mut rng, 301);
        let y = random_f64(&mut rng, 301);
        let native = run::<Double4, 2, false>(NC, NC, 301, &x, 1, &y, 1);
        let portable = run::<Lanes<f64, 4>, 2, false>(NC, NC, 301, &x, 1, &y, 1);
        assert_eq!(native.to_bits(), portable.to_bits());

        let xs = random_f32(&mut rng, 301);
        let ys = random_f32(&mut rng, 301);
        let native = run::<Single8, 1, false>(NC, NC, 301, &xs, 1, &ys, 1);
        let portable = run::<Lanes<f32, 8>, 1, false>(NC, NC, 301, &xs, 1, &ys, 1);
        assert_eq!(native.to_bits(), portable.to_bits());
    }

    #[test]
    fn test_lane_group_horizontal_sum_order() {
        let lanes = Lanes([1.0f64, 2.0, 3.0, 4.0]);
        assert_eq!(lanes.horizontal_sum(), 10.0);
        let acc = Lanes::<f64, 4>::zero().add_product(lanes, Lanes([2.0; 4]));
        assert_eq!(acc.0, [2.0, 4.0, 6.0, 8.0]);
        assert_eq!(acc.combine(lanes).0, [3.0, 6.0, 9.0, 12.0]);
    }

    #[test]
    fn test_generic_dotv_dispatch() {
        let x = [1.0f64, 2.0, 3.0];
        let y = [1.0f64, 1.0, 1.0];
        assert_eq!(dotv(NC, NC, 3, &x, 1, &y, 1), 6.0);
        let xs = [1.0f32, 2.0, 3.0];
        assert_eq!(dotv(NC, NC, 3, &xs, 1, &xs, 1), 14.0);
        assert_eq!(<f64 as DotvElement>::NAME, "d");
        assert_eq!(<f32 as DotvElement>::NAME, "s");
    }

    #[test]
    fn test_try_dotv_validates() {
        let x = [1.0f64; 5];
        let y = [2.0f64; 5];
        assert_eq!(try_dotv(NC, NC, 5, &x, 1, &y, 1), Ok(10.0));
        assert_eq!(try_dotv(NC, NC, 3, &x, 2, &y, -2), Ok(6.0));
        assert_eq!(
            try_dotv(NC, NC, 3, &x, 0, &y, 1),
            Err(DotvError::ZeroStride { operand: Operand::X })
        );
        assert_eq!(
            try_dotv(NC, NC, 4, &x, 1, &y, 2),
            Err(DotvError::OutOfBounds {
                operand: Operand::Y,
                required: 7,
                len: 5
            })
        );
        // Nothing is read for an empty reduction.
        assert_eq!(try_dotv::<f64>(NC, NC, 0, &[], 0, &[], 0), Ok(0.0));

        let err = try_dotv(NC, NC, 6, &x, 1, &y, 1).unwrap_err();
        assert_eq!(err.to_string(), "operand x needs 6 elements but holds 5");
    }

    #[test]
    fn test_try_dotv_rejects_overflowing_stride() {
        let x = [1.0f64; 4];
        let y = [1.0f64; 4];
        assert_eq!(
            try_dotv(NC, NC, 3, &x, isize::MIN, &y, 1),
            Err(DotvError::OutOfBounds {
                operand: Operand::X,
                required: usize::MAX,
                len: 4
            })
        );
        assert_eq!(
            try_dotv(NC, NC, 3, &x, 1, &y, isize::MAX),
            Err(DotvError::OutOfBounds {
                operand: Operand::Y,
                required: usize::MAX,
                len: 4
            })
        );
        // A single element never steps, whatever the stride.
        assert_eq!(try_dotv(NC, NC, 1, &x, isize::MIN, &y, isize::MAX), Ok(1.0));
    }

    #[test]
    #[should_panic(expected = "x holds")]
    fn test_short_slice_panics() {
        let x = [1.0f64; 4];
        let y = [1.0f64; 8];
        ddotv(NC, NC, 8, &x, 1, &y, 1);
    }

    #[test]
    fn test_stride_helpers() {
        assert_eq!(required_len(0, 3), 0);
        assert_eq!(required_len(4, 1), 4);
        assert_eq!(required_len(4, -3), 10);
        assert_eq!(required_len(3, isize::MIN), usize::MAX);
        assert_eq!(required_len(1, isize::MIN), 1);
        assert_eq!(strided_index(0, 4, 3), 0);
        assert_eq!(strided_index(3, 4, 3), 9);
        assert_eq!(strided_index(0, 4, -3), 9);
        assert_eq!(strided_index(3, 4, -3), 0);
    }

    #[test]
    fn test_default_strategy() {
        let expected = if cfg!(feature = "wide-ddotv") {
            DdotvStrategy::Lanes4x2
        } else {
            DdotvStrategy::Lanes2x4
        };
        assert_eq!(DdotvStrategy::default(), expected);
        assert_eq!(DdotvStrategy::Lanes2x4.lanes() * DdotvStrategy::Lanes2x4.unroll(), 8);
        assert_eq!(DdotvStrategy::Lanes4x2.lanes() * DdotvStrategy::Lanes4x2.unroll(), 8);
    }
}
