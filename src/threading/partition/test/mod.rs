use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use super::code::*;

fn owned_by(n: usize, thread: &ThreadInfo) -> Vec<usize> {
    (0..n).filter(|&i| owns(i, thread)).collect()
}

#[test]
fn test_three_way_split() {
    let expected = [vec![0, 3, 6], vec![1, 4, 7], vec![2, 5, 8]];
    for (work_id, want) in expected.iter().enumerate() {
        let thread = ThreadInfo::new(work_id, 3).unwrap();
        assert_eq!(&owned_by(9, &thread), want, "work_id {}", work_id);
    }
}

#[test]
fn test_exactly_one_owner() {
    for n_way in [1usize, 2, 3, 4, 8] {
        let threads: Vec<ThreadInfo> = (0..n_way)
            .map(|w| ThreadInfo::new(w, n_way).unwrap())
            .collect();
        for index in 0..4 * n_way {
            let owners = threads.iter().filter(|t| owns(index, t)).count();
            assert_eq!(owners, 1, "index {} with n_way {}", index, n_way);
        }
    }
}

#[test]
fn test_single_thread_owns_everything() {
    let thread = ThreadInfo::single();
    assert!((0..100).all(|i| owns(i, &thread)));
    assert_eq!(ThreadInfo::default(), thread);
    assert_eq!(thread.depth(), 1);
}

#[test]
fn test_axes_share_one_rule() {
    for n_way in [1usize, 3, 8] {
        for work_id in 0..n_way {
            let thread = ThreadInfo::new(work_id, n_way).unwrap();
            for index in 0..5 * n_way {
                let base = owns(index, &thread);
                for axis in LoopAxis::ALL {
                    assert_eq!(my_iter(axis, index, &thread), base, "{}", axis.name());
                }
            }
        }
    }
}

#[test]
fn test_owned_matches_owns() {
    let ranges = [0..0, 0..1, 0..17, 5..5, 5..23, 7..8, 100..131];
    for n_way in [1usize, 2, 3, 4, 8] {
        for work_id in 0..n_way {
            let thread = ThreadInfo::new(work_id, n_way).unwrap();
            for range in ranges.iter().cloned() {
                let by_filter: Vec<usize> = range.clone().filter(|&i| owns(i, &thread)).collect();
                let by_step: Vec<usize> = thread.owned(range.clone()).collect();
                assert_eq!(by_step, by_filter, "range {:?}, thread {}/{}", range, work_id, n_way);
            }
        }
    }
}

#[test]
fn test_owned_near_usize_max() {
    // The first owned index would lie past usize::MAX.
    let thread = ThreadInfo::new(0, 4).unwrap();
    let start = usize::MAX - 2;
    let by_step: Vec<usize> = thread.owned(start..usize::MAX).collect();
    let by_filter: Vec<usize> = (start..usize::MAX).filter(|&i| owns(i, &thread)).collect();
    assert_eq!(by_step, by_filter);
}

#[test]
fn test_constructor_rejects_invalid() {
    assert_eq!(ThreadInfo::new(0, 0), Err(PartitionError::EmptyGroup));
    assert_eq!(
        ThreadInfo::new(4, 4),
        Err(PartitionError::WorkIdOutOfRange { work_id: 4, n_way: 4 })
    );

    let parent = ThreadInfo::new(0, 2).unwrap();
    let wide = ThreadInfo::new(0, 4).unwrap();
    assert_eq!(
        parent.with_child(SubOp::PackA, wide),
        Err(PartitionError::ChildWiderThanParent { child: 4, parent: 2 })
    );
}

#[test]
fn test_children_navigation() {
    let root = ThreadInfo::new(5, 8)
        .unwrap()
        .with_child(SubOp::Sub, ThreadInfo::new(1, 4).unwrap())
        .unwrap()
        .with_child(SubOp::PackB, ThreadInfo::new(1, 2).unwrap())
        .unwrap();

    assert_eq!(root.sub_self().map(|t| (t.work_id(), t.n_way())), Some((1, 4)));
    assert_eq!(root.pack_a(), None);
    assert_eq!(root.pack_b().map(ThreadInfo::n_way), Some(2));
    for op in SubOp::ALL {
        let direct = match op {
            SubOp::Sub => root.sub_self(),
            SubOp::PackA => root.pack_a(),
            SubOp::PackB => root.pack_b(),
        };
        assert_eq!(root.child(op), direct);
    }
    assert_eq!(root.depth(), 2);

    // Re-attaching replaces the previous child.
    let root = root
        .with_child(SubOp::Sub, ThreadInfo::new(0, 1).unwrap())
        .unwrap();
    assert_eq!(root.sub_self().map(ThreadInfo::n_way), Some(1));
}

#[test]
fn test_create_paths_levels() {
    let paths = create_paths(8, &[2, 2]).unwrap();
    assert_eq!(paths.len(), 8);

    for (t, root) in paths.iter().enumerate() {
        assert_eq!((root.work_id(), root.n_way()), (t, 8));
        assert_eq!(root.depth(), 3);
        assert_eq!(root.pack_a().map(|p| (p.work_id(), p.n_way())), Some((t, 8)));
        assert_eq!(root.pack_b().map(|p| (p.work_id(), p.n_way())), Some((t, 8)));

        let mid = root.sub_self().unwrap();
        assert_eq!((mid.work_id(), mid.n_way()), (t % 4, 4));
        assert!(mid.pack_a().is_some());

        let leaf = mid.sub_self().unwrap();
        assert_eq!((leaf.work_id(), leaf.n_way()), (t % 2, 2));
        assert_eq!(leaf.depth(), 1);
        assert!(SubOp::ALL.iter().all(|&op| leaf.child(op).is_none()));
    }
}

#[test]
fn test_create_paths_without_splits() {
    let paths = create_paths(3, &[]).unwrap();
    let ids: Vec<(usize, usize)> = paths.iter().map(|t| (t.work_id(), t.n_way())).collect();
    assert_eq!(ids, [(0, 3), (1, 3), (2, 3)]);
    assert!(paths.iter().all(|t| t.depth() == 1));
}

#[test]
fn test_create_paths_rejects_invalid() {
    assert_eq!(create_paths(0, &[]), Err(PartitionError::EmptyGroup));
    assert_eq!(
        create_paths(6, &[4]),
        Err(PartitionError::UnevenSplit { n_way: 6, ways: 4 })
    );
    assert_eq!(
        create_paths(4, &[2, 0]),
        Err(PartitionError::UnevenSplit { n_way: 2, ways: 0 })
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        PartitionError::WorkIdOutOfRange { work_id: 4, n_way: 4 }.to_string(),
        "work id 4 is outside a group of 4"
    );
    assert_eq!(
        PartitionError::UnevenSplit { n_way: 6, ways: 4 }.to_string(),
        "a group of 6 threads cannot be split 4 ways"
    );
}

#[test]
fn test_threads_cover_iterations_once() {
    const N_WAY: usize = 4;
    const ITERS: usize = 1000;

    let paths = create_paths(N_WAY, &[]).unwrap();
    let hits: Vec<AtomicUsize> = (0..ITERS).map(|_| AtomicUsize::new(0)).collect();

    thread::scope(|s| {
        for info in &paths {
            let hits = &hits;
            s.spawn(move || {
                for axis in LoopAxis::ALL {
                    for i in 0..ITERS {
                        if my_iter(axis, i, info) {
                            hits[i].fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            });
        }
    });

    // Each index is claimed once per axis.
    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == LoopAxis::ALL.len()));
}

#[test]
fn test_nested_groups_cover_inner_loop() {
    // 6 threads, 2 subgroups of 3: each subgroup covers the inner loop once.
    const INNER: usize = 30;
    let paths = create_paths(6, &[2]).unwrap();
    let hits: Vec<AtomicUsize> = (0..INNER).map(|_| AtomicUsize::new(0)).collect();

    thread::scope(|s| {
        for info in &paths {
            let hits = &hits;
            s.spawn(move || {
                let inner = info.sub_self().expect("nested level");
                for i in inner.owned(0..INNER) {
                    hits[i].fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    });

    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 2));
}

#[test]
fn test_all_variants_match_original() {
    let variants = available_variants();
    let original = variants
        .iter()
        .find(|v| v.name == "original")
        .expect("original variant not found");

    for n_way in [1usize, 2, 3, 5, 8] {
        for work_id in 0..n_way {
            let thread = ThreadInfo::new(work_id, n_way).unwrap();
            for n in [0usize, 1, 2, 9, 64, 999] {
                let expected = (original.function)(n, &thread);
                for variant in &variants {
                    assert_eq!(
                        (variant.function)(n, &thread),
                        expected,
                        "Variant {} mismatch (n={}, thread {}/{})",
                        variant.name,
                        n,
                        work_id,
                        n_way
                    );
                }
            }
        }
    }

    // 0 + 3 + 6
    let thread = ThreadInfo::new(0, 3).unwrap();
    assert_eq!((original.function)(9, &thread), 9);
}

#[test]
fn test_descriptor_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ThreadInfo>();
}
