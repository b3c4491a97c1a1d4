// Copyright (c) 2025 The Elastisched Authors.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use elastisched_core::primitives::Interval;
use elastisched_solver::itree::IntervalTree;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ---------- Scenario knobs (a busy week of segments) ----------
const SEED: u64 = 0x5C_11ED; // deterministic RNG for reproducibility

// Time: one week at 1-second resolution
const HORIZON_S: i64 = 7 * 24 * 3600;

// Segment lengths: 15 minutes to 4 hours
const SEG_MIN_S: i64 = 15 * 60;
const SEG_MAX_S: i64 = 4 * 3600;

// Tree sizes to exercise
const ENTRIES: usize = 2_000;

// Query workload per pass
const PASS_QUERIES: usize = 5_000;

// --------------------------------------------------------------

fn random_interval<R: Rng + ?Sized>(rng: &mut R) -> Interval<i64> {
    let length = rng.random_range(SEG_MIN_S..=SEG_MAX_S);
    let start = rng.random_range(0..HORIZON_S - length);
    Interval::new(start, start + length).expect("generated bounds are ordered")
}

fn build_tree(entries: usize, seed: u64) -> IntervalTree<i64, usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tree = IntervalTree::new();
    for index in 0..entries {
        tree.insert(random_interval(&mut rng), index);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("itree_insert_2k", |b| {
        b.iter(|| black_box(build_tree(ENTRIES, SEED)));
    });
}

fn bench_any_overlap(c: &mut Criterion) {
    let tree = build_tree(ENTRIES, SEED);
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 0xBEEF);
    let queries: Vec<Interval<i64>> = (0..PASS_QUERIES).map(|_| random_interval(&mut rng)).collect();

    c.bench_function("itree_any_overlap_5k", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for query in &queries {
                if tree.any_overlap(black_box(query)).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        });
    });
}

fn bench_all_overlapping(c: &mut Criterion) {
    let tree = build_tree(ENTRIES, SEED);
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 0xF00D);
    let queries: Vec<Interval<i64>> = (0..PASS_QUERIES).map(|_| random_interval(&mut rng)).collect();

    c.bench_function("itree_all_overlapping_5k", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for query in &queries {
                total += tree.all_overlapping(black_box(query)).len();
            }
            black_box(total)
        });
    });
}

criterion_group!(benches, bench_insert, bench_any_overlap, bench_all_overlapping);
criterion_main!(benches);
