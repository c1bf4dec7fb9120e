//! In-place quicksort variants used by the benchmark harness.
//!
//! All variants sort `u64` slices. The parallel variants never outlive
//! their caller: workers run on scoped threads and are joined before the
//! sort returns.

use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Sequential in-place quicksort with a middle-element pivot.
///
/// The smaller partition is recursed and the larger one looped, keeping
/// stack depth logarithmic even on adversarial inputs.
pub fn quicksort(arr: &mut [u64]) {
    let mut rest = arr;
    while rest.len() > 1 {
        let pivot_idx = partition(rest);
        let (lo, hi) = mem::take(&mut rest).split_at_mut(pivot_idx);
        let hi = &mut hi[1..];
        if lo.len() < hi.len() {
            quicksort(lo);
            rest = hi;
        } else {
            quicksort(hi);
            rest = lo;
        }
    }
}

/// Sorts with up to `max_threads` concurrent workers.
///
/// A branch is handed to a new scoped thread only while it is longer than
/// `spawn_threshold` and the thread budget has a free slot; otherwise it is
/// sorted inline. `max_threads` counts the calling thread, so a budget of 1
/// degenerates to the sequential sort.
pub fn quicksort_parallel(arr: &mut [u64], max_threads: usize, spawn_threshold: usize) {
    if arr.len() <= 1 {
        return;
    }
    let budget = ThreadBudget::new(max_threads.saturating_sub(1));
    thread::scope(|scope| sort_task(scope, arr, &budget, spawn_threshold));
}

/// Splits into one chunk per thread, sorts the chunks on scoped threads and
/// k-way merges the sorted runs back into place.
pub fn sort_split_merge(arr: &mut [u64], num_threads: usize) {
    let threads = num_threads.max(1);
    if threads == 1 || arr.len() <= threads {
        quicksort(arr);
        return;
    }
    let run_len = arr.len().div_ceil(threads);
    thread::scope(|scope| {
        for chunk in arr.chunks_mut(run_len) {
            scope.spawn(move || quicksort(chunk));
        }
    });
    merge_runs(arr, run_len);
}

/// Spawn slots left for worker threads, claimed one spawn at a time.
struct ThreadBudget {
    slots: AtomicUsize,
}

impl ThreadBudget {
    fn new(extra_workers: usize) -> Self {
        Self {
            slots: AtomicUsize::new(extra_workers),
        }
    }

    fn try_claim(&self) -> bool {
        self.slots
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }

    fn release(&self) {
        self.slots.fetch_add(1, Ordering::AcqRel);
    }
}

fn sort_task<'scope, 'env>(
    scope: &'scope thread::Scope<'scope, 'env>,
    mut arr: &'scope mut [u64],
    budget: &'scope ThreadBudget,
    spawn_threshold: usize,
) {
    while arr.len() > 1 {
        let pivot_idx = partition(arr);
        let (lo, hi) = mem::take(&mut arr).split_at_mut(pivot_idx);
        let hi = &mut hi[1..];

        // Loop on the larger side; the smaller side is either spawned or
        // recursed, so inline depth stays logarithmic.
        let (smaller, larger) = if lo.len() < hi.len() {
            (lo, hi)
        } else {
            (hi, lo)
        };
        if smaller.len() > spawn_threshold && budget.try_claim() {
            scope.spawn(move || {
                sort_task(scope, smaller, budget, spawn_threshold);
                budget.release();
            });
        } else {
            sort_task(scope, smaller, budget, spawn_threshold);
        }
        arr = larger;
    }
}

/// Moves the middle element into pivot position and partitions around it.
/// Returns the pivot's final index. Requires `arr.len() >= 2`.
fn partition(arr: &mut [u64]) -> usize {
    let last = arr.len() - 1;
    arr.swap(arr.len() / 2, last);
    let mut store = 0;
    for i in 0..last {
        if arr[i] < arr[last] {
            arr.swap(i, store);
            store += 1;
        }
    }
    arr.swap(store, last);
    store
}

fn merge_runs(arr: &mut [u64], run_len: usize) {
    if run_len == 0 || run_len >= arr.len() {
        return;
    }
    // (cursor, end) per sorted run.
    let mut runs: Vec<(usize, usize)> = (0..arr.len())
        .step_by(run_len)
        .map(|start| (start, (start + run_len).min(arr.len())))
        .collect();

    let mut merged = Vec::with_capacity(arr.len());
    loop {
        let mut best: Option<usize> = None;
        for (idx, &(pos, end)) in runs.iter().enumerate() {
            if pos < end {
                let better = match best {
                    Some(b) => arr[pos] < arr[runs[b].0],
                    None => true,
                };
                if better {
                    best = Some(idx);
                }
            }
        }
        let Some(best) = best else { break };
        merged.push(arr[runs[best].0]);
        runs[best].0 += 1;
    }
    arr.copy_from_slice(&merged);
}
