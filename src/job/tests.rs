use std::collections::BinaryHeap;

use itertools::Itertools;

use crate::criticality::Criticality::{Hi, Lo};
use crate::job::{Job, JobId};
use crate::task::TaskId;
use crate::tests::job;

#[test]
fn earlier_scheduling_deadline_wins() {
    let a = job(1, 1, Lo, 0, 10, None);
    let b = job(2, 1, Lo, 0, 9, None);
    assert!(b > a);

    // a virtual deadline counts as the scheduling deadline
    let c = job(3, 1, Hi, 0, 20, Some(8));
    assert!(c > b);
    assert!(c > a);
}

#[test]
fn tie_breaks_in_order() {
    // 2. virtual deadline wins a deadline tie
    let plain = job(1, 1, Hi, 0, 10, None);
    let scaled = job(2, 1, Hi, 0, 20, Some(10));
    assert_eq!(plain.scheduling_deadline(), scaled.scheduling_deadline());
    assert!(scaled > plain);

    // 3. higher criticality wins
    let l = job(1, 1, Lo, 0, 10, None);
    let h = job(2, 1, Hi, 0, 10, None);
    assert!(h > l);

    // 4. smaller original deadline wins
    let near = job(2, 1, Hi, 0, 20, Some(10));
    let far = job(1, 1, Hi, 0, 30, Some(10));
    assert!(near > far);

    // 5. earlier release wins
    let early = job(2, 1, Lo, 0, 10, None);
    let late = job(1, 1, Lo, 2, 8, None);
    assert_eq!(early.original_deadline(), late.original_deadline());
    assert!(early > late);

    // 6. smaller task id wins
    let t1 = job(1, 1, Lo, 0, 10, None);
    let t2 = job(2, 1, Lo, 0, 10, None);
    assert!(t1 > t2);
}

#[test]
fn deadline_dominates_all_tie_breaks() {
    let urgent = job(9, 4, Lo, 5, 5, None);
    let relaxed = job(1, 1, Hi, 0, 20, Some(11));
    assert!(urgent.scheduling_deadline() < relaxed.scheduling_deadline());
    assert!(urgent > relaxed);
}

fn sample_jobs() -> Vec<Job> {
    let mut jobs = Vec::new();
    for task in 1..=3u32 {
        for release in [0, 2, 5] {
            for deadline in [5, 10] {
                let index = release * 10 + deadline;
                jobs.push(job(task, index, Lo, release, deadline, None));
                jobs.push(job(task, index + 1, Hi, release, deadline, None));
                jobs.push(job(task, index + 2, Hi, release, deadline * 2, Some(deadline)));
            }
        }
    }
    jobs
}

#[test]
fn strict_total_order() {
    let jobs = sample_jobs();
    for j in &jobs {
        assert_eq!(j, j);
    }
    for (a, b) in jobs.iter().tuple_combinations() {
        assert_ne!(a.id(), b.id());
        // exactly one of a < b and b < a
        assert!((a < b) ^ (b < a), "{} and {} compare equal", a.id(), b.id());
    }
    for (a, b, c) in jobs.iter().tuple_combinations() {
        for (x, y, z) in [(a, b, c), (a, c, b), (b, a, c), (b, c, a), (c, a, b), (c, b, a)] {
            if x > y && y > z {
                assert!(x > z);
            }
        }
    }
}

#[test]
fn heap_surfaces_earliest_deadline() {
    let heap: BinaryHeap<Job> = sample_jobs().into_iter().collect();
    let order: Vec<Job> = heap.into_sorted_vec().into_iter().rev().collect();
    for (a, b) in order.iter().tuple_windows() {
        assert!(a.scheduling_deadline() <= b.scheduling_deadline());
    }
    assert_eq!(order[0].scheduling_deadline(), 5);
    assert!(order[0].uses_virtual_deadline());
    assert_eq!(order[0].task(), TaskId(1));
}

#[test]
fn virtual_deadline_tightens_only() {
    let j = job(3, 1, Hi, 3, 20, Some(5));
    assert!(j.uses_virtual_deadline());
    assert_eq!(j.scheduling_deadline(), 8);
    assert_eq!(j.original_deadline(), 23);

    let j = job(3, 1, Hi, 3, 20, None);
    assert!(!j.uses_virtual_deadline());
    assert_eq!(j.scheduling_deadline(), j.original_deadline());
}

#[test]
fn absolute_deadlines_saturate() {
    let j = job(1, 1, Lo, 5, u64::MAX, None);
    assert_eq!(j.original_deadline(), u64::MAX);
    assert!(!j.has_missed_deadline(u64::MAX));

    let mut j = job(2, 1, Hi, 5, u64::MAX, Some(u64::MAX - 1));
    assert_eq!(j.scheduling_deadline(), u64::MAX);
    j.restore_deadline();
    assert_eq!(j.scheduling_deadline(), u64::MAX);
}

#[test]
fn restore_deadline() {
    let mut j = job(3, 1, Hi, 3, 20, Some(5));
    j.restore_deadline();
    assert!(!j.uses_virtual_deadline());
    assert_eq!(j.scheduling_deadline(), 23);
}

#[test]
fn execution_accounting() {
    let id = JobId { task: TaskId(4), index: 2 };
    let mut j = Job::new(id, Hi, 0, 10, None, 2.5, 2);
    assert_eq!(j.id().to_string(), "[Task4 Job2]");
    assert!(!j.is_complete());
    j.execute_for_one_tick();
    j.execute_for_one_tick();
    assert_eq!(j.executed(), 2);
    assert!(j.exceeds_lo_budget());
    assert!(!j.is_complete());
    j.execute_for_one_tick();
    assert!(j.is_complete());
}

#[test]
fn missed_deadline() {
    let j = job(1, 1, Lo, 0, 10, None);
    assert!(!j.has_missed_deadline(9));
    assert!(!j.has_missed_deadline(10));
    assert!(j.has_missed_deadline(11));
}
