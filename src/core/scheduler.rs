//! Cooperative timer queue for deferred and periodic tasks.
//!
//! Tasks are plain data. Nothing runs on its own: the owner calls
//! [`Scheduler::pop_due`] with the current time and dispatches whatever comes
//! back, so a virtual clock drives it exactly like a real one.

use super::clock::Timestamp;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Identifies one scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    due: Timestamp,
    seq: u64,
    handle: TaskHandle,
    period: Option<i64>,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-heap of tasks ordered by due time, then by scheduling order.
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BinaryHeap<Reverse<Entry<T>>>,
    live: HashSet<TaskHandle>,
    next_handle: u64,
    next_seq: u64,
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            live: HashSet::new(),
            next_handle: 0,
            next_seq: 0,
        }
    }

    /// Runs `task` once at `now + delay_ms`.
    pub fn schedule_once(&mut self, now: Timestamp, delay_ms: i64, task: T) -> TaskHandle {
        self.push(now + delay_ms.max(0), None, task)
    }

    /// Runs `task` every `period_ms`, first at `now + period_ms`.
    pub fn schedule_periodic(&mut self, now: Timestamp, period_ms: i64, task: T) -> TaskHandle {
        let period = period_ms.max(1);
        self.push(now + period, Some(period), task)
    }

    /// Cancels a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.live.remove(&handle)
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.live.contains(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.live.len()
    }

    /// Due time of the earliest live task.
    pub fn next_due(&mut self) -> Option<Timestamp> {
        self.discard_cancelled();
        self.queue.peek().map(|Reverse(e)| e.due)
    }

    /// Pops the earliest live task due at or before `now`.
    ///
    /// Periodic tasks are re-armed at `due + period` under the same handle.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<(Timestamp, T)> {
        self.discard_cancelled();
        if self.queue.peek().map_or(true, |Reverse(e)| e.due > now) {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;

        match entry.period {
            Some(period) => {
                let seq = self.bump_seq();
                self.queue.push(Reverse(Entry {
                    due: entry.due + period,
                    seq,
                    handle: entry.handle,
                    period: entry.period,
                    task: entry.task.clone(),
                }));
            }
            None => {
                self.live.remove(&entry.handle);
            }
        }
        Some((entry.due, entry.task))
    }

    fn push(&mut self, due: Timestamp, period: Option<i64>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.bump_seq();
        self.live.insert(handle);
        self.queue.push(Reverse(Entry {
            due,
            seq,
            handle,
            period,
            task,
        }));
        handle
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse(entry)) = self.queue.peek() {
            if self.live.contains(&entry.handle) {
                break;
            }
            self.queue.pop();
        }
    }
}
