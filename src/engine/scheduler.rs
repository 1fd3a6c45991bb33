use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::engine::cue::ToneCall;

/*
Deferred Step Queue
===================

Steps of a cue with a non-zero offset are queued here with an absolute due
time in milliseconds. The queue is a min-heap on (due time, sequence):

  enqueue(280, dual)   enqueue(120, sweep)   enqueue(120, sweep')
          │                    │                     │
          ▼                    ▼                     ▼
  heap:  (120,#1 sweep) (120,#2 sweep') (280,#0 dual)

The sequence number makes ties fire in the order they were queued, so two
cues triggered back to back keep their relative order.

The queue does not know about threads or clocks. Whoever drives it asks for
due steps with the current time; see `SoundEngine::run_due` and the timer
thread. There is no cancellation: a queued step runs once its time comes.
*/

struct Entry {
    due_ms: u64,
    seq: u64,
    call: ToneCall,
}

impl Entry {
    fn key(&self) -> (u64, u64) {
        (self.due_ms, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, due_ms: u64, call: ToneCall) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due_ms, seq, call }));
    }

    /// Remove and return the earliest step due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ToneCall> {
        match self.queue.peek() {
            Some(Reverse(entry)) if entry.due_ms <= now_ms => {
                self.queue.pop().map(|Reverse(entry)| entry.call)
            }
            _ => None,
        }
    }

    /// Due time of the earliest queued step.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(entry)| entry.due_ms)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
