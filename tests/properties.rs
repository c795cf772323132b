//! Randomized checks of the buffer invariants against a `VecDeque` model.

use std::collections::VecDeque;

use proptest::prelude::*;
use ringrange::RingBuffer;

const CAP: usize = 8;

#[derive(Debug, Clone)]
enum Op {
    Enqueue(i32),
    Emplace(i32),
    Dequeue,
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::Enqueue),
        1 => any::<i32>().prop_map(Op::Emplace),
        2 => Just(Op::Dequeue),
        1 => Just(Op::Pop),
    ]
}

fn raw_slots(rb: &RingBuffer<i32, CAP>) -> Vec<i32> {
    let mut c = rb.begin();
    let mut out = Vec::with_capacity(CAP);
    for _ in 0..CAP {
        out.push(*c.get());
        c.advance();
    }
    out
}

proptest! {
    #[test]
    fn matches_fifo_model(ops in proptest::collection::vec(op(), 0..200)) {
        let mut rb: RingBuffer<i32, CAP> = RingBuffer::new();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::Enqueue(v) | Op::Emplace(v) => {
                    let was_full = model.len() == CAP;
                    let before = raw_slots(&rb);
                    let accepted = match op {
                        Op::Enqueue(_) => rb.enqueue(v),
                        _ => rb.emplace(v),
                    };
                    prop_assert_eq!(accepted, !was_full);
                    if accepted {
                        model.push_back(v);
                    } else {
                        prop_assert_eq!(raw_slots(&rb), before);
                    }
                }
                Op::Dequeue => {
                    prop_assert_eq!(rb.dequeue(), model.pop_front());
                }
                Op::Pop => {
                    prop_assert_eq!(rb.pop(), model.pop_front().is_some());
                }
            }

            prop_assert_eq!(rb.n_entries(), model.len() as u64);
            prop_assert!(rb.n_entries() <= CAP as u64);

            let live: Vec<i32> = rb.iter().copied().collect();
            if model.len() == CAP {
                prop_assert!(live.is_empty());
            } else {
                prop_assert_eq!(live, model.iter().copied().collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn round_trip_preserves_order(values in proptest::collection::vec(any::<u64>(), 0..=16)) {
        let mut rb: RingBuffer<u64, 16> = RingBuffer::new();
        for v in &values {
            prop_assert!(rb.enqueue(*v));
        }
        let mut out = Vec::new();
        while let Some(v) = rb.dequeue() {
            out.push(v);
        }
        prop_assert_eq!(out, values);
    }

    #[test]
    fn iteration_distance_matches_occupancy(
        skew in 0usize..64,
        fill in 1usize..16,
    ) {
        let mut rb: RingBuffer<u8, 16> = RingBuffer::new();
        // Shift the counters so the live range can straddle the wrap point
        for _ in 0..skew {
            rb.enqueue(0);
            rb.pop();
        }
        for i in 0..fill {
            rb.enqueue(i as u8);
        }
        prop_assert_eq!(rb.begin().distance_to(&rb.end()) as u64, rb.n_entries());
        prop_assert_eq!(rb.iter().len(), fill);
    }
}
