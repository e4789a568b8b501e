use std::{sync::Arc, thread, time::Duration};

use darkroom_pool::WorkQueue;

#[test]
fn fifo_order() {
    let queue = WorkQueue::new();
    for i in 0..10 {
        queue.push(i);
    }

    let drained: Vec<i32> = (0..10).map(|_| queue.pop()).collect();
    assert_eq!(drained, (0..10).collect::<Vec<_>>());
}

#[test]
fn len_tracks_queued_items() {
    let queue = WorkQueue::new();
    assert!(queue.is_empty());

    queue.push('a');
    queue.push('b');
    assert_eq!(queue.len(), 2);

    queue.pop();
    assert_eq!(queue.len(), 1);
    assert!(!queue.is_empty());
}

#[test]
fn pop_blocks_until_push() {
    let queue = Arc::new(WorkQueue::new());

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.pop())
    };

    // Give the consumer time to block on the empty queue.
    thread::sleep(Duration::from_millis(50));
    queue.push(7);

    assert_eq!(consumer.join().unwrap(), 7);
}

#[test]
fn pop_timeout_expires_on_empty_queue() {
    let queue: WorkQueue<u8> = WorkQueue::new();
    assert_eq!(queue.pop_timeout(Duration::from_millis(10)), None);
}

#[test]
fn pop_timeout_returns_available_item() {
    let queue = WorkQueue::new();
    queue.push("unit");

    assert_eq!(queue.pop_timeout(Duration::from_millis(10)), Some("unit"));
}

#[test]
fn each_item_delivered_exactly_once() {
    let queue = Arc::new(WorkQueue::new());
    for i in 0..100 {
        queue.push(i);
    }

    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || (0..25).map(|_| queue.pop()).collect::<Vec<i32>>())
        })
        .collect();

    let mut seen: Vec<i32> = consumers
        .into_iter()
        .flat_map(|consumer| consumer.join().unwrap())
        .collect();
    seen.sort_unstable();

    assert_eq!(seen, (0..100).collect::<Vec<_>>());
}
