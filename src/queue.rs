use std::collections::VecDeque;

/// A bounded first-in-first-out queue.
///
/// The capacity is fixed at construction. Items leave in exactly the order
/// they entered; there is no priority and no reordering.
#[derive(Clone, Debug)]
pub struct FifoQueue<T> {
    /// Waiting items, head at the front.
    buffer: VecDeque<T>,
    /// Maximum number of items `buffer` may hold.
    capacity: usize,
}

impl<T> FifoQueue<T> {
    pub fn new(capacity: usize) -> FifoQueue<T> {
        FifoQueue {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `item` at the tail. When the queue is full the item is handed
    /// back untouched and the queue is not modified.
    pub fn enqueue(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }

        self.buffer.push_back(item);
        Ok(())
    }

    /// Removes and returns the head, if any.
    pub fn dequeue(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    pub fn peek(&self) -> Option<&T> {
        self.buffer.front()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue() {
        let mut queue = FifoQueue::<u32>::new(3);
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn full_queue_rejects_without_mutation() {
        let mut queue = FifoQueue::new(2);
        assert_eq!(queue.enqueue(1), Ok(()));
        assert_eq!(queue.enqueue(2), Ok(()));
        assert!(queue.is_full());
        assert_eq!(queue.enqueue(3), Err(3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut queue = FifoQueue::new(4);
        queue.enqueue("a").unwrap();
        queue.enqueue("b").unwrap();
        assert_eq!(queue.peek(), Some(&"a"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue(), Some("a"));
        assert_eq!(queue.peek(), Some(&"b"));
    }

    #[test]
    fn interleaved_operations_keep_enqueue_order() {
        let mut queue = FifoQueue::new(5);
        let mut expected = std::collections::VecDeque::new();
        let mut dequeued = vec![];
        let mut next = 0;

        // A fixed interleaving of pushes and pops, including pops on empty
        // and pushes on full.
        for op in "eeedeeeeedddeddddeed".chars() {
            if op == 'e' {
                if queue.enqueue(next).is_ok() {
                    expected.push_back(next);
                }
                next += 1;
            } else if let Some(item) = queue.dequeue() {
                dequeued.push(item);
                assert_eq!(Some(item), expected.pop_front());
            }
            assert_eq!(queue.len(), expected.len());
        }

        let mut sorted = dequeued.clone();
        sorted.sort_unstable();
        assert_eq!(dequeued, sorted);
    }

    #[test]
    fn capacity_is_fixed() {
        let mut queue = FifoQueue::new(1);
        assert_eq!(queue.capacity(), 1);
        queue.enqueue(()).unwrap();
        assert!(queue.enqueue(()).is_err());
        queue.dequeue();
        assert!(queue.enqueue(()).is_ok());
    }
}
