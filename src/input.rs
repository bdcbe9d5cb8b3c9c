use std::collections::VecDeque;
use std::fmt;

use num_bigint::BigInt;

/// A queue of pending input values.
///
/// Each enqueued sequence is kept as its own iterator so that unbounded,
/// lazily-produced sources can be queued alongside finite ones. Values come
/// out in the order their sources were enqueued.
#[derive(Default)]
pub struct InputQueue {
    sources: VecDeque<Box<dyn Iterator<Item = BigInt>>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sequence of values to the tail of the queue.
    pub fn enqueue<I, T>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
        T: Into<BigInt> + 'static,
    {
        self.sources
            .push_back(Box::new(values.into_iter().map(Into::into)));
    }

    /// Removes and returns the next pending value, without blocking.
    ///
    /// Exhausted sources are discarded along the way.
    pub fn try_next(&mut self) -> Option<BigInt> {
        loop {
            match self.sources.front_mut()?.next() {
                Some(value) => break Some(value),
                None => {
                    self.sources.pop_front();
                }
            }
        }
    }

    /// Discards all pending values.
    pub fn clear(&mut self) {
        self.sources.clear();
    }
}

impl fmt::Debug for InputQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputQueue")
            .field("sources", &self.sources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_next_on_empty_is_none() {
        let mut queue = InputQueue::new();
        assert_eq!(queue.try_next(), None);
        // still usable afterwards
        queue.enqueue([1]);
        assert_eq!(queue.try_next(), Some(BigInt::from(1)));
        assert_eq!(queue.try_next(), None);
    }

    #[test]
    fn order_is_preserved_across_enqueues() {
        let mut queue = InputQueue::new();
        queue.enqueue([1, 2]);
        queue.enqueue([3]);
        queue.enqueue(Vec::<i64>::new());
        queue.enqueue([4, 5]);
        let drained: Vec<_> = std::iter::from_fn(|| queue.try_next()).collect();
        let expected: Vec<_> = [1, 2, 3, 4, 5].iter().map(|&v| BigInt::from(v)).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn lazily_produced_source() {
        let mut queue = InputQueue::new();
        queue.enqueue((1i64..).map(|v| BigInt::from(v) * 2));
        assert_eq!(queue.try_next(), Some(BigInt::from(2)));
        assert_eq!(queue.try_next(), Some(BigInt::from(4)));
    }

    #[test]
    fn unbounded_source() {
        let mut queue = InputQueue::new();
        queue.enqueue(0i64..);
        for i in 0..100 {
            assert_eq!(queue.try_next(), Some(BigInt::from(i)));
        }
    }

    #[test]
    fn clear_discards_everything() {
        let mut queue = InputQueue::new();
        queue.enqueue([1, 2, 3]);
        queue.enqueue(0i64..);
        queue.clear();
        assert_eq!(queue.try_next(), None);
    }
}
