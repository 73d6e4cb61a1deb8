//! Event free-list
//!
//! Events are fungible once cleared: the pool hands out any recycled
//! record, and offers no way to inspect without removal.

use super::event::Event;
use super::level::Level;
use parking_lot::Mutex;

const DEFAULT_POOL_CAPACITY: usize = 128;

pub(crate) struct EventPool {
    free: Mutex<Vec<Box<Event>>>,
    capacity: usize,
}

impl EventPool {
    pub(crate) fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity: DEFAULT_POOL_CAPACITY,
        }
    }

    /// Take a recycled event, or allocate a fresh one. Recycled events were
    /// cleared on release, so the field map is always empty.
    pub(crate) fn get(&self, level: Level) -> Box<Event> {
        match self.free.lock().pop() {
            Some(mut event) => {
                event.level = level;
                event
            }
            None => Box::new(Event::new(level)),
        }
    }

    /// Clear an event and return it to the free-list. Events beyond the
    /// pool capacity are simply dropped.
    pub(crate) fn put(&self, mut event: Box<Event>) {
        event.reset();
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.free.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pooled_event_comes_back_empty() {
        let pool = EventPool::new();

        let mut event = pool.get(Level::Info);
        event.add_field("name", "sunchp");
        event.message = "hello".to_string();
        pool.put(event);
        assert_eq!(pool.len(), 1);

        let recycled = pool.get(Level::Debug);
        assert_eq!(recycled.level, Level::Debug);
        assert!(recycled.data.is_empty());
        assert!(recycled.message.is_empty());
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn test_get_allocates_when_empty() {
        let pool = EventPool::new();
        let event = pool.get(Level::Warn);
        assert_eq!(event.level, Level::Warn);
        assert!(event.data.is_empty());
    }
}
