//! Process-wide scroll-position publisher.
//!
//! Several pieces of chrome (navbar visibility, scroll-to-top, timeline
//! reveal) react to the same scroll position. Instead of each reading an
//! ambient global, they subscribe here and drop their subscription when
//! they unmount. Single-threaded, like the rest of the UI event model.

type Callback = Box<dyn FnMut(f64)>;

#[derive(Default)]
pub struct ScrollHub {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

impl ScrollHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback; the returned id is the unsubscribe handle.
    pub fn subscribe(&mut self, callback: impl FnMut(f64) + 'static) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Unknown ids are ignored, so double-unsubscribe on unmount is fine.
    pub fn unsubscribe(&mut self, id: u64) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    pub fn publish(&mut self, position: f64) {
        for (_, callback) in &mut self.subscribers {
            callback(position);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn test_fan_out() {
        let mut hub = ScrollHub::new();
        let first = Rc::new(Cell::new(0.0));
        let second = Rc::new(Cell::new(0.0));

        let first_clone = first.clone();
        hub.subscribe(move |pos| first_clone.set(pos));
        let second_clone = second.clone();
        hub.subscribe(move |pos| second_clone.set(pos));

        hub.publish(120.5);

        assert_eq!(first.get(), 120.5);
        assert_eq!(second.get(), 120.5);
    }

    #[test]
    fn test_unsubscribe() {
        let mut hub = ScrollHub::new();
        let seen = Rc::new(Cell::new(0u32));

        let seen_clone = seen.clone();
        let id = hub.subscribe(move |_| seen_clone.set(seen_clone.get() + 1));

        hub.publish(10.0);
        hub.unsubscribe(id);
        hub.unsubscribe(id);
        hub.publish(20.0);

        assert_eq!(seen.get(), 1);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
