//! Pending button-down events shared between the sampler and the game loop.

use core::cell::Cell;

use critical_section::Mutex;

/// Sticky mask of press edges that nobody has consumed yet.
///
/// The sampler ORs new edges in with [`post`](Self::post); the game loop
/// takes the ones it is interested in with
/// [`check_and_clear`](Self::check_and_clear). Both run inside a critical
/// section, so an edge posted while a consumer is clearing is either seen by
/// that consumer or left pending for the next one, never lost.
pub struct EdgeEvents {
    pending: Mutex<Cell<u8>>,
}

impl EdgeEvents {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(0)),
        }
    }

    /// Mark `mask` as pressed.
    pub fn post(&self, mask: u8) {
        if mask == 0 {
            return;
        }
        critical_section::with(|cs| {
            let pending = self.pending.borrow(cs);
            pending.set(pending.get() | mask);
        });
    }

    /// Return the pending edges within `mask` and clear exactly those.
    pub fn check_and_clear(&self, mask: u8) -> u8 {
        critical_section::with(|cs| {
            let pending = self.pending.borrow(cs);
            let hit = pending.get() & mask;
            pending.set(pending.get() & !hit);
            hit
        })
    }

    /// Drop every pending edge.
    pub fn discard(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(0));
    }
}

impl Default for EdgeEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_only_requested_channels() {
        let edges = EdgeEvents::new();
        edges.post(0b1010);

        assert_eq!(edges.check_and_clear(0b0011), 0b0010);
        // The start channel is still pending.
        assert_eq!(edges.check_and_clear(0b1000), 0b1000);
    }

    #[test]
    fn second_check_is_empty() {
        let edges = EdgeEvents::new();
        edges.post(0b0001);
        assert_eq!(edges.check_and_clear(0xFF), 0b0001);
        assert_eq!(edges.check_and_clear(0xFF), 0);
    }

    #[test]
    fn posts_accumulate_until_consumed() {
        let edges = EdgeEvents::new();
        edges.post(0b0001);
        edges.post(0b0001);
        edges.post(0b0100);
        assert_eq!(edges.check_and_clear(0b0111), 0b0101);
    }

    #[test]
    fn discard_drops_everything() {
        let edges = EdgeEvents::new();
        edges.post(0b1111);
        edges.discard();
        assert_eq!(edges.check_and_clear(0xFF), 0);
    }

    #[test]
    fn concurrent_posts_are_not_lost() {
        use std::{
            sync::Arc,
            thread,
        };

        let edges = Arc::new(EdgeEvents::new());
        let producer = {
            let edges = Arc::clone(&edges);
            thread::spawn(move || {
                for _ in 0..1000 {
                    edges.post(0b0001);
                }
                edges.post(0b1000);
            })
        };

        let mut seen = 0;
        while seen & 0b1000 == 0 {
            seen |= edges.check_and_clear(0xFF);
        }
        producer.join().unwrap();
        seen |= edges.check_and_clear(0xFF);

        assert_eq!(seen, 0b1001);
        assert_eq!(edges.check_and_clear(0xFF), 0);
    }
}
