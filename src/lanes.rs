//! Per-Item Request Lanes
//!
//! At most one request per item is in flight; later clicks queue behind it in
//! order, so responses always arrive in the order the user acted.

use std::collections::{HashMap, VecDeque};

use crate::models::ItemKey;

#[derive(Debug)]
struct Lane<A> {
    queued: VecDeque<A>,
}

#[derive(Debug)]
pub struct RequestLanes<A> {
    lanes: HashMap<ItemKey, Lane<A>>,
}

impl<A> Default for RequestLanes<A> {
    fn default() -> Self {
        Self { lanes: HashMap::new() }
    }
}

impl<A> RequestLanes<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. Returns it back when it may be sent right away,
    /// or `None` when it was queued behind an in-flight request.
    pub fn submit(&mut self, key: ItemKey, action: A) -> Option<A> {
        match self.lanes.get_mut(&key) {
            Some(lane) => {
                lane.queued.push_back(action);
                None
            }
            None => {
                self.lanes.insert(key, Lane { queued: VecDeque::new() });
                Some(action)
            }
        }
    }

    /// Mark the in-flight request finished. Returns the next action to send;
    /// the lane closes when nothing is queued.
    pub fn complete(&mut self, key: ItemKey) -> Option<A> {
        let lane = self.lanes.get_mut(&key)?;
        let next = lane.queued.pop_front();
        if next.is_none() {
            self.lanes.remove(&key);
        }
        next
    }

    /// Whether any queued action for `key` satisfies `pred`
    pub fn any_queued(&self, key: ItemKey, pred: impl Fn(&A) -> bool) -> bool {
        self.lanes
            .get(&key)
            .is_some_and(|lane| lane.queued.iter().any(pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: ItemKey = ItemKey { trip_id: 7, item_id: 42 };
    const OTHER: ItemKey = ItemKey { trip_id: 7, item_id: 43 };

    #[test]
    fn test_idle_lane_dispatches_immediately() {
        let mut lanes = RequestLanes::new();
        assert_eq!(lanes.submit(KEY, "toggle"), Some("toggle"));
        assert_eq!(lanes.complete(KEY), None);
        // Lane closed, so the next action goes straight out again
        assert_eq!(lanes.submit(KEY, "toggle"), Some("toggle"));
    }

    #[test]
    fn test_busy_lane_queues_in_order() {
        let mut lanes = RequestLanes::new();
        assert_eq!(lanes.submit(KEY, 1), Some(1));
        assert_eq!(lanes.submit(KEY, 2), None);
        assert_eq!(lanes.submit(KEY, 3), None);
        assert!(lanes.any_queued(KEY, |a| *a == 3));

        assert_eq!(lanes.complete(KEY), Some(2));
        assert_eq!(lanes.complete(KEY), Some(3));
        assert!(!lanes.any_queued(KEY, |_| true));
        assert_eq!(lanes.complete(KEY), None);
        assert_eq!(lanes.submit(KEY, 4), Some(4));
    }

    #[test]
    fn test_lanes_are_independent() {
        let mut lanes = RequestLanes::new();
        assert_eq!(lanes.submit(KEY, 'a'), Some('a'));
        assert_eq!(lanes.submit(OTHER, 'b'), Some('b'));
        assert_eq!(lanes.submit(KEY, 'c'), None);

        assert_eq!(lanes.complete(OTHER), None);
        assert!(lanes.any_queued(KEY, |a| *a == 'c'));
        assert!(!lanes.any_queued(OTHER, |_| true));
    }

    #[test]
    fn test_complete_unknown_lane() {
        let mut lanes: RequestLanes<u8> = RequestLanes::new();
        assert_eq!(lanes.complete(KEY), None);
    }
}
