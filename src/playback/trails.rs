use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::core::Point;

/// Bounded history buffers keyed by trail name (for example `sun`, `earth`).
#[derive(Debug, Clone, Default)]
pub struct TrailStore {
    capacity: usize,
    trails: IndexMap<String, VecDeque<Point>>,
}

impl TrailStore {
    /// A store that keeps at most `capacity` points per trail; zero disables recording.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            trails: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends `point`, evicting the oldest sample once the trail is full.
    pub fn record(&mut self, name: &str, point: Point) {
        if self.capacity == 0 || !point.is_finite() {
            return;
        }
        let trail = self.trails.entry(name.to_owned()).or_default();
        if trail.len() == self.capacity {
            trail.pop_front();
        }
        trail.push_back(point);
    }

    #[must_use]
    pub fn points(&self, name: &str) -> Vec<Point> {
        self.trails
            .get(name)
            .map(|trail| trail.iter().copied().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self, name: &str) -> usize {
        self.trails.get(name).map_or(0, VecDeque::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trails.values().all(VecDeque::is_empty)
    }

    pub fn clear(&mut self) {
        self.trails.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::TrailStore;
    use crate::core::Point;

    #[test]
    fn evicts_oldest_point_at_capacity() {
        let mut store = TrailStore::new(2);
        for i in 0..3 {
            store.record("sun", Point::new(f64::from(i), 0.0));
        }
        assert_eq!(
            store.points("sun"),
            vec![Point::new(1.0, 0.0), Point::new(2.0, 0.0)]
        );
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut store = TrailStore::new(0);
        store.record("earth", Point::new(1.0, 1.0));
        assert_eq!(store.len("earth"), 0);
    }
}
