//! Append-only record of where vapor left residue on the vessel walls.

use glam::Vec3;

/// Deposition points, packed as `x, y, z` triples for the renderer.
///
/// The buffer is allocated at full capacity up front so its pointer stays
/// stable for the lifetime of the store.
pub struct ResidueStore {
    positions: Vec<f32>,
    count: usize,
    capacity: usize,
}

impl ResidueStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: vec![0.0; capacity * 3],
            count: 0,
            capacity,
        }
    }

    /// Record a deposit. Returns false, dropping the point, once full.
    pub fn deposit(&mut self, position: Vec3) -> bool {
        if self.is_full() {
            return false;
        }
        let base = self.count * 3;
        self.positions[base..base + 3].copy_from_slice(&position.to_array());
        self.count += 1;
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        (index < self.count).then(|| Vec3::from_slice(&self.positions[index * 3..index * 3 + 3]))
    }

    /// Only the recorded points.
    pub fn positions(&self) -> &[f32] {
        &self.positions[..self.count * 3]
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposits_in_order() {
        let mut store = ResidueStore::new(4);
        assert!(store.deposit(Vec3::new(1.0, 2.0, 3.0)));
        assert!(store.deposit(Vec3::new(4.0, 5.0, 6.0)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.positions(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(store.get(1), Some(Vec3::new(4.0, 5.0, 6.0)));
        assert_eq!(store.get(2), None);
    }

    #[test]
    fn full_store_drops_silently() {
        let mut store = ResidueStore::new(2);
        let ptr = store.positions_ptr();
        for i in 0..10 {
            store.deposit(Vec3::splat(i as f32));
        }
        assert_eq!(store.len(), 2);
        assert!(store.is_full());
        assert!(!store.deposit(Vec3::ONE));
        assert_eq!(store.get(1), Some(Vec3::splat(1.0)));
        assert_eq!(ptr, store.positions_ptr());
    }
}
