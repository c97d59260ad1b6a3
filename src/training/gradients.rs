//! Per-candidate derivative storage for querywise objectives.
//!
//! The external optimizer owns one slot per dataset row; objectives write
//! only into the slots of the queries they were asked to process, and zero
//! those slots before accumulating into them.

/// First-order derivative accumulator for one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ders {
    /// d(quality surrogate) / d(approx) for this candidate.
    pub der1: f64,
}

/// Owning buffer of derivative slots, indexed by global row id.
///
/// Thin wrapper over `Vec<Ders>` that hands out the per-range mutable slices
/// the querywise objectives consume.
#[derive(Debug, Clone)]
pub struct DerivativeBuffer {
    slots: Vec<Ders>,
}

impl DerivativeBuffer {
    /// Create a zeroed buffer with one slot per dataset row.
    ///
    /// # Panics
    ///
    /// Panics if `n_rows` is zero.
    pub fn new(n_rows: usize) -> Self {
        assert!(n_rows > 0, "n_rows must be positive");
        Self {
            slots: vec![Ders::default(); n_rows],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reset every slot to zero.
    pub fn reset(&mut self) {
        self.slots.fill(Ders::default());
    }

    /// First-order derivative for one row.
    #[inline]
    pub fn der1(&self, id: usize) -> f64 {
        self.slots[id].der1
    }

    #[inline]
    pub fn as_slice(&self) -> &[Ders] {
        &self.slots
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Ders] {
        &mut self.slots
    }

    /// Mutable view of the slots for rows `begin..end`.
    ///
    /// Slot `i` of the returned slice belongs to row `begin + i`; this is
    /// the shape the query dispatcher consumes.
    #[inline]
    pub fn range_mut(&mut self, begin: usize, end: usize) -> &mut [Ders] {
        &mut self.slots[begin..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buffer = DerivativeBuffer::new(4);
        assert_eq!(buffer.len(), 4);
        assert!(buffer.as_slice().iter().all(|d| d.der1 == 0.0));
    }

    #[test]
    fn range_mut_addresses_rows() {
        let mut buffer = DerivativeBuffer::new(6);
        buffer.range_mut(2, 4)[1].der1 = 1.5;
        assert_eq!(buffer.der1(3), 1.5);
        assert_eq!(buffer.der1(2), 0.0);
    }

    #[test]
    fn reset_clears_slots() {
        let mut buffer = DerivativeBuffer::new(3);
        buffer.as_mut_slice()[0].der1 = -2.0;
        buffer.reset();
        assert!(buffer.as_slice().iter().all(|d| d.der1 == 0.0));
    }

    #[test]
    #[should_panic(expected = "n_rows must be positive")]
    fn zero_rows_panics() {
        DerivativeBuffer::new(0);
    }
}
