// src/model/queues.rs

use crate::model::observation::PIPELINE_LEN;

/// Units ordered but not yet received, indexed by days until arrival.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPipeline {
    slots: [u32; PIPELINE_LEN],
}

impl OrderPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pipeline with preset contents.
    pub fn from_slots(slots: [u32; PIPELINE_LEN]) -> Self {
        Self { slots }
    }

    /// True when nothing is in flight at the farthest slot.
    pub fn far_slot_free(&self) -> bool {
        self.slots[PIPELINE_LEN - 1] == 0
    }

    /// Adds an order `offset` days out. Callers validate `offset` up front.
    pub fn place(&mut self, offset: usize, quantity: u32) {
        self.slots[offset] += quantity;
    }

    /// Takes today's arrivals and moves every slot one day closer.
    /// Call this once per day, after ordering.
    pub fn advance(&mut self) -> u32 {
        let arrivals = self.slots[0];
        self.slots.rotate_left(1);
        self.slots[PIPELINE_LEN - 1] = 0;
        arrivals
    }

    pub fn total(&self) -> u32 {
        self.slots.iter().sum()
    }

    pub fn slots(&self) -> &[u32; PIPELINE_LEN] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_arrives_after_offset_days() {
        let mut pipeline = OrderPipeline::new();
        pipeline.place(3, 12);

        // Placed and advanced on the same day, so it lands on the 4th advance.
        assert_eq!(pipeline.advance(), 0);
        assert_eq!(pipeline.slots(), &[0, 0, 12, 0, 0, 0]);
        assert_eq!(pipeline.advance(), 0);
        assert_eq!(pipeline.advance(), 0);
        assert_eq!(pipeline.advance(), 12);
        assert_eq!(pipeline.total(), 0);
    }

    #[test]
    fn far_slot_is_cleared_on_advance() {
        let mut pipeline = OrderPipeline::from_slots([1, 0, 0, 0, 0, 9]);
        assert!(!pipeline.far_slot_free());
        assert_eq!(pipeline.advance(), 1);
        assert!(pipeline.far_slot_free());
        assert_eq!(pipeline.slots(), &[0, 0, 0, 0, 9, 0]);
    }
}
