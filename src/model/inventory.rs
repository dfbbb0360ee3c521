// src/model/inventory.rs

/// Outcome of serving one day's demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fulfillment {
    pub consumed: u32,
    pub shortage: u32,
}

/// On-hand stock bucketed by age in days. Bucket 0 is the freshest,
/// the last bucket expires at the end of the current day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgedInventory {
    buckets: Vec<u32>,
}

impl AgedInventory {
    pub fn new(shelf_life: usize) -> Self {
        Self {
            buckets: vec![0; shelf_life],
        }
    }

    pub fn from_buckets(buckets: Vec<u32>) -> Self {
        Self { buckets }
    }

    /// Receives arrivals into the freshest bucket.
    pub fn receive(&mut self, quantity: u32) {
        if let Some(fresh) = self.buckets.first_mut() {
            *fresh += quantity;
        }
    }

    /// Serves demand starting from the oldest stock so the least is wasted.
    pub fn consume_oldest_first(&mut self, demand: u32) -> Fulfillment {
        let mut remaining = demand;
        for bucket in self.buckets.iter_mut().rev() {
            if remaining == 0 {
                break;
            }
            let used = (*bucket).min(remaining);
            *bucket -= used;
            remaining -= used;
        }
        Fulfillment {
            consumed: demand - remaining,
            shortage: remaining,
        }
    }

    /// Drops the oldest bucket as waste and ages everything else by a day.
    /// Returns the number of expired units.
    pub fn age(&mut self) -> u32 {
        let expired = self.buckets.pop().unwrap_or(0);
        self.buckets.insert(0, 0);
        expired
    }

    pub fn total(&self) -> u32 {
        self.buckets.iter().sum()
    }

    pub fn buckets(&self) -> &[u32] {
        &self.buckets
    }
}
