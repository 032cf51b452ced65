//! Rolling history of resolved identifications

pub mod ring;

pub use ring::BoundedRing;

/// One resolved observation window: the winning label and its price text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRecord {
    pub label: String,
    pub price: String,
}

impl DetectionRecord {
    pub fn new(label: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            price: price.into(),
        }
    }
}

/// Most recent detections, oldest evicted first.
#[derive(Debug, Clone)]
pub struct DetectionHistory {
    records: BoundedRing<DetectionRecord>,
}

impl DetectionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: BoundedRing::new(capacity),
        }
    }

    pub fn push(&mut self, record: DetectionRecord) {
        if let Some(evicted) = self.records.push(record) {
            log::debug!("history full, evicted {}", evicted.label);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DetectionRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<DetectionRecord> {
        self.records.iter().cloned().collect()
    }
}
