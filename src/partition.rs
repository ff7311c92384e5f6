use crate::types::Measurement;

/// Measurements split by their `verified` flag. Each side keeps table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitions {
    pub verified_true: Vec<Measurement>,
    pub verified_false: Vec<Measurement>,
}

impl Partitions {
    pub fn len(&self) -> usize {
        self.verified_true.len() + self.verified_false.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verified_true.is_empty() && self.verified_false.is_empty()
    }

    /// Both sides, `verified = true` first.
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.verified_true.iter().chain(self.verified_false.iter())
    }
}

pub fn partition(measurements: Vec<Measurement>) -> Partitions {
    let (verified_true, verified_false) = measurements.into_iter().partition(|m| m.verified);
    Partitions {
        verified_true,
        verified_false,
    }
}
