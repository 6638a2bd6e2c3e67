use arbiter_common::types::WeightVector;
use arbiter_scoring::normalize;

/// Accumulator for one partition's in-progress cycle.
///
/// Constructed fresh at the start of a partition's processing and consumed
/// by value at the end — never aliased across partitions or ticks, so no
/// state can leak between cycles.
pub struct CycleState {
    partition: u16,
    uids: Vec<u64>,
    scores: Vec<f64>,
}

impl CycleState {
    pub fn new(partition: u16) -> Self {
        Self { partition, uids: Vec::new(), scores: Vec::new() }
    }

    pub fn partition(&self) -> u16 {
        self.partition
    }

    pub fn record(&mut self, uid: u64, raw_score: f64) {
        self.uids.push(uid);
        self.scores.push(raw_score);
    }

    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }

    /// Normalizes the accumulated scores and discards the state.
    ///
    /// The uid and weight arrays stay index-aligned by construction.
    pub fn into_weight_vector(self) -> WeightVector {
        let weights = normalize(&self.scores);
        WeightVector { uids: self.uids, weights }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_is_preserved() {
        let mut state = CycleState::new(10);
        state.record(1, 1.0);
        state.record(2, 0.2);
        state.record(3, 0.1);

        let vector = state.into_weight_vector();
        assert_eq!(vector.uids, vec![1, 2, 3]);
        assert_eq!(vector.weights.len(), 3);
    }

    #[test]
    fn test_fresh_state_is_empty() {
        assert!(CycleState::new(0).is_empty());
    }
}
