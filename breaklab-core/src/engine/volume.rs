//! Rolling volume statistics per instrument.

/// Append-only volume observations with a trailing-window average.
#[derive(Debug, Clone)]
pub struct VolumeHistory {
    observations: Vec<f64>,
    lookback: usize,
}

impl VolumeHistory {
    pub fn new(lookback: usize) -> Self {
        Self {
            observations: Vec::new(),
            lookback,
        }
    }

    pub fn push(&mut self, volume: f64) {
        self.observations.push(volume);
    }

    /// Mean of the most recent `min(lookback, len)` observations; 0.0 when empty.
    pub fn average(&self) -> f64 {
        if self.observations.is_empty() {
            return 0.0;
        }
        let window = self.lookback.min(self.observations.len());
        let tail = &self.observations[self.observations.len() - window..];
        tail.iter().sum::<f64>() / window as f64
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
