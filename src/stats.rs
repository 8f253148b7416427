//! Shots-to-win statistics over many matches.

/// Distribution of the number of shots needed to sink a fleet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub matches: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    /// `None` for an empty sample.
    pub fn from_shots(shots: &[usize]) -> Option<Self> {
        let min = *shots.iter().min()?;
        let max = *shots.iter().max()?;
        let n = shots.len() as f64;
        let mean = shots.iter().map(|&s| s as f64).sum::<f64>() / n;
        let variance = shots
            .iter()
            .map(|&s| {
                let d = s as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        Some(Summary {
            matches: shots.len(),
            min,
            max,
            mean,
            std_dev: libm::sqrt(variance),
        })
    }
}
