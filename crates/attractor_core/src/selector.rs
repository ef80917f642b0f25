use crate::error::{AttractorError, Result};
use crate::traits::Selector;
use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand::Rng;

/// Allowed deviation of a probability table's sum from one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Picks each of `n` indices with probability 1/n.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSelector {
    count: usize,
}

impl UniformSelector {
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(AttractorError::EmptyMapSet);
        }
        Ok(Self { count })
    }
}

impl Selector for UniformSelector {
    fn choice_count(&self) -> usize {
        self.count
    }

    fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        Uniform::from(0..self.count).sample(rng)
    }
}

/// Inverse-CDF sampling over a fixed probability table.
///
/// Zero-weight entries are never selected.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSelector {
    probabilities: Vec<f64>,
    distribution: WeightedIndex<f64>,
}

impl WeightedSelector {
    pub fn new(probabilities: &[f64]) -> Result<Self> {
        validate_probabilities(probabilities)?;
        let distribution = WeightedIndex::new(probabilities)
            .map_err(|e| AttractorError::MalformedProbabilityTable(e.to_string()))?;
        Ok(Self {
            probabilities: probabilities.to_vec(),
            distribution,
        })
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
}

impl Selector for WeightedSelector {
    fn choice_count(&self) -> usize {
        self.probabilities.len()
    }

    fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.distribution.sample(rng)
    }
}

fn validate_probabilities(probabilities: &[f64]) -> Result<()> {
    if probabilities.is_empty() {
        return Err(AttractorError::MalformedProbabilityTable(
            "table is empty".to_string(),
        ));
    }
    for (index, &p) in probabilities.iter().enumerate() {
        if !p.is_finite() || p < 0.0 {
            return Err(AttractorError::MalformedProbabilityTable(format!(
                "entry {index} is {p}, expected a finite non-negative value"
            )));
        }
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(AttractorError::MalformedProbabilityTable(format!(
            "probabilities sum to {total}, expected 1"
        )));
    }
    Ok(())
}
