//! Sample numeric series for the chart tools.

use std::f64::consts::PI;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;

use crate::error::DeckError;

/// Kinds of generated data a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    SineWave,
    Categories,
    Linear,
    Normal,
}

impl FromStr for SampleKind {
    type Err = DeckError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sine_wave" => Ok(SampleKind::SineWave),
            "categories" => Ok(SampleKind::Categories),
            "linear" => Ok(SampleKind::Linear),
            "normal" => Ok(SampleKind::Normal),
            other => Err(DeckError::invalid(format!("Unsupported data type: {other}"))),
        }
    }
}

/// Generated series, shaped after the kind that produced it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SampleSeries {
    Xy { x: Vec<f64>, y: Vec<f64> },
    Categorical {
        categories: Vec<String>,
        values: Vec<f64>,
    },
    Values { values: Vec<f64> },
}

fn linspace(low: f64, high: f64, count: usize) -> Vec<f64> {
    let step = (high - low) / (count.saturating_sub(1).max(1)) as f64;
    (0..count).map(|i| low + step * i as f64).collect()
}

/// Generate `n_points` of the requested kind. A seed makes the output
/// reproducible.
pub fn generate(kind: SampleKind, n_points: usize, seed: Option<u64>) -> SampleSeries {
    let n_points = n_points.max(1);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match kind {
        SampleKind::SineWave => {
            let x = linspace(0.0, 2.0 * PI, n_points);
            let y = x
                .iter()
                .map(|value| {
                    let noise: f64 = rng.sample(StandardNormal);
                    value.sin() + 0.2 * noise
                })
                .collect();
            SampleSeries::Xy { x, y }
        }
        SampleKind::Categories => {
            let categories = (1..=n_points).map(|i| format!("Category {i}")).collect();
            let values = (0..n_points)
                .map(|_| rng.gen_range(0..100) as f64)
                .collect();
            SampleSeries::Categorical { categories, values }
        }
        SampleKind::Linear => {
            let x = linspace(0.0, 10.0, n_points);
            let y = x
                .iter()
                .map(|value| {
                    let noise: f64 = rng.sample(StandardNormal);
                    2.0 * value + 5.0 + noise
                })
                .collect();
            SampleSeries::Xy { x, y }
        }
        SampleKind::Normal => {
            let values = (0..n_points)
                .map(|_| rng.sample::<f64, _>(StandardNormal))
                .collect();
            SampleSeries::Values { values }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "spiral".parse::<SampleKind>().expect_err("unknown");
        assert!(err.to_string().contains("Unsupported data type"));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate(SampleKind::Linear, 16, Some(7));
        let b = generate(SampleKind::Linear, 16, Some(7));
        assert_eq!(a, b);
    }

    #[test]
    fn shapes_match_kinds() {
        match generate(SampleKind::SineWave, 8, Some(1)) {
            SampleSeries::Xy { x, y } => {
                assert_eq!(x.len(), 8);
                assert_eq!(y.len(), 8);
            }
            other => panic!("unexpected shape: {other:?}"),
        }
        match generate(SampleKind::Categories, 3, Some(1)) {
            SampleSeries::Categorical { categories, values } => {
                assert_eq!(categories[0], "Category 1");
                assert!(values.iter().all(|v| (0.0..100.0).contains(v)));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
        match generate(SampleKind::Normal, 5, Some(1)) {
            SampleSeries::Values { values } => assert_eq!(values.len(), 5),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn series_serializes_as_flat_object() {
        let json = serde_json::to_value(generate(SampleKind::SineWave, 2, Some(3)))
            .expect("serialize");
        assert!(json.get("x").is_some());
        assert!(json.get("y").is_some());
    }
}
