//! Genre table and genre-probability vector
//!
//! The inference model emits one probability per genre, index-aligned to
//! the fixed ordering below. That ordering is part of the external
//! contract with the model and must never be reordered independently.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of genres the inference model scores.
///
/// Older client documentation mentioned 10 genres, but the inference
/// response validator has always enforced 9; 9 is authoritative.
pub const GENRE_COUNT: usize = 9;

/// A single genre known to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Genre {
    /// Short stable code (e.g. "BLS", "POP")
    pub code: &'static str,
    /// Display name
    pub name: &'static str,
}

/// The 9 genres, in model output order.
pub const GENRES: [Genre; GENRE_COUNT] = [
    Genre { code: "BLS", name: "Blues" },
    Genre { code: "CLA", name: "Classical" },
    Genre { code: "JZZ", name: "Jazz" },
    Genre { code: "MTL", name: "Metal" },
    Genre { code: "POP", name: "Pop" },
    Genre { code: "RAP", name: "Rap" },
    Genre { code: "RCK", name: "Rock" },
    Genre { code: "R&B", name: "R&B" },
    Genre { code: "TEC", name: "Techno/Electronic" },
];

/// Look up a genre by its short code
pub fn genre_by_code(code: &str) -> Option<&'static Genre> {
    GENRES.iter().find(|g| g.code == code)
}

/// A genre paired with its predicted probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenreProbability {
    pub genre: Genre,
    pub probability: f64,
}

/// Ordered vector of exactly [`GENRE_COUNT`] probabilities.
///
/// Values are conceptually in [0, 1] but are not required to sum to 1;
/// only the length is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityVector(Vec<f64>);

impl ProbabilityVector {
    /// Validate length and wrap. Any length other than [`GENRE_COUNT`]
    /// is rejected.
    pub fn from_vec(values: Vec<f64>) -> Result<Self> {
        if values.len() != GENRE_COUNT {
            return Err(Error::InvalidInput(format!(
                "expected {} probabilities, got {}",
                GENRE_COUNT,
                values.len()
            )));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// The `n` highest-probability genres, highest first.
    pub fn top(&self, n: usize) -> Vec<GenreProbability> {
        let mut ranked: Vec<GenreProbability> = self
            .0
            .iter()
            .zip(GENRES.iter())
            .map(|(&probability, &genre)| GenreProbability { genre, probability })
            .collect();
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }
}

/// Format a probability as a percentage string, e.g. "45.3%"
pub fn format_percentage(probability: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_nine_values() {
        let v = ProbabilityVector::from_vec(vec![0.1; GENRE_COUNT]).unwrap();
        assert_eq!(v.as_slice().len(), GENRE_COUNT);
    }

    #[test]
    fn rejects_eight_and_ten_values() {
        assert!(ProbabilityVector::from_vec(vec![0.1; 8]).is_err());
        assert!(ProbabilityVector::from_vec(vec![0.1; 10]).is_err());
        assert!(ProbabilityVector::from_vec(vec![]).is_err());
    }

    #[test]
    fn top_ranks_highest_first() {
        let probs = vec![0.1, 0.05, 0.3, 0.05, 0.2, 0.1, 0.05, 0.15, 0.0];
        let v = ProbabilityVector::from_vec(probs).unwrap();
        let top3 = v.top(3);
        assert_eq!(top3.len(), 3);
        assert_eq!(top3[0].genre.code, "JZZ");
        assert_eq!(top3[1].genre.code, "POP");
        assert_eq!(top3[2].genre.code, "R&B");
    }

    #[test]
    fn genre_lookup_by_code() {
        assert_eq!(genre_by_code("POP").unwrap().name, "Pop");
        assert!(genre_by_code("XXX").is_none());
    }

    #[test]
    fn percentage_formatting() {
        assert_eq!(format_percentage(0.453, 1), "45.3%");
        assert_eq!(format_percentage(1.0, 0), "100%");
    }
}
