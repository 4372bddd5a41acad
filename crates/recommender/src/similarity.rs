//! Pearson correlation between two users' rating rows.
//!
//! Only movies both users rated take part, and the means are taken over
//! those co-rated movies alone. The result is undefined (`None`) when the
//! users share fewer than [`MIN_CO_RATED`] movies, or when either user gave
//! the same rating to every shared movie (zero variance).

use data_loader::MovieId;
use std::collections::BTreeMap;

/// Minimum number of co-rated movies for a correlation to be defined
pub const MIN_CO_RATED: usize = 2;

/// A defined correlation and the overlap it was computed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    /// Pearson coefficient in [-1, 1]
    pub coefficient: f64,
    pub co_rated: usize,
}

/// Pearson coefficient between two rating rows, if defined
pub fn pearson(a: &BTreeMap<MovieId, f64>, b: &BTreeMap<MovieId, f64>) -> Option<f64> {
    correlation(a, b).map(|c| c.coefficient)
}

/// Pearson correlation between two rating rows, with the co-rated count
///
/// Symmetric bit for bit: the co-rated pairs are always visited in movie
/// order whichever row is scanned, so `correlation(a, b)` and
/// `correlation(b, a)` perform the same floating point operations.
pub fn correlation(
    a: &BTreeMap<MovieId, f64>,
    b: &BTreeMap<MovieId, f64>,
) -> Option<Correlation> {
    // Scan the shorter row, look up in the longer one
    let pairs: Vec<(f64, f64)> = if a.len() <= b.len() {
        a.iter()
            .filter_map(|(movie, &x)| b.get(movie).map(|&y| (x, y)))
            .collect()
    } else {
        b.iter()
            .filter_map(|(movie, &y)| a.get(movie).map(|&x| (x, y)))
            .collect()
    };

    if pairs.len() < MIN_CO_RATED {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let coefficient = (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0);
    Some(Correlation {
        coefficient,
        co_rated: pairs.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ratings: &[(&str, f64)]) -> BTreeMap<MovieId, f64> {
        ratings
            .iter()
            .map(|&(movie, rating)| (movie.to_string(), rating))
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let a = row(&[("M1", 1.0), ("M2", 2.0), ("M3", 3.0)]);
        let up = row(&[("M1", 2.0), ("M2", 4.0), ("M3", 6.0)]);
        let down = row(&[("M1", 5.0), ("M2", 3.0), ("M3", 1.0)]);

        assert_close(pearson(&a, &up).unwrap(), 1.0);
        assert_close(pearson(&a, &down).unwrap(), -1.0);
    }

    #[test]
    fn test_partial_correlation() {
        let a = row(&[("M1", 1.0), ("M2", 2.0), ("M3", 3.0), ("M4", 4.0)]);
        let b = row(&[("M1", 2.0), ("M2", 1.0), ("M3", 4.0), ("M4", 3.0)]);

        assert_close(pearson(&a, &b).unwrap(), 0.6);
    }

    #[test]
    fn test_only_co_rated_movies_count() {
        // M9 and M8 are rated by one side only and must not shift the means
        let a = row(&[("M1", 1.0), ("M2", 2.0), ("M9", 5.0)]);
        let b = row(&[("M1", 3.0), ("M2", 4.0), ("M8", 1.0)]);

        let c = correlation(&a, &b).unwrap();
        assert_close(c.coefficient, 1.0);
        assert_eq!(c.co_rated, 2);
    }

    #[test]
    fn test_undefined_below_two_co_rated() {
        let a = row(&[("M1", 5.0), ("M2", 1.0)]);
        let b = row(&[("M1", 4.0), ("M3", 2.0)]);
        let empty = row(&[]);

        assert_eq!(pearson(&a, &b), None);
        assert_eq!(pearson(&a, &empty), None);
    }

    #[test]
    fn test_undefined_for_constant_ratings() {
        let flat = row(&[("M1", 4.0), ("M2", 4.0), ("M3", 4.0)]);
        let varied = row(&[("M1", 1.0), ("M2", 3.0), ("M3", 5.0)]);

        assert_eq!(pearson(&flat, &varied), None);
        assert_eq!(pearson(&varied, &flat), None);
    }

    #[test]
    fn test_symmetry() {
        let a = row(&[("M1", 4.5), ("M2", 1.0), ("M3", 3.0), ("M4", 2.0), ("M5", 5.0)]);
        let b = row(&[("M1", 3.0), ("M2", 2.5), ("M3", 4.0), ("M5", 4.0)]);

        assert_eq!(pearson(&a, &b), pearson(&b, &a));
        assert!(pearson(&a, &b).is_some());
    }
}
