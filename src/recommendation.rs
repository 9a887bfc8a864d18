//! Pick the strategy with the best final-year cumulative return

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::projection::{Strategy, StrategyProjection};

/// Outcome of the selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub strategy: Strategy,
    pub name: String,
    /// Cumulative return of the winner in the final projected year
    pub cumulative_return: f64,
}

/// Select the projection whose cumulative return at index `years - 1` is strictly greatest
///
/// Ties go to the earlier projection in `projections`, so passing them in
/// option order gives Option 1 > 2 > 3. Every series must cover `years`.
pub fn recommend(projections: &[&StrategyProjection], years: usize) -> AnalysisResult<Recommendation> {
    if years == 0 {
        return Err(AnalysisError::InvalidTimeframe { years: 0 });
    }

    let mut best: Option<(&StrategyProjection, f64)> = None;
    for &projection in projections {
        let value = projection
            .cumulative_return
            .get(years - 1)
            .copied()
            .ok_or_else(|| AnalysisError::IncompleteSeries {
                strategy: projection.name.clone(),
                expected: years,
                actual: projection.cumulative_return.len(),
            })?;

        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((projection, value)),
        }
    }

    let (winner, cumulative_return) = best.ok_or_else(|| {
        AnalysisError::invalid_input("projections", 0, "at least one strategy is required")
    })?;

    Ok(Recommendation {
        strategy: winner.strategy,
        name: winner.name.clone(),
        cumulative_return,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(strategy: Strategy, returns: &[f64]) -> StrategyProjection {
        let mut p = StrategyProjection::new(strategy, 0.0, returns.len());
        for &r in returns {
            p.push_year(0.0, 0.0, r);
        }
        p
    }

    #[test]
    fn test_highest_final_return_wins() {
        let o1 = projection(Strategy::SellOceanView, &[0.0, 0.0, 0.0, 0.0, 100.0]);
        let o2 = projection(Strategy::RentOceanView, &[0.0, 0.0, 0.0, 0.0, 300.0]);
        let o3 = projection(Strategy::RenovateAndMove, &[0.0, 0.0, 0.0, 0.0, 200.0]);

        let rec = recommend(&[&o1, &o2, &o3], 5).unwrap();
        assert_eq!(rec.strategy, Strategy::RentOceanView);
        assert_eq!(rec.name, "Option 2: Rent Ocean View As-Is");
        assert_eq!(rec.cumulative_return, 300.0);
    }

    #[test]
    fn test_option1_named_like_its_projection() {
        let o1 = projection(Strategy::SellOceanView, &[500.0]);
        let o2 = projection(Strategy::RentOceanView, &[100.0]);

        let rec = recommend(&[&o1, &o2], 1).unwrap();
        assert_eq!(rec.name, o1.name);
        assert_eq!(rec.name, "Option 1: Sell Ocean View Property As-Is");
    }

    #[test]
    fn test_ties_go_to_earlier_option() {
        let o1 = projection(Strategy::SellOceanView, &[50.0]);
        let o2 = projection(Strategy::RentOceanView, &[80.0]);
        let o3 = projection(Strategy::RenovateAndMove, &[80.0]);

        let rec = recommend(&[&o1, &o2, &o3], 1).unwrap();
        assert_eq!(rec.strategy, Strategy::RentOceanView);

        let rec = recommend(&[&o3, &o1], 1).unwrap();
        assert_eq!(rec.strategy, Strategy::RenovateAndMove);
    }

    #[test]
    fn test_uses_configured_year_not_last_entry() {
        let o1 = projection(Strategy::SellOceanView, &[10.0, 1.0]);
        let o2 = projection(Strategy::RentOceanView, &[5.0, 50.0]);

        assert_eq!(recommend(&[&o1, &o2], 1).unwrap().strategy, Strategy::SellOceanView);
        assert_eq!(recommend(&[&o1, &o2], 2).unwrap().strategy, Strategy::RentOceanView);
    }

    #[test]
    fn test_short_series_is_an_error() {
        let o1 = projection(Strategy::SellOceanView, &[1.0, 2.0, 3.0]);
        let o2 = projection(Strategy::RentOceanView, &[1.0, 2.0]);

        let err = recommend(&[&o1, &o2], 3).unwrap_err();
        assert!(matches!(err, AnalysisError::IncompleteSeries { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_zero_years_or_no_projections_is_an_error() {
        let o1 = projection(Strategy::SellOceanView, &[1.0]);
        assert!(recommend(&[&o1], 0).is_err());
        assert!(recommend(&[], 1).is_err());
    }
}
