//! Scenario runner for batch and sensitivity projections
//!
//! Holds a base input set and re-projects it under field overrides. Batches
//! fan out across threads; each projection is itself pure and sequential, so
//! results match a one-at-a-time run exactly.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::AnalysisResult;
use crate::projection::{ProjectionEngine, ProjectionResult, Strategy};
use crate::property::{AnalysisInputs, AssumptionField, FieldOverride};
use crate::recommendation::Recommendation;

/// A labelled set of overrides applied on top of the base inputs
#[derive(Debug, Clone)]
pub struct Scenario {
    pub label: String,
    pub overrides: Vec<FieldOverride>,
}

impl Scenario {
    pub fn new(label: impl Into<String>, overrides: Vec<FieldOverride>) -> Self {
        Self {
            label: label.into(),
            overrides,
        }
    }
}

/// One point of a single-assumption sensitivity sweep
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub field: String,
    pub value: f64,
    pub recommendation: Recommendation,
    /// Final-year cumulative return per strategy, in option order
    pub final_cumulative_returns: [f64; 3],
    pub npvs: [f64; 3],
}

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(AnalysisInputs::default());
/// let points = runner.sweep(AssumptionField::InvestmentReturnRate, &[5.0, 7.5, 10.0])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_inputs: AnalysisInputs,
}

impl ScenarioRunner {
    pub fn new(base_inputs: AnalysisInputs) -> Self {
        Self { base_inputs }
    }

    /// Project the base inputs
    pub fn run(&self) -> AnalysisResult<ProjectionResult> {
        project_inputs(&self.base_inputs)
    }

    /// Project every scenario; the first failing scenario fails the batch
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> AnalysisResult<Vec<(String, ProjectionResult)>> {
        log::info!("Running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| -> AnalysisResult<(String, ProjectionResult)> {
                let inputs = scenario
                    .overrides
                    .iter()
                    .try_fold(self.base_inputs.clone(), |inputs, o| inputs.with_override(*o))?;
                Ok((scenario.label.clone(), project_inputs(&inputs)?))
            })
            .collect()
    }

    /// Re-project the base case once per value of one assumption
    pub fn sweep(&self, field: AssumptionField, values: &[f64]) -> AnalysisResult<Vec<SweepPoint>> {
        log::info!("Sweeping {} over {} values", field, values.len());
        values
            .par_iter()
            .map(|&value| -> AnalysisResult<SweepPoint> {
                let inputs = self
                    .base_inputs
                    .with_override(FieldOverride::Assumption(field, value))?;
                let result = project_inputs(&inputs)?;
                let recommendation = result.recommendation()?;
                let [o1, o2, o3] = result.strategies();

                Ok(SweepPoint {
                    field: field.key().to_string(),
                    value,
                    recommendation,
                    final_cumulative_returns: [
                        o1.final_cumulative_return().unwrap_or(0.0),
                        o2.final_cumulative_return().unwrap_or(0.0),
                        o3.final_cumulative_return().unwrap_or(0.0),
                    ],
                    npvs: [o1.npv, o2.npv, o3.npv],
                })
            })
            .collect()
    }

    /// Strategies recommended across a sweep, in sweep order
    pub fn recommended_strategies(points: &[SweepPoint]) -> Vec<Strategy> {
        points.iter().map(|p| p.recommendation.strategy).collect()
    }

    pub fn inputs(&self) -> &AnalysisInputs {
        &self.base_inputs
    }

    pub fn inputs_mut(&mut self) -> &mut AnalysisInputs {
        &mut self.base_inputs
    }
}

fn project_inputs(inputs: &AnalysisInputs) -> AnalysisResult<ProjectionResult> {
    ProjectionEngine::new(inputs.assumptions.clone()).project(&inputs.primary, &inputs.ocean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::OceanField;
    use approx::assert_relative_eq;

    #[test]
    fn test_run_matches_direct_projection() {
        let runner = ScenarioRunner::default();
        let direct = crate::projection::project(
            &runner.inputs().primary,
            &runner.inputs().ocean,
            &runner.inputs().assumptions,
        )
        .unwrap();
        assert_eq!(runner.run().unwrap(), direct);
    }

    #[test]
    fn test_scenarios_keep_order_and_labels() {
        let runner = ScenarioRunner::default();
        let scenarios = vec![
            Scenario::new("base", vec![]),
            Scenario::new(
                "quick renovation",
                vec![FieldOverride::Ocean(OceanField::RenovationTimeMonths, 0.0)],
            ),
            Scenario::new(
                "ten years",
                vec![FieldOverride::Assumption(AssumptionField::AnalysisTimeframeYears, 10.0)],
            ),
        ];

        let results = runner.run_scenarios(&scenarios).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "base");
        assert_eq!(results[2].1.option1.net_cashflow.len(), 10);
        // Finishing the renovation sooner brings in primary rent during year 1
        assert!(results[1].1.option3.net_cashflow[0] > results[0].1.option3.net_cashflow[0]);
    }

    #[test]
    fn test_failing_scenario_fails_batch() {
        let runner = ScenarioRunner::default();
        let scenarios = vec![Scenario::new(
            "bad",
            vec![FieldOverride::Assumption(AssumptionField::AnalysisTimeframeYears, 0.0)],
        )];
        assert!(runner.run_scenarios(&scenarios).is_err());
    }

    #[test]
    fn test_sweep_investment_return() {
        let runner = ScenarioRunner::default();
        let values = [2.0, 7.5, 12.0];
        let points = runner.sweep(AssumptionField::InvestmentReturnRate, &values).unwrap();

        assert_eq!(points.len(), 3);
        for (point, value) in points.iter().zip(values) {
            assert_eq!(point.value, value);
            assert_eq!(point.field, "investmentReturnRate");
        }
        // Selling gains most from a higher return on the proceeds
        assert!(points[2].final_cumulative_returns[0] > points[0].final_cumulative_returns[0]);
        // Rent and renovate carry no reinvested pot
        assert_relative_eq!(
            points[0].final_cumulative_returns[1],
            points[2].final_cumulative_returns[1],
            max_relative = 1e-12
        );
        assert_eq!(ScenarioRunner::recommended_strategies(&points).len(), 3);
    }

    #[test]
    fn test_sweep_matches_sequential_run() {
        let mut runner = ScenarioRunner::default();
        runner.inputs_mut().assumptions.inflation_rate = 2.0;
        let points = runner.sweep(AssumptionField::PropertyTaxRate, &[1.0, 1.5]).unwrap();

        let mut inputs = runner.inputs().clone();
        inputs.assumptions.property_tax_rate = 1.5;
        let sequential = project_inputs(&inputs).unwrap();
        assert_eq!(points[1].npvs[2], sequential.option3.npv);
    }
}
