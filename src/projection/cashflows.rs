//! Output structures for strategy projections

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::recommendation::{recommend, Recommendation};
use crate::error::AnalysisResult;

/// Sales commission on every sale
pub const COMMISSION_RATE: f64 = 0.06;

/// The three mutually exclusive strategies, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Sell the ocean view property as-is and invest the proceeds
    SellOceanView,
    /// Keep both properties and rent the ocean view as-is
    RentOceanView,
    /// Renovate the ocean view, move in, rent out the primary
    RenovateAndMove,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::SellOceanView,
        Strategy::RentOceanView,
        Strategy::RenovateAndMove,
    ];

    /// Display name carried on each projection
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SellOceanView => "Option 1: Sell Ocean View Property As-Is",
            Strategy::RentOceanView => "Option 2: Rent Ocean View As-Is",
            Strategy::RenovateAndMove => "Option 3: Renovate & Move",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Year-indexed summary series for one strategy (index 0 = year 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyProjection {
    pub strategy: Strategy,
    pub name: String,
    pub initial_investment: f64,
    pub net_cashflow: Vec<f64>,
    pub property_values: Vec<f64>,
    pub cumulative_return: Vec<f64>,
    pub npv: f64,
}

impl StrategyProjection {
    pub fn new(strategy: Strategy, initial_investment: f64, years: usize) -> Self {
        Self {
            strategy,
            name: strategy.name().to_string(),
            initial_investment,
            net_cashflow: Vec::with_capacity(years),
            property_values: Vec::with_capacity(years),
            cumulative_return: Vec::with_capacity(years),
            npv: 0.0,
        }
    }

    /// Append one projected year
    pub fn push_year(&mut self, net_cashflow: f64, property_value: f64, cumulative_return: f64) {
        self.net_cashflow.push(net_cashflow);
        self.property_values.push(property_value);
        self.cumulative_return.push(cumulative_return);
    }

    pub fn years(&self) -> usize {
        self.net_cashflow.len()
    }

    pub fn final_cumulative_return(&self) -> Option<f64> {
        self.cumulative_return.last().copied()
    }

    pub fn final_property_value(&self) -> Option<f64> {
        self.property_values.last().copied()
    }

    pub fn total_cashflow(&self) -> f64 {
        self.net_cashflow.iter().sum()
    }
}

/// Option 1 yearly line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellBreakdownRow {
    pub year: u32,
    pub investment_return: f64,
    pub primary_property_tax: f64,
    pub maintenance_expense_primary: f64,
    pub insurance_expense_primary: f64,
    pub misc_expense_primary: f64,
    pub total_primary_expenses: f64,
    pub mortgage: f64,
    pub annual_cashflow: f64,
    pub primary_value_end_of_year: f64,
    pub cumulative_return: f64,
}

/// Option 2 yearly line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentBreakdownRow {
    pub year: u32,
    pub rental_income: f64,
    pub property_management_fee: f64,
    pub primary_property_tax: f64,
    pub ocean_property_tax: f64,
    pub maintenance_expense_primary: f64,
    pub insurance_expense_primary: f64,
    pub misc_expense_primary: f64,
    pub total_primary_expenses: f64,
    pub maintenance_expense_ocean: f64,
    pub insurance_expense_ocean: f64,
    pub misc_expense_ocean: f64,
    pub total_ocean_expenses: f64,
    pub primary_mortgage: f64,
    pub ocean_mortgage: f64,
    pub annual_cashflow: f64,
    pub primary_value_end_of_year: f64,
    pub ocean_value_end_of_year: f64,
    pub cumulative_return: f64,
}

/// Option 3 yearly line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenovateBreakdownRow {
    pub year: u32,
    pub rental_income: f64,
    pub property_management_fee: f64,
    pub primary_property_tax: f64,
    /// Value the ocean view property tax is levied on
    pub ocean_assessed_value: f64,
    pub ocean_property_tax: f64,
    pub maintenance_expense_primary: f64,
    pub insurance_expense_primary: f64,
    pub misc_expense_primary: f64,
    pub total_primary_expenses: f64,
    pub maintenance_expense_ocean: f64,
    pub insurance_expense_ocean: f64,
    pub misc_expense_ocean: f64,
    pub ocean_expenses: f64,
    /// Nonzero in year 1 only
    pub renovation_cost: f64,
    pub primary_mortgage: f64,
    pub ocean_mortgage: f64,
    pub annual_cashflow: f64,
    pub primary_value_end_of_year: f64,
    pub ocean_value_end_of_year: f64,
    pub cumulative_return: f64,
}

/// Line items for every strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyBreakdown {
    pub option1: Vec<SellBreakdownRow>,
    pub option2: Vec<RentBreakdownRow>,
    pub option3: Vec<RenovateBreakdownRow>,
}

/// One-time economics of selling the ocean view property as-is
///
/// Capital gains are not floored here: a sale below basis yields a negative
/// gain and zero tax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleBreakdown {
    pub sale_value: f64,
    pub commission: f64,
    pub net_sale_proceeds: f64,
    pub tax_basis: f64,
    pub capital_gains: f64,
    pub capital_gains_tax: f64,
    pub after_tax_proceeds: f64,
}

impl SaleBreakdown {
    pub fn calculate(sale_value: f64, tax_basis: f64, capital_gains_tax_rate: f64) -> Self {
        let commission = sale_value * COMMISSION_RATE;
        let net_sale_proceeds = sale_value - commission;
        let capital_gains = net_sale_proceeds - tax_basis;
        let capital_gains_tax = if capital_gains > 0.0 {
            capital_gains * capital_gains_tax_rate / 100.0
        } else {
            0.0
        };

        Self {
            sale_value,
            commission,
            net_sale_proceeds,
            tax_basis,
            capital_gains,
            capital_gains_tax,
            after_tax_proceeds: net_sale_proceeds - capital_gains_tax,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub years: u32,
    pub option1: StrategyProjection,
    pub option2: StrategyProjection,
    pub option3: StrategyProjection,
    pub breakdown: StrategyBreakdown,
    pub sale_breakdown: SaleBreakdown,
}

impl ProjectionResult {
    /// The three projections in tie-break order
    pub fn strategies(&self) -> [&StrategyProjection; 3] {
        [&self.option1, &self.option2, &self.option3]
    }

    pub fn get(&self, strategy: Strategy) -> &StrategyProjection {
        match strategy {
            Strategy::SellOceanView => &self.option1,
            Strategy::RentOceanView => &self.option2,
            Strategy::RenovateAndMove => &self.option3,
        }
    }

    /// Strategy with the highest final-year cumulative return
    pub fn recommendation(&self) -> AnalysisResult<Recommendation> {
        recommend(&self.strategies(), self.years as usize)
    }

    /// Get summary statistics
    pub fn summary(&self) -> AnalysisResult<ProjectionSummary> {
        let recommendation = self.recommendation()?;
        let strategies = self
            .strategies()
            .iter()
            .map(|p| StrategySummary {
                strategy: p.strategy,
                name: p.name.clone(),
                initial_investment: p.initial_investment,
                total_cashflow: p.total_cashflow(),
                final_property_value: p.final_property_value().unwrap_or(0.0),
                final_cumulative_return: p.final_cumulative_return().unwrap_or(0.0),
                npv: p.npv,
            })
            .collect();

        Ok(ProjectionSummary {
            years: self.years,
            strategies,
            recommended: recommendation.strategy,
            recommended_name: recommendation.name,
        })
    }
}

/// Per-strategy headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub name: String,
    pub initial_investment: f64,
    pub total_cashflow: f64,
    pub final_property_value: f64,
    pub final_cumulative_return: f64,
    pub npv: f64,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    pub strategies: Vec<StrategySummary>,
    pub recommended: Strategy,
    pub recommended_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sale_below_basis_keeps_negative_gain() {
        let sale = SaleBreakdown::calculate(8_500_000.0, 8_500_000.0, 37.1);
        assert_relative_eq!(sale.commission, 510_000.0, max_relative = 1e-12);
        assert_relative_eq!(sale.net_sale_proceeds, 7_990_000.0, max_relative = 1e-12);
        assert_relative_eq!(sale.capital_gains, -510_000.0, max_relative = 1e-12);
        assert_eq!(sale.capital_gains_tax, 0.0);
        assert_relative_eq!(sale.after_tax_proceeds, 7_990_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_sale_above_basis_is_taxed() {
        let sale = SaleBreakdown::calculate(10_000_000.0, 5_000_000.0, 20.0);
        // 9.4M net, 4.4M gain, 880k tax
        assert_relative_eq!(sale.capital_gains, 4_400_000.0, max_relative = 1e-12);
        assert_relative_eq!(sale.capital_gains_tax, 880_000.0, max_relative = 1e-12);
        assert_relative_eq!(sale.after_tax_proceeds, 8_520_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_strategy_names_and_order() {
        assert_eq!(Strategy::ALL[0].name(), "Option 1: Sell Ocean View Property As-Is");
        assert_eq!(Strategy::ALL[1].to_string(), "Option 2: Rent Ocean View As-Is");
        assert_eq!(Strategy::ALL[2].name(), "Option 3: Renovate & Move");
    }

    #[test]
    fn test_projection_series_accessors() {
        let mut projection = StrategyProjection::new(Strategy::RentOceanView, 0.0, 2);
        assert_eq!(projection.final_cumulative_return(), None);

        projection.push_year(10.0, 100.0, 5.0);
        projection.push_year(20.0, 110.0, 15.0);
        assert_eq!(projection.years(), 2);
        assert_relative_eq!(projection.total_cashflow(), 30.0);
        assert_eq!(projection.final_cumulative_return(), Some(15.0));
        assert_eq!(projection.final_property_value(), Some(110.0));
    }
}
