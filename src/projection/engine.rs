//! Core projection engine for the three strategies
//!
//! Every call recomputes the full horizon from the inputs. Nothing is cached
//! between calls, so identical inputs give bit-identical results.

use crate::assumptions::{growth_factor, FinancialAssumptions};
use crate::error::AnalysisResult;
use crate::property::{OceanViewProperty, PrimaryResidence};
use super::cashflows::{
    ProjectionResult, RenovateBreakdownRow, RentBreakdownRow, SaleBreakdown, SellBreakdownRow,
    Strategy, StrategyBreakdown, StrategyProjection,
};
use super::expenses::{
    compute_primary_expenses, ocean_as_is_expenses, ocean_renovated_expenses,
    ocean_transition_expenses, PrimaryExpenses,
};
use super::npv::net_present_value;

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: FinancialAssumptions,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions
    pub fn new(assumptions: FinancialAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &FinancialAssumptions {
        &self.assumptions
    }

    /// Project all three strategies over the analysis horizon
    pub fn project(
        &self,
        primary: &PrimaryResidence,
        ocean: &OceanViewProperty,
    ) -> AnalysisResult<ProjectionResult> {
        primary.validate()?;
        ocean.validate()?;
        self.assumptions.validate()?;

        let years = self.assumptions.analysis_timeframe_years;

        // Primary costs are the same under every strategy
        let primary_years: Vec<PrimaryExpenses> = (1..=years)
            .map(|year| compute_primary_expenses(primary, &self.assumptions, year))
            .collect();

        let sale_breakdown = SaleBreakdown::calculate(
            ocean.appraised_value_as_is,
            ocean.tax_basis,
            self.assumptions.capital_gains_tax_rate,
        );

        let (option1, sell_rows) = self.project_sell(primary, &sale_breakdown, &primary_years)?;
        let (option2, rent_rows) = self.project_rent(primary, ocean, &primary_years)?;
        let (option3, renovate_rows) = self.project_renovate(primary, ocean, &primary_years)?;

        log::debug!(
            "Projected {} years: NPV sell={:.2} rent={:.2} renovate={:.2}",
            years,
            option1.npv,
            option2.npv,
            option3.npv,
        );

        Ok(ProjectionResult {
            years,
            option1,
            option2,
            option3,
            breakdown: StrategyBreakdown {
                option1: sell_rows,
                option2: rent_rows,
                option3: renovate_rows,
            },
            sale_breakdown,
        })
    }

    /// Option 1: sell the ocean view now, hold the primary, invest the proceeds
    fn project_sell(
        &self,
        primary: &PrimaryResidence,
        sale: &SaleBreakdown,
        primary_years: &[PrimaryExpenses],
    ) -> AnalysisResult<(StrategyProjection, Vec<SellBreakdownRow>)> {
        let a = &self.assumptions;
        let mut projection = StrategyProjection::new(Strategy::SellOceanView, 0.0, primary_years.len());
        let mut rows = Vec::with_capacity(primary_years.len());

        let mortgage = primary.mortgage_annual();
        // Flat return on a fixed pot; not reinvested within the year loop
        let investment_return = sale.after_tax_proceeds * a.investment_return_rate / 100.0;

        for p in primary_years {
            let year = p.year;
            let annual_cashflow = investment_return - p.property_tax - p.total() - mortgage;
            let primary_value = primary.value_end_of_year(year);

            // Compounded proceeds, less `year` years charged at this year's cost rates
            let cumulative_return = sale.after_tax_proceeds
                * (1.0 + a.investment_return_rate / 100.0).powi(year as i32)
                + primary_value
                - primary.current_value
                - (p.property_tax + p.total() + mortgage) * year as f64;

            projection.push_year(annual_cashflow, primary_value, cumulative_return);
            rows.push(SellBreakdownRow {
                year,
                investment_return,
                primary_property_tax: p.property_tax,
                maintenance_expense_primary: p.maintenance(),
                insurance_expense_primary: p.insurance(),
                misc_expense_primary: p.misc(),
                total_primary_expenses: p.total(),
                mortgage,
                annual_cashflow,
                primary_value_end_of_year: primary_value,
                cumulative_return,
            });
        }

        projection.npv = net_present_value(0.0, &projection.net_cashflow, a.discount_rate())?;
        Ok((projection, rows))
    }

    /// Option 2: keep both, rent the ocean view unrenovated
    fn project_rent(
        &self,
        primary: &PrimaryResidence,
        ocean: &OceanViewProperty,
        primary_years: &[PrimaryExpenses],
    ) -> AnalysisResult<(StrategyProjection, Vec<RentBreakdownRow>)> {
        let a = &self.assumptions;
        let mut projection = StrategyProjection::new(Strategy::RentOceanView, 0.0, primary_years.len());
        let mut rows = Vec::with_capacity(primary_years.len());

        let primary_mortgage = primary.mortgage_annual();
        let ocean_mortgage = ocean.mortgage_annual_current();
        let starting_value = primary.current_value + ocean.current_value;

        for p in primary_years {
            let year = p.year;
            let rental_income = ocean.rental_income_monthly_as_is
                * 12.0
                * growth_factor(a.rental_income_annual_increase, year);
            let management_fee = rental_income * a.property_management_fee_percentage / 100.0;

            let ocean_expenses = ocean_as_is_expenses(ocean, a, year);
            let ocean_property_tax = ocean.appraised_value_as_is
                * growth_factor(ocean.annual_appreciation, year)
                * a.property_tax_rate
                / 100.0;

            let annual_cashflow = rental_income
                - management_fee
                - p.property_tax
                - ocean_property_tax
                - p.total()
                - ocean_expenses.total()
                - primary_mortgage
                - ocean_mortgage;

            let primary_value = primary.value_end_of_year(year);
            let ocean_value = ocean.value_end_of_year(year);
            let property_value = primary_value + ocean_value;

            // This year's flow scaled by elapsed years, not a running sum
            let cumulative_return = annual_cashflow * year as f64 + property_value - starting_value;

            projection.push_year(annual_cashflow, property_value, cumulative_return);
            rows.push(RentBreakdownRow {
                year,
                rental_income,
                property_management_fee: management_fee,
                primary_property_tax: p.property_tax,
                ocean_property_tax,
                maintenance_expense_primary: p.maintenance(),
                insurance_expense_primary: p.insurance(),
                misc_expense_primary: p.misc(),
                total_primary_expenses: p.total(),
                maintenance_expense_ocean: ocean_expenses.maintenance,
                insurance_expense_ocean: ocean_expenses.insurance,
                misc_expense_ocean: ocean_expenses.misc,
                total_ocean_expenses: ocean_expenses.total(),
                primary_mortgage,
                ocean_mortgage,
                annual_cashflow,
                primary_value_end_of_year: primary_value,
                ocean_value_end_of_year: ocean_value,
                cumulative_return,
            });
        }

        projection.npv = net_present_value(0.0, &projection.net_cashflow, a.discount_rate())?;
        Ok((projection, rows))
    }

    /// Option 3: renovate the ocean view, move in, rent out the primary
    ///
    /// Year 1 is the transition year: rent on the primary only for the months
    /// after the renovation, blended ocean valuation and upkeep, and the full
    /// renovation cost charged as a cash outflow.
    fn project_renovate(
        &self,
        primary: &PrimaryResidence,
        ocean: &OceanViewProperty,
        primary_years: &[PrimaryExpenses],
    ) -> AnalysisResult<(StrategyProjection, Vec<RenovateBreakdownRow>)> {
        let a = &self.assumptions;
        let mut projection = StrategyProjection::new(
            Strategy::RenovateAndMove,
            ocean.renovation_cost,
            primary_years.len(),
        );
        let mut rows = Vec::with_capacity(primary_years.len());

        let primary_mortgage = primary.mortgage_annual();
        let ocean_mortgage = ocean.mortgage_annual_renovated();
        let starting_value = primary.current_value + ocean.current_value;
        let months_as_is = ocean.renovation_time_months as f64;
        let months_renting = ocean.months_renting() as f64;

        let mut running_cashflow = 0.0;

        for p in primary_years {
            let year = p.year;
            let ocean_appreciation = growth_factor(ocean.annual_appreciation, year);

            let rental_income = if year == 1 {
                primary.rental_income_monthly * months_renting
            } else {
                primary.rental_income_monthly * 12.0 * growth_factor(a.rental_income_annual_increase, year)
            };
            let management_fee = rental_income * a.property_management_fee_percentage / 100.0;

            let (ocean_assessed_value, ocean_expenses, renovation_cost, ocean_value) = if year == 1 {
                let blended = ocean.appraised_value_as_is * (months_as_is / 12.0)
                    + ocean.appraised_value_renovated * (months_renting / 12.0);
                (
                    blended,
                    ocean_transition_expenses(ocean),
                    ocean.renovation_cost,
                    ocean.current_value + ocean.renovation_cost,
                )
            } else {
                (
                    ocean.appraised_value_renovated * ocean_appreciation,
                    ocean_renovated_expenses(ocean, a, year),
                    0.0,
                    ocean.post_renovation_value * ocean_appreciation,
                )
            };
            let ocean_property_tax = ocean_assessed_value * a.property_tax_rate / 100.0;

            let annual_cashflow = rental_income
                - management_fee
                - p.property_tax
                - ocean_property_tax
                - p.total()
                - ocean_expenses.total()
                - renovation_cost
                - primary_mortgage
                - ocean_mortgage;
            running_cashflow += annual_cashflow;

            let primary_value = primary.value_end_of_year(year);
            let property_value = primary_value + ocean_value;
            let cumulative_return = running_cashflow + property_value - starting_value;

            projection.push_year(annual_cashflow, property_value, cumulative_return);
            rows.push(RenovateBreakdownRow {
                year,
                rental_income,
                property_management_fee: management_fee,
                primary_property_tax: p.property_tax,
                ocean_assessed_value,
                ocean_property_tax,
                maintenance_expense_primary: p.maintenance(),
                insurance_expense_primary: p.insurance(),
                misc_expense_primary: p.misc(),
                total_primary_expenses: p.total(),
                maintenance_expense_ocean: ocean_expenses.maintenance,
                insurance_expense_ocean: ocean_expenses.insurance,
                misc_expense_ocean: ocean_expenses.misc,
                ocean_expenses: ocean_expenses.total(),
                renovation_cost,
                primary_mortgage,
                ocean_mortgage,
                annual_cashflow,
                primary_value_end_of_year: primary_value,
                ocean_value_end_of_year: ocean_value,
                cumulative_return,
            });
        }

        // Renovation is sunk at time 0 and again shows up in the year-1 flow
        projection.npv = net_present_value(
            -ocean.renovation_cost,
            &projection.net_cashflow,
            a.discount_rate(),
        )?;
        Ok((projection, rows))
    }
}

/// Project all three strategies for one set of inputs
pub fn project(
    primary: &PrimaryResidence,
    ocean: &OceanViewProperty,
    assumptions: &FinancialAssumptions,
) -> AnalysisResult<ProjectionResult> {
    ProjectionEngine::new(assumptions.clone()).project(primary, ocean)
}
