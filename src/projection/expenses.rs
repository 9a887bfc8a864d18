//! Per-year expense bundles shared by the strategy loops

use serde::{Deserialize, Serialize};

use crate::assumptions::{growth_factor, FinancialAssumptions};
use crate::property::{OceanViewProperty, PrimaryResidence, UpkeepCosts};

/// Carrying costs of one property for one projection year
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBundle {
    pub maintenance: f64,
    pub insurance: f64,
    pub misc: f64,
}

impl ExpenseBundle {
    pub fn total(&self) -> f64 {
        self.maintenance + self.insurance + self.misc
    }

    /// Full-year upkeep: maintenance and insurance inflate, misc tracks `misc_base_value`
    fn full_year(upkeep: &UpkeepCosts, inflation_factor: f64, misc_base_value: f64) -> Self {
        Self {
            maintenance: upkeep.monthly_maintenance() * 12.0 * inflation_factor,
            insurance: upkeep.insurance_yearly * inflation_factor,
            misc: upkeep.misc_maintenance_percent / 100.0 * misc_base_value,
        }
    }

    fn add(self, other: ExpenseBundle) -> Self {
        Self {
            maintenance: self.maintenance + other.maintenance,
            insurance: self.insurance + other.insurance,
            misc: self.misc + other.misc,
        }
    }
}

/// Primary residence costs for one year; identical across all strategies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimaryExpenses {
    pub year: u32,
    pub expenses: ExpenseBundle,
    pub property_tax: f64,
}

impl PrimaryExpenses {
    pub fn maintenance(&self) -> f64 {
        self.expenses.maintenance
    }

    pub fn insurance(&self) -> f64 {
        self.expenses.insurance
    }

    pub fn misc(&self) -> f64 {
        self.expenses.misc
    }

    pub fn total(&self) -> f64 {
        self.expenses.total()
    }
}

/// Primary residence maintenance, insurance, misc and property tax for `year`
pub fn compute_primary_expenses(
    primary: &PrimaryResidence,
    assumptions: &FinancialAssumptions,
    year: u32,
) -> PrimaryExpenses {
    let appreciation = growth_factor(primary.annual_appreciation, year);
    let expenses = ExpenseBundle::full_year(
        &primary.upkeep(),
        assumptions.inflation_factor(year),
        primary.current_value * appreciation,
    );
    let property_tax = primary.appraised_value * appreciation * assumptions.property_tax_rate / 100.0;

    PrimaryExpenses {
        year,
        expenses,
        property_tax,
    }
}

/// Ocean view costs while held unrenovated for a full year
pub fn ocean_as_is_expenses(
    ocean: &OceanViewProperty,
    assumptions: &FinancialAssumptions,
    year: u32,
) -> ExpenseBundle {
    ExpenseBundle::full_year(
        &ocean.as_is_upkeep(),
        assumptions.inflation_factor(year),
        ocean.current_value * growth_factor(ocean.annual_appreciation, year),
    )
}

/// Ocean view costs in a post-renovation year; misc tracks the post-renovation value
pub fn ocean_renovated_expenses(
    ocean: &OceanViewProperty,
    assumptions: &FinancialAssumptions,
    year: u32,
) -> ExpenseBundle {
    ExpenseBundle::full_year(
        &ocean.renovated_upkeep(),
        assumptions.inflation_factor(year),
        ocean.post_renovation_value * growth_factor(ocean.annual_appreciation, year),
    )
}

/// Ocean view costs in the renovation year, split by months in each condition
///
/// Nothing is inflated here: the year-1 inflation factor is always 1.
pub fn ocean_transition_expenses(ocean: &OceanViewProperty) -> ExpenseBundle {
    let months_as_is = ocean.renovation_time_months as f64;
    let months_renovated = ocean.months_renting() as f64;
    let as_is_share = months_as_is / 12.0;
    let renovated_share = months_renovated / 12.0;

    let as_is = ocean.as_is_upkeep();
    let as_is_bundle = ExpenseBundle {
        maintenance: as_is.monthly_maintenance() * months_as_is,
        insurance: as_is.insurance_yearly * as_is_share,
        // Value under renovation accrues the renovation spend pro rata
        misc: as_is.misc_maintenance_percent / 100.0
            * ((ocean.current_value + ocean.renovation_cost * as_is_share) * as_is_share),
    };

    let renovated = ocean.renovated_upkeep();
    let renovated_bundle = ExpenseBundle {
        maintenance: renovated.monthly_maintenance() * months_renovated,
        insurance: renovated.insurance_yearly * renovated_share,
        misc: renovated.misc_maintenance_percent / 100.0 * (ocean.post_renovation_value * renovated_share),
    };

    as_is_bundle.add(renovated_bundle)
}
