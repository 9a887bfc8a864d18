//! Property data structures for the two-property portfolio

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, AnalysisError, AnalysisResult};

/// Longest renovation that still fits inside the first projection year
pub const MAX_RENOVATION_MONTHS: u32 = 12;

/// Recurring upkeep for one property in one condition
///
/// Maintenance components are monthly, insurance is yearly and the misc
/// allowance is a percentage of a property value chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpkeepCosts {
    pub pool_monthly: f64,
    pub gardening_monthly: f64,
    pub utilities_monthly: f64,
    pub other_upkeep_monthly: f64,
    pub insurance_yearly: f64,
    pub misc_maintenance_percent: f64,
}

impl UpkeepCosts {
    /// Sum of the four monthly maintenance components
    pub fn monthly_maintenance(&self) -> f64 {
        self.pool_monthly + self.gardening_monthly + self.utilities_monthly + self.other_upkeep_monthly
    }
}

/// The owner-occupied home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrimaryResidence {
    /// Market value today
    pub current_value: f64,

    /// Assessed value, the property-tax base
    pub appraised_value: f64,

    /// Cost basis for capital gains
    pub tax_basis: f64,

    /// Rent achievable if the home is let out
    pub rental_income_monthly: f64,

    /// Annual appreciation (%)
    pub annual_appreciation: f64,

    pub maintenance_pool_monthly: f64,
    pub maintenance_gardening_monthly: f64,
    pub maintenance_utilities_monthly: f64,
    pub maintenance_other_upkeep_monthly: f64,
    pub insurance_yearly: f64,

    /// Misc maintenance allowance (% of current value, appreciated)
    pub misc_maintenance_percent: f64,

    pub mortgage_payment_monthly: f64,
}

impl Default for PrimaryResidence {
    fn default() -> Self {
        Self {
            current_value: 7_500_000.0,
            appraised_value: 3_700_000.0,
            tax_basis: 3_400_000.0,
            rental_income_monthly: 25_000.0,
            annual_appreciation: 4.0,
            maintenance_pool_monthly: 400.0,
            maintenance_gardening_monthly: 1_000.0,
            maintenance_utilities_monthly: 1_500.0,
            maintenance_other_upkeep_monthly: 2_000.0,
            insurance_yearly: 18_000.0,
            misc_maintenance_percent: 0.5,
            mortgage_payment_monthly: 8_425.46,
        }
    }
}

impl PrimaryResidence {
    /// Upkeep bundle for the home
    pub fn upkeep(&self) -> UpkeepCosts {
        UpkeepCosts {
            pool_monthly: self.maintenance_pool_monthly,
            gardening_monthly: self.maintenance_gardening_monthly,
            utilities_monthly: self.maintenance_utilities_monthly,
            other_upkeep_monthly: self.maintenance_other_upkeep_monthly,
            insurance_yearly: self.insurance_yearly,
            misc_maintenance_percent: self.misc_maintenance_percent,
        }
    }

    /// Mortgage payments for a full year (flat, not inflated)
    pub fn mortgage_annual(&self) -> f64 {
        self.mortgage_payment_monthly * 12.0
    }

    /// Value at the end of projection year `year`
    pub fn value_end_of_year(&self, year: u32) -> f64 {
        self.current_value * (1.0 + self.annual_appreciation / 100.0).powi(year as i32)
    }

    /// Check every field before it reaches an engine
    pub fn validate(&self) -> AnalysisResult<()> {
        let monetary = [
            ("currentValue", self.current_value),
            ("appraisedValue", self.appraised_value),
            ("taxBasis", self.tax_basis),
            ("rentalIncomeMonthly", self.rental_income_monthly),
            ("maintenancePoolMonthly", self.maintenance_pool_monthly),
            ("maintenanceGardeningMonthly", self.maintenance_gardening_monthly),
            ("maintenanceUtilitiesMonthly", self.maintenance_utilities_monthly),
            ("maintenanceOtherUpkeepMonthly", self.maintenance_other_upkeep_monthly),
            ("insuranceYearly", self.insurance_yearly),
            ("miscMaintenancePercent", self.misc_maintenance_percent),
            ("mortgagePaymentMonthly", self.mortgage_payment_monthly),
        ];
        for (field, value) in monetary {
            ensure_non_negative(field, value)?;
        }
        ensure_finite("annualAppreciation", self.annual_appreciation)
    }
}

/// The second property: can be sold, rented as-is, or renovated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OceanViewProperty {
    pub current_value: f64,
    pub appraised_value_as_is: f64,
    pub appraised_value_renovated: f64,
    pub tax_basis: f64,
    pub renovation_cost: f64,
    pub post_renovation_value: f64,
    pub rental_income_monthly_as_is: f64,
    pub rental_income_monthly_renovated: f64,

    /// Annual appreciation (%)
    pub annual_appreciation: f64,

    pub maintenance_pool_monthly_as_is: f64,
    pub maintenance_gardening_monthly_as_is: f64,
    pub maintenance_utilities_monthly_as_is: f64,
    pub maintenance_other_upkeep_monthly_as_is: f64,
    pub insurance_yearly_as_is: f64,
    pub misc_maintenance_percent_as_is: f64,

    pub maintenance_pool_monthly_renovated: f64,
    pub maintenance_gardening_monthly_renovated: f64,
    pub maintenance_utilities_monthly_renovated: f64,
    pub maintenance_other_upkeep_monthly_renovated: f64,
    pub insurance_yearly_renovated: f64,
    pub misc_maintenance_percent_renovated: f64,

    /// Months of year 1 spent under renovation (0-12)
    pub renovation_time_months: u32,

    pub mortgage_payment_monthly_current: f64,
    pub mortgage_payment_monthly_renovated: f64,
}

impl Default for OceanViewProperty {
    fn default() -> Self {
        Self {
            current_value: 14_000_000.0,
            appraised_value_as_is: 8_500_000.0,
            appraised_value_renovated: 13_500_000.0,
            tax_basis: 8_500_000.0,
            renovation_cost: 500_000.0,
            post_renovation_value: 18_000_000.0,
            rental_income_monthly_as_is: 25_000.0,
            rental_income_monthly_renovated: 36_000.0,
            annual_appreciation: 4.0,
            maintenance_pool_monthly_as_is: 400.0,
            maintenance_gardening_monthly_as_is: 1_000.0,
            maintenance_utilities_monthly_as_is: 1_500.0,
            maintenance_other_upkeep_monthly_as_is: 3_000.0,
            insurance_yearly_as_is: 15_000.0,
            misc_maintenance_percent_as_is: 1.0,
            maintenance_pool_monthly_renovated: 400.0,
            maintenance_gardening_monthly_renovated: 1_000.0,
            maintenance_utilities_monthly_renovated: 1_500.0,
            maintenance_other_upkeep_monthly_renovated: 2_000.0,
            insurance_yearly_renovated: 25_000.0,
            misc_maintenance_percent_renovated: 1.0,
            renovation_time_months: MAX_RENOVATION_MONTHS,
            mortgage_payment_monthly_current: 0.0,
            mortgage_payment_monthly_renovated: 0.0,
        }
    }
}

impl OceanViewProperty {
    /// Upkeep while the property is unrenovated
    pub fn as_is_upkeep(&self) -> UpkeepCosts {
        UpkeepCosts {
            pool_monthly: self.maintenance_pool_monthly_as_is,
            gardening_monthly: self.maintenance_gardening_monthly_as_is,
            utilities_monthly: self.maintenance_utilities_monthly_as_is,
            other_upkeep_monthly: self.maintenance_other_upkeep_monthly_as_is,
            insurance_yearly: self.insurance_yearly_as_is,
            misc_maintenance_percent: self.misc_maintenance_percent_as_is,
        }
    }

    /// Upkeep once the renovation is finished
    pub fn renovated_upkeep(&self) -> UpkeepCosts {
        UpkeepCosts {
            pool_monthly: self.maintenance_pool_monthly_renovated,
            gardening_monthly: self.maintenance_gardening_monthly_renovated,
            utilities_monthly: self.maintenance_utilities_monthly_renovated,
            other_upkeep_monthly: self.maintenance_other_upkeep_monthly_renovated,
            insurance_yearly: self.insurance_yearly_renovated,
            misc_maintenance_percent: self.misc_maintenance_percent_renovated,
        }
    }

    /// Months of year 1 the property is not under renovation
    pub fn months_renting(&self) -> u32 {
        MAX_RENOVATION_MONTHS.saturating_sub(self.renovation_time_months)
    }

    pub fn mortgage_annual_current(&self) -> f64 {
        self.mortgage_payment_monthly_current * 12.0
    }

    pub fn mortgage_annual_renovated(&self) -> f64 {
        self.mortgage_payment_monthly_renovated * 12.0
    }

    /// Unrenovated value at the end of projection year `year`
    pub fn value_end_of_year(&self, year: u32) -> f64 {
        self.current_value * (1.0 + self.annual_appreciation / 100.0).powi(year as i32)
    }

    /// Check every field before it reaches an engine
    pub fn validate(&self) -> AnalysisResult<()> {
        let monetary = [
            ("currentValue", self.current_value),
            ("appraisedValueAsIs", self.appraised_value_as_is),
            ("appraisedValueRenovated", self.appraised_value_renovated),
            ("taxBasis", self.tax_basis),
            ("renovationCost", self.renovation_cost),
            ("postRenovationValue", self.post_renovation_value),
            ("rentalIncomeMonthlyAsIs", self.rental_income_monthly_as_is),
            ("rentalIncomeMonthlyRenovated", self.rental_income_monthly_renovated),
            ("maintenancePoolMonthlyAsIs", self.maintenance_pool_monthly_as_is),
            ("maintenanceGardeningMonthlyAsIs", self.maintenance_gardening_monthly_as_is),
            ("maintenanceUtilitiesMonthlyAsIs", self.maintenance_utilities_monthly_as_is),
            ("maintenanceOtherUpkeepMonthlyAsIs", self.maintenance_other_upkeep_monthly_as_is),
            ("insuranceYearlyAsIs", self.insurance_yearly_as_is),
            ("miscMaintenancePercentAsIs", self.misc_maintenance_percent_as_is),
            ("maintenancePoolMonthlyRenovated", self.maintenance_pool_monthly_renovated),
            ("maintenanceGardeningMonthlyRenovated", self.maintenance_gardening_monthly_renovated),
            ("maintenanceUtilitiesMonthlyRenovated", self.maintenance_utilities_monthly_renovated),
            ("maintenanceOtherUpkeepMonthlyRenovated", self.maintenance_other_upkeep_monthly_renovated),
            ("insuranceYearlyRenovated", self.insurance_yearly_renovated),
            ("miscMaintenancePercentRenovated", self.misc_maintenance_percent_renovated),
            ("mortgagePaymentMonthlyCurrent", self.mortgage_payment_monthly_current),
            ("mortgagePaymentMonthlyRenovated", self.mortgage_payment_monthly_renovated),
        ];
        for (field, value) in monetary {
            ensure_non_negative(field, value)?;
        }
        ensure_finite("annualAppreciation", self.annual_appreciation)?;

        if self.renovation_time_months > MAX_RENOVATION_MONTHS {
            return Err(AnalysisError::invalid_input(
                "renovationTimeMonths",
                self.renovation_time_months,
                "must be between 0 and 12",
            ));
        }
        Ok(())
    }
}
