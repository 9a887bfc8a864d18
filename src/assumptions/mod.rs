//! Macroeconomic and financial assumptions shared by every strategy

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{ensure_finite, ensure_non_negative, AnalysisError, AnalysisResult};

/// Default analysis horizon in years
pub const DEFAULT_ANALYSIS_YEARS: u32 = 5;

/// Longest horizon the engines accept
pub const MAX_ANALYSIS_YEARS: u32 = 1000;

/// All rates are percentages stored as plain numbers (7.5 means 7.5%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialAssumptions {
    /// Return on reinvested sale proceeds, also the NPV discount rate
    pub investment_return_rate: f64,

    /// Carried for completeness; mortgage payments are entered directly
    pub mortgage_interest_rate: f64,

    pub inflation_rate: f64,
    pub capital_gains_tax_rate: f64,
    pub property_tax_rate: f64,
    pub analysis_timeframe_years: u32,
    pub rental_income_annual_increase: f64,
    pub property_management_fee_percentage: f64,
}

impl Default for FinancialAssumptions {
    fn default() -> Self {
        Self {
            investment_return_rate: 7.5,
            mortgage_interest_rate: 6.5,
            inflation_rate: 3.0,
            capital_gains_tax_rate: 37.1,
            property_tax_rate: 1.25,
            analysis_timeframe_years: DEFAULT_ANALYSIS_YEARS,
            rental_income_annual_increase: 3.0,
            property_management_fee_percentage: 8.0,
        }
    }
}

impl FinancialAssumptions {
    /// Discount rate as a decimal
    pub fn discount_rate(&self) -> f64 {
        self.investment_return_rate / 100.0
    }

    /// Inflation multiplier for projection year `year` (1 in year 1)
    pub fn inflation_factor(&self, year: u32) -> f64 {
        growth_factor(self.inflation_rate, year)
    }

    /// Analysis horizon as a collection length
    pub fn years(&self) -> usize {
        self.analysis_timeframe_years as usize
    }

    /// Check the assumptions at the engine boundary
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.analysis_timeframe_years == 0 || self.analysis_timeframe_years > MAX_ANALYSIS_YEARS {
            return Err(AnalysisError::InvalidTimeframe {
                years: i64::from(self.analysis_timeframe_years),
            });
        }

        ensure_finite("investmentReturnRate", self.investment_return_rate)?;
        if self.investment_return_rate <= -100.0 {
            return Err(AnalysisError::InvalidDiscountRate {
                rate: self.investment_return_rate,
            });
        }

        ensure_finite("mortgageInterestRate", self.mortgage_interest_rate)?;
        ensure_finite("inflationRate", self.inflation_rate)?;
        ensure_finite("rentalIncomeAnnualIncrease", self.rental_income_annual_increase)?;
        ensure_non_negative("capitalGainsTaxRate", self.capital_gains_tax_rate)?;
        ensure_non_negative("propertyTaxRate", self.property_tax_rate)?;
        ensure_non_negative(
            "propertyManagementFeePercentage",
            self.property_management_fee_percentage,
        )?;
        Ok(())
    }

    /// Apply overrides from the process environment
    ///
    /// Recognised variables: ANALYSIS_YEARS, INVESTMENT_RETURN_RATE,
    /// INFLATION_RATE, CAPITAL_GAINS_TAX_RATE, PROPERTY_TAX_RATE.
    /// Unparseable values leave the current setting unchanged.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(years) = env_var::<u32>("ANALYSIS_YEARS") {
            self.analysis_timeframe_years = years;
        }
        if let Some(rate) = env_var::<f64>("INVESTMENT_RETURN_RATE") {
            self.investment_return_rate = rate;
        }
        if let Some(rate) = env_var::<f64>("INFLATION_RATE") {
            self.inflation_rate = rate;
        }
        if let Some(rate) = env_var::<f64>("CAPITAL_GAINS_TAX_RATE") {
            self.capital_gains_tax_rate = rate;
        }
        if let Some(rate) = env_var::<f64>("PROPERTY_TAX_RATE") {
            self.property_tax_rate = rate;
        }
        self
    }
}

/// Compound growth over `year - 1` full years at `rate_pct` percent
pub fn growth_factor(rate_pct: f64, year: u32) -> f64 {
    (1.0 + rate_pct / 100.0).powi(year as i32 - 1)
}

fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring unparseable {}={}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let assumptions = FinancialAssumptions::default();
        assert!(assumptions.validate().is_ok());
        assert_eq!(assumptions.years(), 5);
        assert_relative_eq!(assumptions.discount_rate(), 0.075);
    }

    #[test]
    fn test_growth_factor_starts_at_one() {
        assert_relative_eq!(growth_factor(4.0, 1), 1.0);
        assert_relative_eq!(growth_factor(4.0, 2), 1.04);
        assert_relative_eq!(growth_factor(4.0, 3), 1.0816, max_relative = 1e-12);
        assert_relative_eq!(growth_factor(-3.0, 2), 0.97);
    }

    #[test]
    fn test_zero_timeframe_rejected() {
        let assumptions = FinancialAssumptions {
            analysis_timeframe_years: 0,
            ..Default::default()
        };
        assert!(matches!(
            assumptions.validate(),
            Err(AnalysisError::InvalidTimeframe { years: 0 })
        ));
    }

    #[test]
    fn test_timeframe_above_cap_rejected() {
        let assumptions = FinancialAssumptions {
            analysis_timeframe_years: 4_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            assumptions.validate(),
            Err(AnalysisError::InvalidTimeframe { years: 4_000_000_000 })
        ));

        let assumptions = FinancialAssumptions {
            analysis_timeframe_years: MAX_ANALYSIS_YEARS,
            ..Default::default()
        };
        assert!(assumptions.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        // Only test in the crate that touches these variables
        env::set_var("ANALYSIS_YEARS", "10");
        env::set_var("INVESTMENT_RETURN_RATE", "6.25");
        env::set_var("INFLATION_RATE", "not-a-number");
        env::set_var("PROPERTY_TAX_RATE", " 1.5 ");
        env::remove_var("CAPITAL_GAINS_TAX_RATE");

        let assumptions = FinancialAssumptions::default().with_env_overrides();

        for name in ["ANALYSIS_YEARS", "INVESTMENT_RETURN_RATE", "INFLATION_RATE", "PROPERTY_TAX_RATE"] {
            env::remove_var(name);
        }

        assert_eq!(assumptions.analysis_timeframe_years, 10);
        assert_relative_eq!(assumptions.investment_return_rate, 6.25);
        assert_relative_eq!(assumptions.inflation_rate, 3.0);
        assert_relative_eq!(assumptions.property_tax_rate, 1.5);
        assert_relative_eq!(assumptions.capital_gains_tax_rate, 37.1);
    }

    #[test]
    fn test_discount_rate_at_minus_100_rejected() {
        let assumptions = FinancialAssumptions {
            investment_return_rate: -100.0,
            ..Default::default()
        };
        assert!(matches!(
            assumptions.validate(),
            Err(AnalysisError::InvalidDiscountRate { .. })
        ));

        let assumptions = FinancialAssumptions {
            investment_return_rate: -99.0,
            ..Default::default()
        };
        assert!(assumptions.validate().is_ok());
    }

    #[test]
    fn test_nan_rate_rejected() {
        let assumptions = FinancialAssumptions {
            inflation_rate: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            assumptions.validate(),
            Err(AnalysisError::InvalidInput { .. })
        ));
    }
}
