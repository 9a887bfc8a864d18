//! Sale economics across the analysis horizon
//!
//! For each future year, what a sale of each valuation track would fetch
//! after commission and capital-gains tax. Unlike the one-time sale in the
//! projection engine, gains here are floored at zero.

use serde::{Deserialize, Serialize};

use crate::assumptions::{growth_factor, DEFAULT_ANALYSIS_YEARS, MAX_ANALYSIS_YEARS};
use crate::error::{ensure_finite, ensure_non_negative, AnalysisError, AnalysisResult};
use crate::projection::COMMISSION_RATE;

/// Default capital-gains rate for the sale table (federal 23.8% + state 13.3%)
pub const DEFAULT_CAPITAL_GAINS_TAX_RATE: f64 = 37.1;

/// Primary residence inputs for the sale table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleHorizonPrimary {
    pub current_value: f64,
    pub annual_appreciation: f64,
    pub tax_basis: f64,
}

impl Default for SaleHorizonPrimary {
    fn default() -> Self {
        Self {
            current_value: 7_500_000.0,
            annual_appreciation: 4.0,
            tax_basis: 3_400_000.0,
        }
    }
}

impl SaleHorizonPrimary {
    pub fn validate(&self) -> AnalysisResult<()> {
        ensure_non_negative("sales.primary.currentValue", self.current_value)?;
        ensure_non_negative("sales.primary.taxBasis", self.tax_basis)?;
        ensure_finite("sales.primary.annualAppreciation", self.annual_appreciation)
    }
}

/// Ocean view inputs for the sale table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleHorizonOcean {
    pub current_value: f64,
    pub annual_appreciation: f64,
    pub tax_basis_as_is: f64,
    pub tax_basis_renovated: f64,
    pub post_renovation_value: f64,
}

impl Default for SaleHorizonOcean {
    fn default() -> Self {
        Self {
            current_value: 14_000_000.0,
            annual_appreciation: 4.0,
            tax_basis_as_is: 8_500_000.0,
            tax_basis_renovated: 13_500_000.0,
            post_renovation_value: 18_000_000.0,
        }
    }
}

impl SaleHorizonOcean {
    pub fn validate(&self) -> AnalysisResult<()> {
        ensure_non_negative("sales.ocean.currentValue", self.current_value)?;
        ensure_non_negative("sales.ocean.taxBasisAsIs", self.tax_basis_as_is)?;
        ensure_non_negative("sales.ocean.taxBasisRenovated", self.tax_basis_renovated)?;
        ensure_non_negative("sales.ocean.postRenovationValue", self.post_renovation_value)?;
        ensure_finite("sales.ocean.annualAppreciation", self.annual_appreciation)
    }
}

/// Sale-table section of the input document
///
/// Kept apart from the projection entities: the sale table carries its own
/// valuations and one tax basis per ocean view condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleHorizonInputs {
    pub primary: SaleHorizonPrimary,
    pub ocean: SaleHorizonOcean,
}

impl SaleHorizonInputs {
    pub fn validate(&self) -> AnalysisResult<()> {
        self.primary.validate()?;
        self.ocean.validate()
    }
}

/// Sale of one valuation track in one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSale {
    pub sale_price: f64,
    pub commission: f64,
    /// Constant per track
    pub taxable_basis: f64,
    /// Never negative
    pub capital_gains: f64,
    pub taxes: f64,
    pub net_proceeds: f64,
}

impl TrackSale {
    /// Sell a property worth `base_value` today in projection year `year`
    pub fn at_year(
        base_value: f64,
        appreciation_pct: f64,
        taxable_basis: f64,
        capital_gains_tax_rate: f64,
        year: u32,
    ) -> Self {
        let sale_price = base_value * growth_factor(appreciation_pct, year);
        let commission = sale_price * COMMISSION_RATE;
        let capital_gains = (sale_price - commission - taxable_basis).max(0.0);
        let taxes = capital_gains * capital_gains_tax_rate / 100.0;

        Self {
            sale_price,
            commission,
            taxable_basis,
            capital_gains,
            taxes,
            net_proceeds: sale_price - commission - taxes,
        }
    }
}

/// Sale economics of all three tracks in one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleHorizonRow {
    pub year: u32,
    pub primary: TrackSale,
    pub ocean_as_is: TrackSale,
    pub ocean_renovated: TrackSale,
}

/// Engine for the year-by-year sale table
#[derive(Debug, Clone)]
pub struct SaleHorizonEngine {
    capital_gains_tax_rate: f64,
    years: u32,
}

impl Default for SaleHorizonEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CAPITAL_GAINS_TAX_RATE, DEFAULT_ANALYSIS_YEARS)
    }
}

impl SaleHorizonEngine {
    pub fn new(capital_gains_tax_rate: f64, years: u32) -> Self {
        Self {
            capital_gains_tax_rate,
            years,
        }
    }

    /// One row per year, 1 through the horizon
    pub fn project(
        &self,
        primary: &SaleHorizonPrimary,
        ocean: &SaleHorizonOcean,
    ) -> AnalysisResult<Vec<SaleHorizonRow>> {
        self.validate(primary, ocean)?;
        let rate = self.capital_gains_tax_rate;

        let rows: Vec<SaleHorizonRow> = (1..=self.years)
            .map(|year| SaleHorizonRow {
                year,
                primary: TrackSale::at_year(
                    primary.current_value,
                    primary.annual_appreciation,
                    primary.tax_basis,
                    rate,
                    year,
                ),
                ocean_as_is: TrackSale::at_year(
                    ocean.current_value,
                    ocean.annual_appreciation,
                    ocean.tax_basis_as_is,
                    rate,
                    year,
                ),
                ocean_renovated: TrackSale::at_year(
                    ocean.post_renovation_value,
                    ocean.annual_appreciation,
                    ocean.tax_basis_renovated,
                    rate,
                    year,
                ),
            })
            .collect();

        log::debug!("Sale horizon: {} years at {}% capital gains", self.years, rate);
        Ok(rows)
    }

    fn validate(&self, primary: &SaleHorizonPrimary, ocean: &SaleHorizonOcean) -> AnalysisResult<()> {
        if self.years == 0 || self.years > MAX_ANALYSIS_YEARS {
            return Err(AnalysisError::InvalidTimeframe {
                years: i64::from(self.years),
            });
        }
        ensure_non_negative("capitalGainsTaxRate", self.capital_gains_tax_rate)?;
        primary.validate()?;
        ocean.validate()
    }
}

/// Sale table for the given inputs, rate and horizon
pub fn sale_horizon(
    primary: &SaleHorizonPrimary,
    ocean: &SaleHorizonOcean,
    capital_gains_tax_rate: f64,
    years: u32,
) -> AnalysisResult<Vec<SaleHorizonRow>> {
    SaleHorizonEngine::new(capital_gains_tax_rate, years).project(primary, ocean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_primary_year_one() {
        let rows = sale_horizon(
            &SaleHorizonPrimary::default(),
            &SaleHorizonOcean::default(),
            37.1,
            5,
        )
        .unwrap();
        let primary = rows[0].primary;

        assert_eq!(rows[0].year, 1);
        assert_relative_eq!(primary.sale_price, 7_500_000.0, max_relative = 1e-12);
        assert_relative_eq!(primary.commission, 450_000.0, max_relative = 1e-12);
        assert_relative_eq!(primary.capital_gains, 3_650_000.0, max_relative = 1e-12);
        assert_relative_eq!(primary.taxes, 1_354_150.0, max_relative = 1e-12);
        assert_relative_eq!(primary.net_proceeds, 5_695_850.0, max_relative = 1e-12);
        assert_relative_eq!(primary.taxable_basis, 3_400_000.0);
    }

    #[test]
    fn test_one_row_per_year_with_appreciation() {
        let rows = SaleHorizonEngine::default()
            .project(&SaleHorizonPrimary::default(), &SaleHorizonOcean::default())
            .unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows.iter().map(|r| r.year).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_relative_eq!(rows[1].ocean_as_is.sale_price, 14_560_000.0, max_relative = 1e-12);
        assert_relative_eq!(rows[1].ocean_renovated.sale_price, 18_720_000.0, max_relative = 1e-12);
        assert_relative_eq!(rows[4].ocean_renovated.taxable_basis, 13_500_000.0);
    }

    #[test]
    fn test_gains_floored_at_zero() {
        let primary = SaleHorizonPrimary {
            current_value: 1_000_000.0,
            annual_appreciation: -5.0,
            tax_basis: 2_000_000.0,
        };
        let ocean = SaleHorizonOcean {
            tax_basis_as_is: 50_000_000.0,
            tax_basis_renovated: 50_000_000.0,
            ..Default::default()
        };
        let rows = sale_horizon(&primary, &ocean, 37.1, 10).unwrap();

        for row in &rows {
            for track in [row.primary, row.ocean_as_is, row.ocean_renovated] {
                assert!(track.capital_gains >= 0.0);
                assert_eq!(track.taxes, 0.0);
                assert_relative_eq!(track.net_proceeds, track.sale_price * 0.94, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_default_section_renovated_track_year_one() {
        let inputs = SaleHorizonInputs::default();
        let rows = sale_horizon(&inputs.primary, &inputs.ocean, DEFAULT_CAPITAL_GAINS_TAX_RATE, 5).unwrap();
        let renovated = rows[0].ocean_renovated;

        // 18M sale, 1.08M commission, 3.42M gain over the 13.5M basis
        assert_relative_eq!(renovated.taxable_basis, 13_500_000.0);
        assert_relative_eq!(renovated.capital_gains, 3_420_000.0, max_relative = 1e-12);
        assert_relative_eq!(renovated.taxes, 1_268_820.0, max_relative = 1e-12);
        assert_relative_eq!(renovated.net_proceeds, 15_651_180.0, max_relative = 1e-12);
    }

    #[test]
    fn test_section_omitted_fields_keep_defaults() {
        let json = r#"{ "ocean": { "taxBasisRenovated": 12000000 } }"#;
        let inputs: SaleHorizonInputs = serde_json::from_str(json).unwrap();
        assert_relative_eq!(inputs.ocean.tax_basis_renovated, 12_000_000.0);
        assert_relative_eq!(inputs.ocean.tax_basis_as_is, 8_500_000.0);
        assert_eq!(inputs.primary, SaleHorizonPrimary::default());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let primary = SaleHorizonPrimary::default();
        let ocean = SaleHorizonOcean::default();

        assert!(matches!(
            sale_horizon(&primary, &ocean, 37.1, 0),
            Err(AnalysisError::InvalidTimeframe { .. })
        ));
        assert!(matches!(
            sale_horizon(&primary, &ocean, 37.1, MAX_ANALYSIS_YEARS + 1),
            Err(AnalysisError::InvalidTimeframe { .. })
        ));
        assert!(sale_horizon(&primary, &ocean, f64::NAN, 5).is_err());

        let bad = SaleHorizonOcean {
            current_value: f64::INFINITY,
            ..Default::default()
        };
        assert!(sale_horizon(&primary, &bad, 37.1, 5).is_err());
    }

    #[test]
    fn test_deterministic() {
        let run = || {
            sale_horizon(&SaleHorizonPrimary::default(), &SaleHorizonOcean::default(), 37.1, 7).unwrap()
        };
        assert_eq!(run(), run());
    }
}
