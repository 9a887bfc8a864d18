//! Typed single-field updates
//!
//! Input layers edit one named field at a time. Each entity gets an enum of
//! its numeric keys (parsed from the camelCase names used in input files)
//! and `apply_field` returns an updated copy, leaving the original untouched
//! when the update is rejected.

use std::fmt;
use std::str::FromStr;

use crate::assumptions::{FinancialAssumptions, MAX_ANALYSIS_YEARS};
use crate::error::{ensure_finite, AnalysisError, AnalysisResult};
use crate::sales::SaleHorizonInputs;
use super::data::{OceanViewProperty, PrimaryResidence};

/// Entities that accept typed field updates
pub trait FieldUpdate: Sized + Clone {
    type Field: Copy;

    /// Return a copy with `field` set to `value`
    fn apply_field(&self, field: Self::Field, value: f64) -> AnalysisResult<Self>;
}

/// Declares a field enum with its camelCase key table
macro_rules! field_keys {
    ($(#[$meta:meta])* $name:ident, $entity:literal { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every key, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Entity name used in error messages and override files
            pub const ENTITY: &'static str = $entity;

            /// The camelCase key
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl FromStr for $name {
            type Err = AnalysisError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($key => Ok($name::$variant),)+
                    other => Err(AnalysisError::unknown_field($entity, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

field_keys!(
    /// Numeric fields of [`PrimaryResidence`]
    PrimaryField, "primary" {
        CurrentValue => "currentValue",
        AppraisedValue => "appraisedValue",
        TaxBasis => "taxBasis",
        RentalIncomeMonthly => "rentalIncomeMonthly",
        AnnualAppreciation => "annualAppreciation",
        MaintenancePoolMonthly => "maintenancePoolMonthly",
        MaintenanceGardeningMonthly => "maintenanceGardeningMonthly",
        MaintenanceUtilitiesMonthly => "maintenanceUtilitiesMonthly",
        MaintenanceOtherUpkeepMonthly => "maintenanceOtherUpkeepMonthly",
        InsuranceYearly => "insuranceYearly",
        MiscMaintenancePercent => "miscMaintenancePercent",
        MortgagePaymentMonthly => "mortgagePaymentMonthly",
    }
);

field_keys!(
    /// Numeric fields of [`OceanViewProperty`]
    OceanField, "ocean" {
        CurrentValue => "currentValue",
        AppraisedValueAsIs => "appraisedValueAsIs",
        AppraisedValueRenovated => "appraisedValueRenovated",
        TaxBasis => "taxBasis",
        RenovationCost => "renovationCost",
        PostRenovationValue => "postRenovationValue",
        RentalIncomeMonthlyAsIs => "rentalIncomeMonthlyAsIs",
        RentalIncomeMonthlyRenovated => "rentalIncomeMonthlyRenovated",
        AnnualAppreciation => "annualAppreciation",
        MaintenancePoolMonthlyAsIs => "maintenancePoolMonthlyAsIs",
        MaintenanceGardeningMonthlyAsIs => "maintenanceGardeningMonthlyAsIs",
        MaintenanceUtilitiesMonthlyAsIs => "maintenanceUtilitiesMonthlyAsIs",
        MaintenanceOtherUpkeepMonthlyAsIs => "maintenanceOtherUpkeepMonthlyAsIs",
        InsuranceYearlyAsIs => "insuranceYearlyAsIs",
        MiscMaintenancePercentAsIs => "miscMaintenancePercentAsIs",
        MaintenancePoolMonthlyRenovated => "maintenancePoolMonthlyRenovated",
        MaintenanceGardeningMonthlyRenovated => "maintenanceGardeningMonthlyRenovated",
        MaintenanceUtilitiesMonthlyRenovated => "maintenanceUtilitiesMonthlyRenovated",
        MaintenanceOtherUpkeepMonthlyRenovated => "maintenanceOtherUpkeepMonthlyRenovated",
        InsuranceYearlyRenovated => "insuranceYearlyRenovated",
        MiscMaintenancePercentRenovated => "miscMaintenancePercentRenovated",
        RenovationTimeMonths => "renovationTimeMonths",
        MortgagePaymentMonthlyCurrent => "mortgagePaymentMonthlyCurrent",
        MortgagePaymentMonthlyRenovated => "mortgagePaymentMonthlyRenovated",
    }
);

field_keys!(
    /// Numeric fields of [`FinancialAssumptions`]
    AssumptionField, "assumptions" {
        InvestmentReturnRate => "investmentReturnRate",
        MortgageInterestRate => "mortgageInterestRate",
        InflationRate => "inflationRate",
        CapitalGainsTaxRate => "capitalGainsTaxRate",
        PropertyTaxRate => "propertyTaxRate",
        AnalysisTimeframeYears => "analysisTimeframeYears",
        RentalIncomeAnnualIncrease => "rentalIncomeAnnualIncrease",
        PropertyManagementFeePercentage => "propertyManagementFeePercentage",
    }
);

field_keys!(
    /// Numeric fields of the sale-table section, [`SaleHorizonInputs`]
    SaleField, "sales" {
        PrimaryCurrentValue => "primaryCurrentValue",
        PrimaryAnnualAppreciation => "primaryAnnualAppreciation",
        PrimaryTaxBasis => "primaryTaxBasis",
        OceanCurrentValue => "oceanCurrentValue",
        OceanAnnualAppreciation => "oceanAnnualAppreciation",
        TaxBasisAsIs => "taxBasisAsIs",
        TaxBasisRenovated => "taxBasisRenovated",
        PostRenovationValue => "postRenovationValue",
    }
);

/// Integer fields take the truncated value, like an integer parse of the input
fn whole_number(entity: &str, key: &str, value: f64) -> AnalysisResult<u32> {
    let truncated = value.trunc();
    if truncated < 0.0 || truncated > u32::MAX as f64 {
        return Err(AnalysisError::invalid_input(
            format!("{}.{}", entity, key),
            value,
            "must be a non-negative whole number",
        ));
    }
    Ok(truncated as u32)
}

impl FieldUpdate for PrimaryResidence {
    type Field = PrimaryField;

    fn apply_field(&self, field: PrimaryField, value: f64) -> AnalysisResult<Self> {
        ensure_finite(field.key(), value)?;

        let mut updated = self.clone();
        let slot = match field {
            PrimaryField::CurrentValue => &mut updated.current_value,
            PrimaryField::AppraisedValue => &mut updated.appraised_value,
            PrimaryField::TaxBasis => &mut updated.tax_basis,
            PrimaryField::RentalIncomeMonthly => &mut updated.rental_income_monthly,
            PrimaryField::AnnualAppreciation => &mut updated.annual_appreciation,
            PrimaryField::MaintenancePoolMonthly => &mut updated.maintenance_pool_monthly,
            PrimaryField::MaintenanceGardeningMonthly => &mut updated.maintenance_gardening_monthly,
            PrimaryField::MaintenanceUtilitiesMonthly => &mut updated.maintenance_utilities_monthly,
            PrimaryField::MaintenanceOtherUpkeepMonthly => &mut updated.maintenance_other_upkeep_monthly,
            PrimaryField::InsuranceYearly => &mut updated.insurance_yearly,
            PrimaryField::MiscMaintenancePercent => &mut updated.misc_maintenance_percent,
            PrimaryField::MortgagePaymentMonthly => &mut updated.mortgage_payment_monthly,
        };
        *slot = value;
        Ok(updated)
    }
}

impl FieldUpdate for OceanViewProperty {
    type Field = OceanField;

    fn apply_field(&self, field: OceanField, value: f64) -> AnalysisResult<Self> {
        ensure_finite(field.key(), value)?;

        let mut updated = self.clone();
        let slot = match field {
            OceanField::RenovationTimeMonths => {
                updated.renovation_time_months = whole_number(OceanField::ENTITY, field.key(), value)?;
                return Ok(updated);
            }
            OceanField::CurrentValue => &mut updated.current_value,
            OceanField::AppraisedValueAsIs => &mut updated.appraised_value_as_is,
            OceanField::AppraisedValueRenovated => &mut updated.appraised_value_renovated,
            OceanField::TaxBasis => &mut updated.tax_basis,
            OceanField::RenovationCost => &mut updated.renovation_cost,
            OceanField::PostRenovationValue => &mut updated.post_renovation_value,
            OceanField::RentalIncomeMonthlyAsIs => &mut updated.rental_income_monthly_as_is,
            OceanField::RentalIncomeMonthlyRenovated => &mut updated.rental_income_monthly_renovated,
            OceanField::AnnualAppreciation => &mut updated.annual_appreciation,
            OceanField::MaintenancePoolMonthlyAsIs => &mut updated.maintenance_pool_monthly_as_is,
            OceanField::MaintenanceGardeningMonthlyAsIs => &mut updated.maintenance_gardening_monthly_as_is,
            OceanField::MaintenanceUtilitiesMonthlyAsIs => &mut updated.maintenance_utilities_monthly_as_is,
            OceanField::MaintenanceOtherUpkeepMonthlyAsIs => &mut updated.maintenance_other_upkeep_monthly_as_is,
            OceanField::InsuranceYearlyAsIs => &mut updated.insurance_yearly_as_is,
            OceanField::MiscMaintenancePercentAsIs => &mut updated.misc_maintenance_percent_as_is,
            OceanField::MaintenancePoolMonthlyRenovated => &mut updated.maintenance_pool_monthly_renovated,
            OceanField::MaintenanceGardeningMonthlyRenovated => &mut updated.maintenance_gardening_monthly_renovated,
            OceanField::MaintenanceUtilitiesMonthlyRenovated => &mut updated.maintenance_utilities_monthly_renovated,
            OceanField::MaintenanceOtherUpkeepMonthlyRenovated => &mut updated.maintenance_other_upkeep_monthly_renovated,
            OceanField::InsuranceYearlyRenovated => &mut updated.insurance_yearly_renovated,
            OceanField::MiscMaintenancePercentRenovated => &mut updated.misc_maintenance_percent_renovated,
            OceanField::MortgagePaymentMonthlyCurrent => &mut updated.mortgage_payment_monthly_current,
            OceanField::MortgagePaymentMonthlyRenovated => &mut updated.mortgage_payment_monthly_renovated,
        };
        *slot = value;
        Ok(updated)
    }
}

impl FieldUpdate for FinancialAssumptions {
    type Field = AssumptionField;

    fn apply_field(&self, field: AssumptionField, value: f64) -> AnalysisResult<Self> {
        ensure_finite(field.key(), value)?;

        let mut updated = self.clone();
        let slot = match field {
            AssumptionField::AnalysisTimeframeYears => {
                if value.trunc() < 1.0 || value.trunc() > f64::from(MAX_ANALYSIS_YEARS) {
                    return Err(AnalysisError::InvalidTimeframe { years: value.trunc() as i64 });
                }
                updated.analysis_timeframe_years =
                    whole_number(AssumptionField::ENTITY, field.key(), value)?;
                return Ok(updated);
            }
            AssumptionField::InvestmentReturnRate => &mut updated.investment_return_rate,
            AssumptionField::MortgageInterestRate => &mut updated.mortgage_interest_rate,
            AssumptionField::InflationRate => &mut updated.inflation_rate,
            AssumptionField::CapitalGainsTaxRate => &mut updated.capital_gains_tax_rate,
            AssumptionField::PropertyTaxRate => &mut updated.property_tax_rate,
            AssumptionField::RentalIncomeAnnualIncrease => &mut updated.rental_income_annual_increase,
            AssumptionField::PropertyManagementFeePercentage => {
                &mut updated.property_management_fee_percentage
            }
        };
        *slot = value;
        Ok(updated)
    }
}

impl FieldUpdate for SaleHorizonInputs {
    type Field = SaleField;

    fn apply_field(&self, field: SaleField, value: f64) -> AnalysisResult<Self> {
        ensure_finite(field.key(), value)?;

        let mut updated = self.clone();
        let slot = match field {
            SaleField::PrimaryCurrentValue => &mut updated.primary.current_value,
            SaleField::PrimaryAnnualAppreciation => &mut updated.primary.annual_appreciation,
            SaleField::PrimaryTaxBasis => &mut updated.primary.tax_basis,
            SaleField::OceanCurrentValue => &mut updated.ocean.current_value,
            SaleField::OceanAnnualAppreciation => &mut updated.ocean.annual_appreciation,
            SaleField::TaxBasisAsIs => &mut updated.ocean.tax_basis_as_is,
            SaleField::TaxBasisRenovated => &mut updated.ocean.tax_basis_renovated,
            SaleField::PostRenovationValue => &mut updated.ocean.post_renovation_value,
        };
        *slot = value;
        Ok(updated)
    }
}

/// Free-function form of [`FieldUpdate::apply_field`]
pub fn apply_field<E: FieldUpdate>(entity: &E, field: E::Field, value: f64) -> AnalysisResult<E> {
    entity.apply_field(field, value)
}
