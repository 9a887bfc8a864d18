//! Load analysis inputs from JSON and apply field overrides from CSV

use csv::Reader;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::assumptions::FinancialAssumptions;
use crate::error::{AnalysisError, AnalysisResult};
use super::data::{OceanViewProperty, PrimaryResidence};
use crate::sales::SaleHorizonInputs;
use super::fields::{AssumptionField, FieldUpdate, OceanField, PrimaryField, SaleField};

/// Complete input set for one projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisInputs {
    pub primary: PrimaryResidence,
    pub ocean: OceanViewProperty,
    pub assumptions: FinancialAssumptions,
    /// Inputs of the year-by-year sale table
    pub sales: SaleHorizonInputs,
}

impl AnalysisInputs {
    /// Validate every section
    pub fn validate(&self) -> AnalysisResult<()> {
        self.primary.validate()?;
        self.ocean.validate()?;
        self.assumptions.validate()?;
        self.sales.validate()
    }

    /// Return a copy with one field override applied
    pub fn with_override(&self, field_override: FieldOverride) -> AnalysisResult<Self> {
        let mut updated = self.clone();
        match field_override {
            FieldOverride::Primary(field, value) => {
                updated.primary = self.primary.apply_field(field, value)?;
            }
            FieldOverride::Ocean(field, value) => {
                updated.ocean = self.ocean.apply_field(field, value)?;
            }
            FieldOverride::Assumption(field, value) => {
                updated.assumptions = self.assumptions.apply_field(field, value)?;
            }
            FieldOverride::Sales(field, value) => {
                updated.sales = self.sales.apply_field(field, value)?;
            }
        }
        Ok(updated)
    }
}

/// A single typed field change on one of the input entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldOverride {
    Primary(PrimaryField, f64),
    Ocean(OceanField, f64),
    Assumption(AssumptionField, f64),
    Sales(SaleField, f64),
}

impl FieldOverride {
    /// Build from the textual `entity,field,value` form
    pub fn parse(entity: &str, field: &str, value: f64) -> AnalysisResult<Self> {
        match entity.trim() {
            PrimaryField::ENTITY => Ok(FieldOverride::Primary(field.parse()?, value)),
            OceanField::ENTITY => Ok(FieldOverride::Ocean(field.parse()?, value)),
            AssumptionField::ENTITY => Ok(FieldOverride::Assumption(field.parse()?, value)),
            SaleField::ENTITY => Ok(FieldOverride::Sales(field.parse()?, value)),
            other => Err(AnalysisError::unknown_field("inputs", other)),
        }
    }
}

/// Raw CSV row of an override file
#[derive(Debug, Deserialize)]
struct OverrideRow {
    entity: String,
    field: String,
    value: f64,
}

/// Read a JSON input document; omitted fields keep their defaults
pub fn load_inputs(path: &Path) -> AnalysisResult<AnalysisInputs> {
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    let inputs: AnalysisInputs = serde_json::from_str(&contents)?;
    log::debug!("Loaded inputs from {}", path.display());
    Ok(inputs)
}

/// Apply every row of an `entity,field,value` CSV to `inputs`, in file order
pub fn load_overrides(path: &Path, inputs: AnalysisInputs) -> AnalysisResult<AnalysisInputs> {
    let file = File::open(path)?;
    apply_overrides_from_reader(file, inputs)
}

/// Reader-based form of [`load_overrides`]
pub fn apply_overrides_from_reader<R: Read>(
    reader: R,
    mut inputs: AnalysisInputs,
) -> AnalysisResult<AnalysisInputs> {
    let mut reader = Reader::from_reader(reader);
    let mut applied = 0usize;

    for result in reader.deserialize() {
        let row: OverrideRow = result?;
        let field_override = FieldOverride::parse(&row.entity, &row.field, row.value)?;
        inputs = inputs.with_override(field_override)?;
        applied += 1;
    }

    log::debug!("Applied {} field overrides", applied);
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::SaleHorizonEngine;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_input_document() {
        let json = r#"{
            "primary": { "currentValue": 8000000 },
            "assumptions": { "analysisTimeframeYears": 10, "inflationRate": 2.5 }
        }"#;
        let inputs: AnalysisInputs = serde_json::from_str(json).unwrap();
        assert_relative_eq!(inputs.primary.current_value, 8_000_000.0);
        assert_relative_eq!(inputs.primary.appraised_value, 3_700_000.0);
        assert_eq!(inputs.assumptions.analysis_timeframe_years, 10);
        assert_eq!(inputs.ocean, OceanViewProperty::default());
        assert_eq!(inputs.sales, SaleHorizonInputs::default());
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_parse_sales_section() {
        let json = r#"{
            "sales": {
                "primary": { "taxBasis": 3000000 },
                "ocean": { "taxBasisAsIs": 9000000, "taxBasisRenovated": 14000000 }
            }
        }"#;
        let inputs: AnalysisInputs = serde_json::from_str(json).unwrap();
        assert_relative_eq!(inputs.sales.primary.tax_basis, 3_000_000.0);
        assert_relative_eq!(inputs.sales.primary.current_value, 7_500_000.0);
        assert_relative_eq!(inputs.sales.ocean.tax_basis_as_is, 9_000_000.0);
        assert_relative_eq!(inputs.sales.ocean.tax_basis_renovated, 14_000_000.0);

        let bad = r#"{ "sales": { "ocean": { "taxBasisRenovated": -1 } } }"#;
        let inputs: AnalysisInputs = serde_json::from_str(bad).unwrap();
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_default_sale_table_renovated_taxes() {
        let inputs = AnalysisInputs::default();
        let rows = SaleHorizonEngine::new(
            inputs.assumptions.capital_gains_tax_rate,
            inputs.assumptions.analysis_timeframe_years,
        )
        .project(&inputs.sales.primary, &inputs.sales.ocean)
        .unwrap();

        assert_eq!(rows.len(), 5);
        assert_relative_eq!(rows[0].ocean_renovated.taxable_basis, 13_500_000.0);
        assert_relative_eq!(rows[0].ocean_renovated.taxes, 1_268_820.0, max_relative = 1e-12);
    }

    #[test]
    fn test_apply_overrides_in_order() {
        let csv = "entity,field,value\n\
                   primary,insuranceYearly,20000\n\
                   ocean,renovationTimeMonths,6\n\
                   assumptions,inflationRate,2\n\
                   assumptions,inflationRate,4\n\
                   sales,taxBasisRenovated,12500000\n";
        let inputs = apply_overrides_from_reader(csv.as_bytes(), AnalysisInputs::default()).unwrap();
        assert_relative_eq!(inputs.primary.insurance_yearly, 20_000.0);
        assert_eq!(inputs.ocean.renovation_time_months, 6);
        assert_relative_eq!(inputs.assumptions.inflation_rate, 4.0);
        assert_relative_eq!(inputs.sales.ocean.tax_basis_renovated, 12_500_000.0);
    }

    #[test]
    fn test_with_override_leaves_original_untouched() {
        let inputs = AnalysisInputs::default();
        let updated = inputs
            .with_override(FieldOverride::Assumption(AssumptionField::PropertyTaxRate, 2.0))
            .unwrap();
        assert_relative_eq!(updated.assumptions.property_tax_rate, 2.0);
        assert_relative_eq!(inputs.assumptions.property_tax_rate, 1.25);

        let rejected = inputs.with_override(FieldOverride::Primary(PrimaryField::TaxBasis, f64::NAN));
        assert!(rejected.is_err());
    }

    #[test]
    fn test_unknown_entity_or_field_fails() {
        let csv = "entity,field,value\nbarn,currentValue,1\n";
        assert!(apply_overrides_from_reader(csv.as_bytes(), AnalysisInputs::default()).is_err());

        let csv = "entity,field,value\nocean,poolDepth,1\n";
        let err = apply_overrides_from_reader(csv.as_bytes(), AnalysisInputs::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownField { .. }));
    }

    #[test]
    fn test_non_numeric_value_fails() {
        let csv = "entity,field,value\nprimary,currentValue,lots\n";
        let err = apply_overrides_from_reader(csv.as_bytes(), AnalysisInputs::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Csv(_)));
    }
}
