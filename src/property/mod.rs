//! Property inputs: the two properties, typed field updates and loaders

mod data;
pub mod fields;
pub mod loader;

pub use data::{OceanViewProperty, PrimaryResidence, UpkeepCosts, MAX_RENOVATION_MONTHS};
pub use fields::{apply_field, AssumptionField, FieldUpdate, OceanField, PrimaryField, SaleField};
pub use loader::{load_inputs, load_overrides, AnalysisInputs, FieldOverride};
