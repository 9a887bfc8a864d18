//! Property Analyzer - multi-year decision engine for a two-property portfolio
//!
//! This library provides:
//! - Projections of three strategies for an ocean-view property: sell, rent, renovate and move
//! - NPV and per-year cost breakdowns for each strategy
//! - A year-by-year sale table for the primary residence and the ocean-view property
//! - Recommendation of the strategy with the best final-year cumulative return
//! - Typed field updates, JSON/CSV input loading and multi-scenario sweeps

pub mod error;
pub mod property;
pub mod assumptions;
pub mod projection;
pub mod sales;
pub mod recommendation;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{AnalysisError, AnalysisResult};
pub use property::{AnalysisInputs, FieldOverride, OceanViewProperty, PrimaryResidence};
pub use assumptions::FinancialAssumptions;
pub use projection::{project, ProjectionEngine, ProjectionResult, Strategy, StrategyProjection};
pub use sales::{sale_horizon, SaleHorizonEngine, SaleHorizonInputs, SaleHorizonRow};
pub use recommendation::{recommend, Recommendation};
pub use scenario::{Scenario, ScenarioRunner};
