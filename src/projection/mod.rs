//! Multi-year projection engine for the sell / rent / renovate strategies

mod engine;
mod cashflows;
pub mod expenses;
pub mod npv;

pub use engine::{project, ProjectionEngine};
pub use cashflows::{
    ProjectionResult, ProjectionSummary, RenovateBreakdownRow, RentBreakdownRow, SaleBreakdown,
    SellBreakdownRow, Strategy, StrategyBreakdown, StrategyProjection, StrategySummary,
    COMMISSION_RATE,
};
pub use expenses::{compute_primary_expenses, ExpenseBundle, PrimaryExpenses};
pub use npv::net_present_value;
