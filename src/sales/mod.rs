//! Year-by-year sale economics for each property valuation

mod horizon;

pub use horizon::{
    sale_horizon, SaleHorizonEngine, SaleHorizonInputs, SaleHorizonOcean, SaleHorizonPrimary, SaleHorizonRow, TrackSale,
    DEFAULT_CAPITAL_GAINS_TAX_RATE,
};
