pub mod api;
pub mod load_resources;
pub mod paths;
pub mod utils;

// Re-export the amount codec for callers that only need conversions
pub use utils::token_conversion::{
    add_token_balances, format_balance, parse_units, AmountError, BaseUnitAmount, FormatOptions,
};
