use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Shortest supported projection horizon (5 years)
pub const MIN_HORIZON_MONTHS: u32 = 60;

/// Longest supported projection horizon (40 years)
pub const MAX_HORIZON_MONTHS: u32 = 480;

/// Allocation drift beyond this many percentage points triggers a rebalance recommendation
pub const DRIFT_THRESHOLD_PCT: Decimal = dec!(5);

/// A snapshot whose category values miss its total by more than this is flagged
pub const RECONCILIATION_TOLERANCE: Decimal = dec!(1);

/// Decimal precision for contribution-rate comparisons
pub const CENT_PRECISION: u32 = 2;

/// Decimal precision for reported percentages
pub const PCT_PRECISION: u32 = 2;

pub const MONTHS_PER_YEAR: u32 = 12;
