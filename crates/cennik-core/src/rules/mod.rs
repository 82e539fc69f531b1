//! Table-driven extraction rules for tariff text blobs.

pub mod dates;
pub mod matcher;
pub mod money;
pub mod promo;

pub use dates::{extract_date_range, DateRange};
pub use matcher::{match_prices, CaptureSlot, FeeRule, PriceGrid, PriceRule};
pub use money::parse_pln_amount;
pub use promo::{scan_promo, PromoRule, PromoScan, PromoSpec};
