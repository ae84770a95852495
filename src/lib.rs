pub mod adapter;
pub mod config;
pub mod fetch;
pub mod formatter;
pub mod report;
pub mod resolver;
pub mod types;

pub use adapter::adapt;
pub use config::{Config, DateStyle, FormatConfig, Locale};
pub use fetch::{FetchState, OFFICIAL_RESULTS_URL};
pub use formatter::{DisplayFormatter, LocaleFormatter, format_currency, format_date};
pub use report::{DrawReport, TierLine, render_text};
pub use resolver::{TierStats, resolve_tier, tier_stats};
pub use types::{DateValue, DrawResult, HitCount, PrizeTier};
