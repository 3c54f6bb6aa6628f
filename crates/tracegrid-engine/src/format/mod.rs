//! Pure display formatting for timestamps, durations, costs and labels.

pub mod cost;
pub mod duration;
pub mod text;
pub mod time;

pub use cost::format_cost;
pub use duration::{format_seconds, ms_to_time};
pub use text::{capitalize, truncate};
pub use time::{
    Viewer, format_date_time, format_time_of_day, is_today, locale_from_env, parse_locale,
    time_of_day_or_date,
};
