use chrono::{DateTime, Locale, Utc};
use chrono_tz::Tz;

/// Locale used when the viewer's cannot be determined
pub const FALLBACK_LOCALE: Locale = Locale::en_US;

/// Who is looking at the table: their clock, time zone and locale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub now: DateTime<Utc>,
    pub tz: Tz,
    pub locale: Locale,
}

impl Viewer {
    pub fn new(now: DateTime<Utc>, tz: Tz, locale: Locale) -> Self {
        Self { now, tz, locale }
    }

    /// Current time, system time zone and environment locale
    pub fn detect() -> Self {
        Self::new(Utc::now(), system_time_zone(), locale_from_env())
    }

    /// Like [`Viewer::detect`] but with explicit locale / zone names taking
    /// precedence when they parse.
    pub fn with_overrides(locale: Option<&str>, tz: Option<&str>) -> Self {
        let mut viewer = Self::detect();
        if let Some(locale) = locale.and_then(parse_locale) {
            viewer.locale = locale;
        }
        if let Some(tz) = tz.and_then(|name| name.parse::<Tz>().ok()) {
            viewer.tz = tz;
        }
        viewer
    }

    /// Re-read the clock, keeping zone and locale
    pub fn tick(&mut self) {
        self.now = Utc::now();
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::detect()
    }
}

fn system_time_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}

/// Locale from `LC_ALL`, `LC_TIME`, then `LANG`; `en_US` otherwise
pub fn locale_from_env() -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find_map(|value| parse_locale(&value))
        .unwrap_or(FALLBACK_LOCALE)
}

/// Parse `en_US`, `en-US`, `de_DE.UTF-8` or `sr_RS@latin` style names
pub fn parse_locale(raw: &str) -> Option<Locale> {
    let name = raw.split(['.', '@']).next().unwrap_or_default().replace('-', "_");
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Locale::try_from(name.as_str()).ok()
}

/// Absolute date and time in the viewer's zone and locale
pub fn format_date_time(ts: DateTime<Utc>, viewer: &Viewer) -> String {
    ts.with_timezone(&viewer.tz)
        .format_localized("%x %X", viewer.locale)
        .to_string()
}

/// Time of day in the viewer's zone and locale
pub fn format_time_of_day(ts: DateTime<Utc>, viewer: &Viewer) -> String {
    ts.with_timezone(&viewer.tz)
        .format_localized("%X", viewer.locale)
        .to_string()
}

/// True when `ts` falls on the viewer's current calendar day
pub fn is_today(ts: DateTime<Utc>, viewer: &Viewer) -> bool {
    ts.with_timezone(&viewer.tz).date_naive() == viewer.now.with_timezone(&viewer.tz).date_naive()
}

/// Time of day for today's timestamps, full date and time otherwise
pub fn time_of_day_or_date(ts: DateTime<Utc>, viewer: &Viewer) -> String {
    if is_today(ts, viewer) {
        format_time_of_day(ts, viewer)
    } else {
        format_date_time(ts, viewer)
    }
}
