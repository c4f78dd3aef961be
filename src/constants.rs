use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Recommendations returned when the caller gives no limit
pub const DEFAULT_RECOMMENDATION_LIMIT: i64 = 10;

pub const MAX_RESOURCES_PER_SKILL: usize = 3;

/// Seconds a computed health report is served from cache
pub const HEALTH_CACHE_SECS: i64 = 5;
