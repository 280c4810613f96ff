//! Date objects
//!
//! A Date holds a single time value: milliseconds since the Unix epoch, or
//! NaN for an invalid date.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::RwLock;

use crate::object::JsObject;

/// Largest magnitude of a valid time value (ES2023 §21.4.1.31 TimeClip)
const MAX_TIME_MS: f64 = 8.64e15;

fn time_clip(time: f64) -> f64 {
    if !time.is_finite() || time.abs() > MAX_TIME_MS {
        f64::NAN
    } else {
        time.trunc() + 0.0
    }
}

/// A JavaScript Date
#[derive(Debug)]
pub struct JsDate {
    /// Own properties and prototype
    pub object: Arc<JsObject>,
    time: RwLock<f64>,
}

impl JsDate {
    /// Create a Date for `time_ms` milliseconds since the epoch
    pub fn new(time_ms: f64, prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            object: Arc::new(JsObject::new(prototype)),
            time: RwLock::new(time_clip(time_ms)),
        }
    }

    /// Create a Date for the current time
    pub fn now(prototype: Option<Arc<JsObject>>) -> Self {
        Self::new(Utc::now().timestamp_millis() as f64, prototype)
    }

    /// `valueOf()`: the time value, NaN if invalid
    pub fn time_value(&self) -> f64 {
        *self.time.read()
    }

    /// `setTime()`; returns the clipped time value
    pub fn set_time(&self, time_ms: f64) -> f64 {
        let clipped = time_clip(time_ms);
        *self.time.write() = clipped;
        clipped
    }

    /// Whether the time value is a valid instant
    pub fn is_valid(&self) -> bool {
        !self.time_value().is_nan()
    }

    /// `toISOString()`, or `None` for an invalid date
    pub fn to_iso_string(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(self.time_value() as i64)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
