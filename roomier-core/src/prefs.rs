//! Preference and component normalization
//!
//! Clients have shipped several shapes for the same logical fields:
//! components as a list of enabled names or as a boolean map, temperature
//! in Fahrenheit or legacy Celsius, and quiet hours either inside the
//! preference object (`quietStart`/`quietEnd`) or as a separate
//! `quietHours {start, end}` object. All mutation paths funnel through
//! this single boundary, which merges a raw payload against an existing
//! record (update path) or against the documented defaults (create path).
//!
//! Normalization is total: a type mismatch on any field falls back to the
//! existing/default value for that field, never an error. `null` on a
//! nested preference sub-field means "no change".

use serde_json::Value;
use tracing::trace;

use crate::model::{Components, Prefs};
use crate::value::{bool_field, object_field, rounded_field, str_field};

/// Merge the preference-bearing parts of a raw payload into `existing`.
///
/// Reads `preferences` or `prefs` (in that precedence) and then overlays a
/// `quietHours` object, matching the order the original clients relied on.
pub fn normalize_prefs(existing: &Prefs, raw: &Value) -> Prefs {
    let mut out = existing.clone();

    if let Some(p) = object_field(raw, "preferences").or_else(|| object_field(raw, "prefs")) {
        apply_prefs_object(&mut out, p);
    }

    if let Some(q) = object_field(raw, "quietHours") {
        if let Some(start) = quiet_time(q, "start") {
            out.quiet_start = start;
        }
        if let Some(end) = quiet_time(q, "end") {
            out.quiet_end = end;
        }
    }

    out
}

fn apply_prefs_object(out: &mut Prefs, p: &Value) {
    if let Some(start) = quiet_time(p, "quietStart") {
        out.quiet_start = start;
    }
    if let Some(end) = quiet_time(p, "quietEnd") {
        out.quiet_end = end;
    }

    // Fahrenheit wins when both are supplied; Celsius is the legacy shape
    if let Some(f) = rounded_field(p, "temperatureF") {
        out.temperature_f = f;
    } else if let Some(c) = crate::value::f64_field(p, "temperatureC") {
        out.temperature_f = (c * 9.0 / 5.0 + 32.0).round() as i32;
    }

    apply_flag(p, "guestsAllowed", &mut out.guests_allowed);
    apply_flag(p, "smokingAllowed", &mut out.smoking_allowed);
    apply_flag(p, "drinkingAllowed", &mut out.drinking_allowed);
    apply_flag(p, "partiesAllowed", &mut out.parties_allowed);
    apply_flag(p, "nightTimeGuestsAllowed", &mut out.night_time_guests_allowed);

    match p.get("accommodations") {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            // Never empty at rest
            out.accommodations = if trimmed.is_empty() {
                "None".to_string()
            } else {
                trimmed.to_string()
            };
        }
        Some(Value::Null) | None => {}
        Some(other) => {
            trace!(value = %other, "ignoring non-string accommodations");
        }
    }
}

fn apply_flag(p: &Value, key: &str, slot: &mut bool) {
    match p.get(key) {
        Some(Value::Bool(b)) => *slot = *b,
        Some(Value::Null) | None => {}
        Some(other) => {
            trace!(key, value = %other, "ignoring non-boolean house rule");
        }
    }
}

/// Read an HH:MM 24-hour string field; anything unparseable is dropped
fn quiet_time(raw: &Value, key: &str) -> Option<String> {
    let s = str_field(raw, key)?.trim();
    if chrono::NaiveTime::parse_from_str(s, "%H:%M").is_ok() {
        Some(s.to_string())
    } else {
        trace!(key, value = s, "ignoring malformed quiet-hours time");
        None
    }
}

/// Normalize a raw `components` value against the existing map.
///
/// A list means membership over the three known names (absence means
/// disabled, not unspecified). A map overlays whatever known boolean keys
/// it supplies; unknown keys are dropped, never stored. Any other shape
/// leaves the existing map untouched.
pub fn normalize_components(existing: &Components, raw: Option<&Value>) -> Components {
    match raw {
        Some(Value::Array(names)) => {
            let enabled = |name: &str| {
                names
                    .iter()
                    .any(|v| v.as_str().map(|s| s == name).unwrap_or(false))
            };
            Components {
                chores: enabled("chores"),
                expenses: enabled("expenses"),
                inventory: enabled("inventory"),
            }
        }
        Some(map @ Value::Object(_)) => Components {
            chores: bool_field(map, "chores").unwrap_or(existing.chores),
            expenses: bool_field(map, "expenses").unwrap_or(existing.expenses),
            inventory: bool_field(map, "inventory").unwrap_or(existing.inventory),
        },
        _ => *existing,
    }
}
