//! Crash multiplier.
//!
//! `crash_point = max(1, 1 / (1 - r * 0.98))` rounded to two decimals, where
//! `r` is the seed's first draw. The 0.98 factor is the ~2% house edge.

use serde::Serialize;

use crate::rng::seeded_random;

pub const HOUSE_EDGE_FACTOR: f64 = 0.98;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrashOutcome {
    #[serde(serialize_with = "crate::number::serialize")]
    pub crash_point: f64,
}

pub fn resolve_crash(seed: &str) -> CrashOutcome {
    CrashOutcome {
        crash_point: crash_point(seeded_random(seed, 0)),
    }
}

/// Map a draw in `[0, 1)` to its rounded crash point.
pub fn crash_point(draw: f64) -> f64 {
    let raw = (1.0 / (1.0 - draw * HOUSE_EDGE_FACTOR)).max(1.0);
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_crash_points() {
        assert_eq!(resolve_crash("abc").crash_point, 30.56);
        assert_eq!(resolve_crash("seed1").crash_point, 1.3);
        assert_eq!(resolve_crash("test").crash_point, 1.33);
        assert_eq!(resolve_crash("seed-500").crash_point, 1.01);
        assert_eq!(resolve_crash("seed-1830").crash_point, 47.93);
    }

    #[test]
    fn small_draw_rounds_to_one() {
        assert_eq!(resolve_crash("x").crash_point, 1.0);
    }

    #[test]
    fn zero_draw_is_clamped() {
        assert_eq!(crash_point(0.0), 1.0);
    }

    #[test]
    fn high_draw_is_unclamped() {
        let point = crash_point(0.999_999);
        assert!(point > 49.0 && point < 50.1, "{point}");
    }

    #[test]
    fn crash_point_is_monotonic() {
        let mut last = crash_point(0.0);
        for i in 1..1000 {
            let next = crash_point(i as f64 / 1000.0);
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(resolve_crash("abc")).unwrap();
        assert_eq!(json, serde_json::json!({ "crashPoint": 30.56 }));
    }
}
