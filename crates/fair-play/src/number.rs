//! Outcome numbers written the way a browser replay prints them: whole values
//! without a fractional part (`0`, `2`), everything else unchanged.

use serde::Serializer;

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Wrapped(#[serde(serialize_with = "super::serialize")] f64);

    fn text(value: f64) -> String {
        serde_json::to_string(&Wrapped(value)).unwrap()
    }

    #[test]
    fn whole_values_print_as_integers() {
        assert_eq!(text(0.0), "0");
        assert_eq!(text(-0.0), "0");
        assert_eq!(text(2.0), "2");
        assert_eq!(text(50.0), "50");
    }

    #[test]
    fn fractions_keep_their_digits() {
        assert_eq!(text(1.9), "1.9");
        assert_eq!(text(2.5), "2.5");
        assert_eq!(text(30.56), "30.56");
    }

    #[test]
    fn huge_values_stay_floats() {
        assert_eq!(text(1e20), "1e20");
    }
}
