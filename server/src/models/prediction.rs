//! Prediction request/response models

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::inference::FeatureRow;

/// Ten clinical measurements, all required.
///
/// No range checks: any numeric value reaches the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiabetesInput {
    pub age: f64,
    /// Integer code; integral floats such as `1.0` are accepted
    #[serde(deserialize_with = "integer")]
    pub sex: i64,
    pub bmi: f64,
    pub bp: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub s4: f64,
    pub s5: f64,
    pub s6: f64,
}

impl DiabetesInput {
    /// Single row in the column order the model was trained on
    pub fn to_row(&self) -> FeatureRow {
        [
            self.age,
            self.sex as f64,
            self.bmi,
            self.bp,
            self.s1,
            self.s2,
            self.s3,
            self.s4,
            self.s5,
            self.s6,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictionResponse {
    pub prediction: i64,
}

fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }

    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Ok(value as i64),
        _ => Err(D::Error::custom(format!("invalid value: {}, expected an integer", number))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::FEATURE_LAYOUT;

    #[test]
    fn test_row_follows_layout() {
        let input: DiabetesInput = serde_json::from_value(serde_json::json!({
            "age": 1, "sex": 2, "bmi": 3, "bp": 4, "s1": 5,
            "s2": 6, "s3": 7, "s4": 8, "s5": 9, "s6": 10
        }))
        .unwrap();

        let row = input.to_row();
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            assert_eq!(row[i], (i + 1) as f64, "column {} ({})", i, name);
        }
    }

    fn with_sex(sex: serde_json::Value) -> Result<DiabetesInput, serde_json::Error> {
        serde_json::from_value(serde_json::json!({
            "age": 50, "sex": sex, "bmi": 30.0, "bp": 80, "s1": 150,
            "s2": 100, "s3": 50, "s4": 4.5, "s5": 5.5, "s6": 110
        }))
    }

    #[test]
    fn test_sex_accepts_integral_float() {
        assert_eq!(with_sex(serde_json::json!(1.0)).unwrap().sex, 1);
        assert_eq!(with_sex(serde_json::json!(-0.0)).unwrap().sex, 0);
        assert_eq!(with_sex(serde_json::json!(2)).unwrap().to_row()[1], 2.0);
    }

    #[test]
    fn test_sex_rejects_non_integers() {
        assert!(with_sex(serde_json::json!("1")).is_err());
        assert!(with_sex(serde_json::json!(null)).is_err());
        assert!(with_sex(serde_json::json!(1e300)).is_err());

        let err = with_sex(serde_json::json!(1.5)).unwrap_err();
        assert!(err.to_string().contains("expected an integer"), "{}", err);
    }

    #[test]
    fn test_sex_must_be_integral() {
        let result: Result<DiabetesInput, _> = serde_json::from_value(serde_json::json!({
            "age": 50, "sex": 0.5, "bmi": 30.0, "bp": 80, "s1": 150,
            "s2": 100, "s3": 50, "s4": 4.5, "s5": 5.5, "s6": 110
        }));
        assert!(result.is_err());
    }
}
