//! Orders placed against the curve, and validation of incoming requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::OrderError;
use crate::domain::maturity::Maturity;

/// A persisted order as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub term: String,
    pub amount: i64,
    pub rate: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// A validated order ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub term: Maturity,
    pub amount: i64,
    pub rate: Option<f64>,
}

/// Request body of `POST /api/orders`. Fields are loosely typed so that
/// wrong types surface as validation messages rather than decode failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub term_years: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub rate: Option<Value>,
}

impl OrderRequest {
    pub fn validate(&self) -> Result<NewOrder, OrderError> {
        let term = match &self.term_years {
            None | Some(Value::Null) => return Err(OrderError::MissingFields),
            Some(Value::String(s)) if s.is_empty() => return Err(OrderError::MissingFields),
            Some(_) if is_absent(self.amount.as_ref()) => return Err(OrderError::MissingFields),
            Some(Value::String(s)) => Maturity::from_term(s).ok_or_else(invalid_term)?,
            Some(_) => return Err(invalid_term()),
        };

        let amount = self
            .amount
            .as_ref()
            .and_then(numeric)
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or(OrderError::InvalidAmount)?;
        let amount = round_amount(amount).ok_or(OrderError::InvalidAmount)?;

        let rate = match &self.rate {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(numeric(value).ok_or(OrderError::InvalidRate)?),
        };

        Ok(NewOrder { term, amount, rate })
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn invalid_term() -> OrderError {
    OrderError::InvalidTerm {
        valid: Maturity::orderable_terms_list(),
    }
}

/// Numbers and numeric strings; anything else is rejected.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Rounds half away from zero; `None` if the result does not fit an `i64`.
pub fn round_amount(amount: f64) -> Option<i64> {
    let rounded = amount.round();
    if rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn request(body: Value) -> OrderRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn accepts_valid_request() {
        let order = request(json!({"term_years": "10 Years", "amount": 1000, "rate": 4.25}))
            .validate()
            .unwrap();
        assert_eq!(order.term, Maturity::TenYears);
        assert_eq!(order.amount, 1000);
        assert_relative_eq!(order.rate.unwrap(), 4.25);
    }

    #[test]
    fn rounds_fractional_amount() {
        let order = request(json!({"term_years": "1 Month", "amount": 100.7}))
            .validate()
            .unwrap();
        assert_eq!(order.amount, 101);
        assert_eq!(order.rate, None);
    }

    #[test]
    fn accepts_numeric_strings() {
        let order = request(json!({"term_years": "1.5 Months", "amount": " 250 ", "rate": "5.31"}))
            .validate()
            .unwrap();
        assert_eq!(order.term, Maturity::SixWeeks);
        assert_eq!(order.amount, 250);
        assert_relative_eq!(order.rate.unwrap(), 5.31);
    }

    #[test]
    fn missing_fields() {
        for body in [
            json!({}),
            json!({"amount": 100}),
            json!({"term_years": "1 Year"}),
            json!({"term_years": "", "amount": 100}),
            json!({"term_years": "1 Year", "amount": null}),
        ] {
            assert_eq!(request(body).validate(), Err(OrderError::MissingFields));
        }
    }

    #[test]
    fn rejects_unknown_term() {
        let err = request(json!({"term_years": "15 Years", "amount": 100}))
            .validate()
            .unwrap_err();
        match err {
            OrderError::InvalidTerm { valid } => {
                assert!(valid.starts_with("1 Month, 1.5 Months"));
                assert!(valid.ends_with("10 Years, 30 Years"));
            }
            other => panic!("expected InvalidTerm, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_orderable_curve_term() {
        let err = request(json!({"term_years": "20 Years", "amount": 100}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTerm { .. }));
    }

    #[test]
    fn rejects_non_string_term() {
        let err = request(json!({"term_years": 10, "amount": 100}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTerm { .. }));
    }

    #[test]
    fn rejects_bad_amounts() {
        for amount in [json!(-5), json!(0), json!("abc"), json!(true), json!([1])] {
            let result = request(json!({"term_years": "1 Year", "amount": amount})).validate();
            assert_eq!(result, Err(OrderError::InvalidAmount), "amount {amount}");
        }
    }

    #[test]
    fn rejects_non_numeric_rate() {
        let result =
            request(json!({"term_years": "1 Year", "amount": 5, "rate": "high"})).validate();
        assert_eq!(result, Err(OrderError::InvalidRate));
    }

    #[test]
    fn blank_rate_is_absent() {
        let order = request(json!({"term_years": "1 Year", "amount": 5, "rate": ""}))
            .validate()
            .unwrap();
        assert_eq!(order.rate, None);
    }

    #[test]
    fn round_amount_bounds() {
        assert_eq!(round_amount(2.5), Some(3));
        assert_eq!(round_amount(1e30), None);
    }

    #[test]
    fn order_serializes_created_at_in_camel_case() {
        let order = Order {
            id: 1,
            term: "2 Years".into(),
            amount: 101,
            rate: Some(4.3),
            created_at: DateTime::parse_from_rfc3339("2024-01-08T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["createdAt"], "2024-01-08T12:00:00Z");
        assert_eq!(json["amount"], 101);
    }
}
