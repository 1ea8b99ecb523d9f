//! The analytics result record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use bondcalc_core::types::{CashFlowSchedule, Date};

/// Valuation and risk figures for one bond on one analytics date.
///
/// Prices, accrued interest and DV01 are in currency units of the bond's
/// face value. The field set is stable; new figures go in `summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    /// Bond identifier.
    pub bond_id: String,
    /// Date the analytics were requested for.
    pub analytics_date: Date,
    /// Resolved settlement date.
    pub settlement_date: Date,
    /// Price excluding accrued interest.
    pub clean_price: f64,
    /// Price including accrued interest.
    pub dirty_price: f64,
    /// Interest accrued from the last coupon date to settlement.
    pub accrued_interest: f64,
    /// Yield to maturity.
    pub yield_to_maturity: f64,
    /// Yield to worst; present for callable and putable bonds only.
    pub yield_to_worst: Option<f64>,
    /// Modified duration.
    pub modified_duration: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Duration from a symmetric yield bump.
    pub simple_duration: f64,
    /// Analytical convexity.
    pub convexity: f64,
    /// Price change per basis point.
    pub dv01: f64,
    /// Auxiliary figures.
    pub summary: BTreeMap<String, Value>,
}

impl AnalyticsResult {
    /// Looks up a summary entry.
    pub fn summary_value(&self, key: &str) -> Option<&Value> {
        self.summary.get(key)
    }
}

/// Serializes a schedule as `{date, amount, coupon, principal, is_principal}` rows.
pub(crate) fn cashflows_to_json(flows: &CashFlowSchedule) -> Value {
    flows
        .iter()
        .map(|cf| {
            json!({
                "date": cf.date(),
                "amount": cf.amount(),
                "coupon": cf.coupon_amount(),
                "principal": cf.principal_amount(),
                "is_principal": cf.is_principal(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondcalc_core::types::CashFlow;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_cashflow_rows() {
        let flows: CashFlowSchedule = vec![
            CashFlow::coupon(date(2025, 7, 15), dec!(25), date(2025, 1, 15)),
            CashFlow::final_payment(date(2026, 1, 15), dec!(25), dec!(1000), date(2025, 7, 15)),
        ]
        .into_iter()
        .collect();

        let rows = cashflows_to_json(&flows);
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], "2025-07-15");
        assert_eq!(rows[0]["is_principal"], false);
        assert_eq!(rows[1]["amount"].as_f64(), Some(1025.0));
        assert_eq!(rows[1]["principal"].as_f64(), Some(1000.0));
        assert_eq!(rows[1]["is_principal"], true);
    }

    #[test]
    fn test_result_serde() {
        let mut summary = BTreeMap::new();
        summary.insert("bond_type".to_string(), json!("ZERO_COUPON"));
        let result = AnalyticsResult {
            bond_id: "Z-2030".to_string(),
            analytics_date: date(2025, 1, 15),
            settlement_date: date(2025, 1, 17),
            clean_price: 780.0,
            dirty_price: 780.0,
            accrued_interest: 0.0,
            yield_to_maturity: 0.05,
            yield_to_worst: None,
            modified_duration: 4.8,
            macaulay_duration: 4.9,
            simple_duration: 4.8,
            convexity: 25.0,
            dv01: 0.37,
            summary,
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"yield_to_worst\":null"));
        let back: AnalyticsResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.summary_value("bond_type"), Some(&json!("ZERO_COUPON")));
    }
}
