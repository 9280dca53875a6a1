//! Reduces month-tagged spend records into month and quarter totals.

use serde::{Deserialize, Serialize};

use crate::calendar::{Month, QuarterWindow, WINDOW_LEN};

/// A single spend entry as delivered by the tracker feed.
///
/// `spend` may be negative for credit adjustments and may be absent; absent
/// or non-finite values count as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendRecord {
    pub month: String,
    #[serde(default)]
    pub spend: Option<f64>,
}

impl SpendRecord {
    pub fn new(month: impl Into<String>, spend: f64) -> Self {
        Self {
            month: month.into(),
            spend: Some(spend),
        }
    }

    pub fn amount(&self) -> f64 {
        match self.spend {
            Some(value) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    /// Month names are matched exactly, the way the feed spells them.
    pub fn is_for(&self, month: Month) -> bool {
        self.month == month.name()
    }
}

/// Total spend recorded against `month`. Duplicate records are summed.
pub fn month_spend(records: &[SpendRecord], month: Month) -> f64 {
    records
        .iter()
        .filter(|record| record.is_for(month))
        .map(SpendRecord::amount)
        .sum()
}

/// Total spend across the three months of `window`.
pub fn quarter_spend(records: &[SpendRecord], window: &QuarterWindow) -> f64 {
    records
        .iter()
        .filter(|record| window.months().iter().any(|month| record.is_for(*month)))
        .map(SpendRecord::amount)
        .sum()
}

/// Per-month totals in window order.
pub fn monthly_breakdown(records: &[SpendRecord], window: &QuarterWindow) -> [f64; WINDOW_LEN] {
    let mut totals = [0.0; WINDOW_LEN];
    for (slot, month) in totals.iter_mut().zip(window.months()) {
        *slot = month_spend(records, *month);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Quarter;

    fn records() -> Vec<SpendRecord> {
        vec![
            SpendRecord::new("May", 250.0),
            SpendRecord::new("April", 400.0),
            SpendRecord::new("May", 125.5),
            SpendRecord::new("July", 900.0),
            SpendRecord {
                month: "June".into(),
                spend: None,
            },
            SpendRecord::new("June", -50.0),
        ]
    }

    #[test]
    fn month_spend_sums_duplicates() {
        assert_eq!(month_spend(&records(), Month::May), 375.5);
    }

    #[test]
    fn month_spend_is_zero_without_matches() {
        assert_eq!(month_spend(&records(), Month::December), 0.0);
        assert_eq!(month_spend(&[], Month::May), 0.0);
    }

    #[test]
    fn missing_and_non_finite_spend_count_as_zero() {
        let mut data = records();
        data.push(SpendRecord::new("June", f64::NAN));
        assert_eq!(month_spend(&data, Month::June), -50.0);
    }

    #[test]
    fn month_spend_ignores_record_order() {
        let mut reversed = records();
        reversed.reverse();
        assert_eq!(
            month_spend(&records(), Month::May),
            month_spend(&reversed, Month::May)
        );
    }

    #[test]
    fn quarter_spend_matches_sum_of_months() {
        let window = QuarterWindow::for_quarter(Quarter::Q2);
        let data = records();
        let by_month: f64 = window
            .months()
            .iter()
            .map(|month| month_spend(&data, *month))
            .sum();
        assert_eq!(quarter_spend(&data, &window), by_month);
        assert_eq!(quarter_spend(&data, &window), 725.5);
    }

    #[test]
    fn breakdown_follows_window_order() {
        let window = QuarterWindow::for_quarter(Quarter::Q2);
        assert_eq!(monthly_breakdown(&records(), &window), [400.0, 375.5, -50.0]);
    }

    #[test]
    fn deserializes_records_with_missing_spend() {
        let data: Vec<SpendRecord> =
            serde_json::from_str(r#"[{"month":"April","spend":12.5},{"month":"May"}]"#).unwrap();
        assert_eq!(data[0].amount(), 12.5);
        assert_eq!(data[1].amount(), 0.0);
    }
}
