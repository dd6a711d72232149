use rust_decimal::Decimal;
use serde::Serialize;

use crate::{QuoteRecord, QuoteStatus};

/// Aggregates over the current contents of a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_count: usize,
    pub total_value: Decimal,
    /// Quotes still `Sent` or `Approved`.
    pub active_count: usize,
    pub sent_count: usize,
    pub approved_count: usize,
    pub won_count: usize,
    pub lost_count: usize,
    pub won_value: Decimal,
    /// Percentage of closed quotes that were won. `None` until a quote is closed.
    pub win_rate: Option<Decimal>,
}

impl Statistics {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a QuoteRecord>) -> Self {
        let mut stats = Self::default();

        for record in records {
            stats.total_count += 1;
            // Clamp rather than panic on absurd prices.
            stats.total_value = stats.total_value.saturating_add(record.price);
            if record.status.is_active() {
                stats.active_count += 1;
            }
            match record.status {
                QuoteStatus::Sent => stats.sent_count += 1,
                QuoteStatus::Approved => stats.approved_count += 1,
                QuoteStatus::Won => {
                    stats.won_count += 1;
                    stats.won_value = stats.won_value.saturating_add(record.price);
                }
                QuoteStatus::Lost => stats.lost_count += 1,
            }
        }

        let closed = stats.closed_count();
        if closed > 0 {
            stats.win_rate =
                Some(Decimal::from(stats.won_count) * Decimal::ONE_HUNDRED / Decimal::from(closed));
        }

        stats
    }

    pub fn closed_count(&self) -> usize {
        self.won_count + self.lost_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    fn record(price: Decimal, status: QuoteStatus) -> QuoteRecord {
        QuoteRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            customer_name: "Customer".to_string(),
            customer_email: String::new(),
            customer_address: "Brisbane QLD 4000".to_string(),
            service_name: "Service".to_string(),
            price,
            status,
        }
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::from_records(&Vec::<QuoteRecord>::new());
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.total_value, Decimal::ZERO);
        assert_eq!(stats.win_rate, None);
    }

    #[test]
    fn test_counts_by_status() {
        let records = vec![
            record(dec!(100), QuoteStatus::Sent),
            record(dec!(200), QuoteStatus::Approved),
            record(dec!(300), QuoteStatus::Won),
            record(dec!(400), QuoteStatus::Won),
            record(dec!(500), QuoteStatus::Lost),
        ];
        let stats = Statistics::from_records(&records);

        assert_eq!(stats.total_count, 5);
        assert_eq!(stats.total_value, dec!(1500));
        assert_eq!(stats.active_count, 2);
        assert_eq!(stats.sent_count, 1);
        assert_eq!(stats.approved_count, 1);
        assert_eq!(stats.won_count, 2);
        assert_eq!(stats.lost_count, 1);
        assert_eq!(stats.won_value, dec!(700));
        assert_eq!(stats.closed_count(), 3);
        assert_eq!(stats.win_rate.unwrap().round_dp(2), dec!(66.67));
    }

    #[test]
    fn test_win_rate_undefined_without_closed_quotes() {
        let records = vec![
            record(dec!(10), QuoteStatus::Sent),
            record(dec!(20), QuoteStatus::Approved),
        ];
        assert_eq!(Statistics::from_records(&records).win_rate, None);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let records = vec![
            record(Decimal::MAX, QuoteStatus::Won),
            record(Decimal::MAX, QuoteStatus::Won),
            record(dec!(10), QuoteStatus::Lost),
        ];
        let stats = Statistics::from_records(&records);
        assert_eq!(stats.total_value, Decimal::MAX);
        assert_eq!(stats.won_value, Decimal::MAX);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.win_rate.unwrap().round_dp(2), dec!(66.67));
    }

    #[test]
    fn test_all_lost_is_zero_percent() {
        let records = vec![record(dec!(10), QuoteStatus::Lost)];
        assert_eq!(Statistics::from_records(&records).win_rate, Some(Decimal::ZERO));
    }
}
