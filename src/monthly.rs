use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{MonthlyStat, RiskLevel, Transaction, TransactionType};
use crate::scorer::score_transaction;

/// Canonical output order. The buckets are keyed by month name with the
/// year discarded, so records from different years with the same month
/// name collapse into one bucket.
const MONTH_ORDER: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Months with reported sales above this and net cash outflow get the
/// silence-pattern override.
const SILENCE_SALES_FLOOR: f64 = 50_000_000.0;
const SILENCE_RISK_FLOOR: u32 = 85;

fn month_name(date: &str) -> Option<&'static str> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(MONTH_ORDER[parsed.month0() as usize])
}

/// Roll transactions up into per-month stats: sales and cash totals plus
/// the mean risk score of flagged (non-Low) transactions. Transactions
/// whose date does not parse are left out of the buckets.
pub fn monthly_stats(transactions: &[Transaction], reference: NaiveDate) -> Vec<MonthlyStat> {
    let mut buckets: HashMap<&'static str, (MonthlyStat, u32)> = HashMap::new();

    for tx in transactions {
        let Some(month) = month_name(&tx.date) else {
            continue;
        };
        let (stat, score_sum) = buckets.entry(month).or_insert_with(|| {
            (
                MonthlyStat {
                    month: month.to_string(),
                    total_sales: 0.0,
                    total_cash_flow: 0.0,
                    risk_score: 0,
                    flagged_count: 0,
                },
                0,
            )
        });

        if tx.tx_type == TransactionType::Sale {
            stat.total_sales += tx.amount;
        }
        stat.total_cash_flow += tx.actual_cash_flow;

        let analysis = score_transaction(tx, reference);
        if analysis.risk_level != RiskLevel::Low {
            stat.flagged_count += 1;
            *score_sum += analysis.score;
        }
    }

    let mut stats: Vec<MonthlyStat> = MONTH_ORDER
        .iter()
        .filter_map(|month| buckets.remove(month))
        .map(|(mut stat, score_sum)| {
            if stat.flagged_count > 0 {
                stat.risk_score = (score_sum as f64 / stat.flagged_count as f64).round() as u32;
            }
            stat
        })
        .collect();

    // Silence pattern: high reported sales with net cash outflow, even
    // when no individual transaction tripped a layer.
    for stat in &mut stats {
        if stat.total_sales > SILENCE_SALES_FLOOR && stat.total_cash_flow < 0.0 {
            stat.risk_score = stat.risk_score.max(SILENCE_RISK_FLOOR);
        }
    }

    stats
}
