use chrono::{Datelike, NaiveDate};

use crate::models::{RiskAnalysisResult, RiskLevel, Transaction, TransactionType};

/// A sale above this in March counts as a year-end spike.
const YEAR_END_SALE_FLOOR: f64 = 50_000_000.0;

const YEAR_END_SPIKE_POINTS: u32 = 40;
const RELATED_PARTY_POINTS: u32 = 50;
const NO_CASH_SALE_POINTS: u32 = 45;
const INTENT_MISMATCH_POINTS: u32 = 60;

/// Calendar month (1-12) of a transaction, or None when the date does not
/// parse. Dates after the analysis reference are treated like unparseable
/// ones.
fn transaction_month(tx: &Transaction, reference: NaiveDate) -> Option<u32> {
    let date = NaiveDate::parse_from_str(&tx.date, "%Y-%m-%d").ok()?;
    (date <= reference).then(|| date.month())
}

/// Score one transaction in isolation against the four heuristic layers.
///
/// Pure and infallible: malformed dates and missing optional fields leave
/// the corresponding layer untriggered. All layers are evaluated; the
/// score is their sum clamped to 100, and the factors keep layer order.
pub fn score_transaction(tx: &Transaction, reference: NaiveDate) -> RiskAnalysisResult {
    let mut factors = Vec::new();
    let mut score: u32 = 0;

    // Layer 1: year-end spike
    if tx.tx_type == TransactionType::Sale
        && transaction_month(tx, reference) == Some(3)
        && tx.amount > YEAR_END_SALE_FLOOR
    {
        factors.push("Sudden high-value March transaction (year-end spike)".to_string());
        score += YEAR_END_SPIKE_POINTS;
    }

    // Layer 2: undisclosed related party
    if tx.is_related_party && !tx.is_disclosed {
        factors.push("Undisclosed related-party transaction".to_string());
        score += RELATED_PARTY_POINTS;
    }

    // Layer 3: cash reality check
    if tx.tx_type == TransactionType::Sale && tx.actual_cash_flow == 0.0 {
        factors.push("Revenue recognized without cash receipt".to_string());
        score += NO_CASH_SALE_POINTS;
    }

    // Layer 4: intent consistency. Exact, case-sensitive comparison.
    if let (Some(purpose), Some(usage)) = (&tx.stated_purpose, &tx.actual_usage) {
        if purpose != usage {
            factors.push(format!(
                "Funds stated for '{purpose}' were used for '{usage}'"
            ));
            score += INTENT_MISMATCH_POINTS;
        }
    }

    let score = score.min(100);

    RiskAnalysisResult {
        transaction_id: tx.id.clone(),
        risk_level: RiskLevel::from_score(score),
        risk_factors: factors,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    fn plain_sale(id: &str, date: &str, amount: f64, cash: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            amount,
            tx_type: TransactionType::Sale,
            counterparty_name: "Client".to_string(),
            category: "Revenue".to_string(),
            is_related_party: false,
            is_disclosed: true,
            actual_cash_flow: cash,
            stated_purpose: None,
            actual_usage: None,
        }
    }

    #[test]
    fn test_clean_transaction_scores_zero() {
        let tx = plain_sale("T-1", "2024-01-05", 5_000_000.0, 5_000_000.0);
        let result = score_transaction(&tx, reference());
        assert_eq!(result.score, 0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.risk_factors.is_empty());
    }

    #[test]
    fn test_march_spike_with_no_cash_is_critical() {
        let tx = plain_sale("T-101", "2024-03-28", 50_000_001.0, 0.0);
        let result = score_transaction(&tx, reference());
        assert_eq!(result.score, 85);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.risk_factors.len(), 2);
        assert!(result.risk_factors[0].contains("year-end spike"));
        assert!(result.risk_factors[1].contains("without cash receipt"));
    }

    #[test]
    fn test_march_spike_needs_amount_above_floor() {
        let tx = plain_sale("T-2", "2024-03-28", 50_000_000.0, 1.0);
        let result = score_transaction(&tx, reference());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_march_spike_only_fires_for_sales() {
        let mut tx = plain_sale("T-3", "2024-03-28", 80_000_000.0, -80_000_000.0);
        tx.tx_type = TransactionType::Purchase;
        let result = score_transaction(&tx, reference());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_undisclosed_related_party() {
        let mut tx = plain_sale("T-145", "2024-06-01", 1_000_000.0, 1_000_000.0);
        tx.is_related_party = true;
        tx.is_disclosed = false;
        let result = score_transaction(&tx, reference());
        assert_eq!(result.score, 50);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_disclosed_related_party_is_clean() {
        let mut tx = plain_sale("T-4", "2024-06-01", 1_000_000.0, 1_000_000.0);
        tx.is_related_party = true;
        tx.is_disclosed = true;
        assert_eq!(score_transaction(&tx, reference()).score, 0);
    }

    #[test]
    fn test_intent_mismatch_is_exact_and_case_sensitive() {
        let mut tx = plain_sale("T-5", "2024-05-01", 1_000.0, 1_000.0);
        tx.stated_purpose = Some("A".to_string());
        tx.actual_usage = Some("A".to_string());
        assert_eq!(score_transaction(&tx, reference()).score, 0);

        tx.actual_usage = Some("B".to_string());
        let result = score_transaction(&tx, reference());
        assert_eq!(result.score, 60);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(result.risk_factors[0].contains("'A'"));
        assert!(result.risk_factors[0].contains("'B'"));

        tx.stated_purpose = Some("a".to_string());
        tx.actual_usage = Some("A".to_string());
        assert_eq!(score_transaction(&tx, reference()).score, 60);
    }

    #[test]
    fn test_intent_layer_needs_both_fields() {
        let mut tx = plain_sale("T-6", "2024-05-01", 1_000.0, 1_000.0);
        tx.actual_usage = Some("Paying Old Debts".to_string());
        assert_eq!(score_transaction(&tx, reference()).score, 0);
    }

    #[test]
    fn test_all_layers_clamp_to_100() {
        let mut tx = plain_sale("T-7", "2024-03-29", 65_000_000.0, 0.0);
        tx.is_related_party = true;
        tx.is_disclosed = false;
        tx.stated_purpose = Some("New Factory Construction".to_string());
        tx.actual_usage = Some("Paying Old Debts".to_string());
        let result = score_transaction(&tx, reference());
        assert_eq!(result.score, 100);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.risk_factors.len(), 4);
    }

    #[test]
    fn test_malformed_date_skips_calendar_layer() {
        let tx = plain_sale("T-8", "not-a-date", 80_000_000.0, 1.0);
        assert_eq!(score_transaction(&tx, reference()).score, 0);
    }

    #[test]
    fn test_date_after_reference_skips_calendar_layer() {
        let tx = plain_sale("T-9", "2026-03-15", 80_000_000.0, 1.0);
        assert_eq!(score_transaction(&tx, reference()).score, 0);
    }

    #[test]
    fn test_deterministic() {
        let tx = plain_sale("T-10", "2024-03-28", 80_000_000.0, 0.0);
        let first = score_transaction(&tx, reference());
        let second = score_transaction(&tx, reference());
        assert_eq!(first, second);
    }
}
