use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Sale,
    Purchase,
    Expense,
    Transfer,
    LoanIn,
    LoanOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Calendar date as YYYY-MM-DD. Unparseable dates degrade date rules
    /// to "not triggered" rather than failing the analysis.
    pub date: String,
    /// Non-negative magnitude of the recognized transaction.
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub counterparty_name: String,
    pub category: String,
    pub is_related_party: bool,
    pub is_disclosed: bool,
    /// Signed real cash movement; may be zero even for a recognized sale.
    pub actual_cash_flow: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stated_purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_usage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub vendor_id: String,
    pub name: String,
    /// "N/A" is the sentinel for unknown; such records never enter
    /// duplicate matching.
    pub bank_account_number: String,
    pub ifsc_code: String,
    pub bank_address: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRegisterEntry {
    pub id: String,
    pub customer_name: String,
    pub bank_account_number: String,
    pub ifsc_code: String,
    pub location: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowRecord {
    pub date: String,
    pub opening_balance: f64,
    pub cash_in: f64,
    pub cash_out: f64,
    pub closing_balance: f64,
    /// Free-text status label; case-insensitive "ok" means no declared issue.
    pub flag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    /// Empty account on either side marks an external cash movement
    /// (loan receipt, salary run) rather than an inter-account leg.
    pub from_account: String,
    pub to_account: String,
    pub amount: f64,
    pub remark: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySalesRecord {
    pub month: String,
    pub sales_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// The full case file handed to the engine: independent tables joined
/// only implicitly (shared account numbers, month labels).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordSet {
    pub transactions: Vec<Transaction>,
    pub vendors: Vec<VendorRecord>,
    pub sales_register: Vec<SalesRegisterEntry>,
    pub cash_flow: Vec<CashFlowRecord>,
    pub transfers: Vec<TransferRecord>,
    pub sales_summary: Vec<MonthlySalesRecord>,
}

// ---------------------------------------------------------------------------
// Engine output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Classify a clamped 0-100 score.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s > 80 => RiskLevel::Critical,
            s if s > 60 => RiskLevel::High,
            s if s > 30 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysisResult {
    pub transaction_id: String,
    pub risk_level: RiskLevel,
    /// Triggered layer descriptions in layer evaluation order.
    pub risk_factors: Vec<String>,
    /// Sum of triggered layers, clamped to 0-100.
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    pub month: String,
    pub total_sales: f64,
    pub total_cash_flow: f64,
    /// Mean score of flagged transactions, possibly raised by the
    /// silence-pattern override.
    pub risk_score: u32,
    pub flagged_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair<T> {
    /// First-seen record for the shared key.
    pub original: T,
    pub duplicate: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowAnomaly {
    pub date: String,
    pub expected: f64,
    pub actual: f64,
    /// actual minus expected; negative means cash is missing.
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircularTrade {
    /// Two-hop cycle rendered as [from, to, from].
    pub cycle: Vec<String>,
    /// Amount of the first leg.
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSpike {
    pub month: String,
    pub amount: f64,
    pub growth: String,
}

/// Bundle of the five cross-record scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub duplicate_vendors: Vec<DuplicatePair<VendorRecord>>,
    pub duplicate_sales: Vec<DuplicatePair<SalesRegisterEntry>>,
    pub cash_flow_anomalies: Vec<CashFlowAnomaly>,
    pub circular_trading: Vec<CircularTrade>,
    pub sales_spikes: Vec<SalesSpike>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(31), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(61), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(81), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn test_record_set_defaults_missing_tables() {
        let set: RecordSet = serde_json::from_str(r#"{"vendors": []}"#).unwrap();
        assert!(set.transactions.is_empty());
        assert!(set.sales_summary.is_empty());
    }

    #[test]
    fn test_transaction_type_wire_names() {
        let t: TransactionType = serde_json::from_str(r#""loan_in""#).unwrap();
        assert_eq!(t, TransactionType::LoanIn);
        assert_eq!(serde_json::to_string(&TransactionType::Sale).unwrap(), r#""sale""#);
    }
}
