//! Boundary adapter between raw data-entry shapes and the canonical
//! entities the engine consumes. Everything here coerces instead of
//! failing: a malformed row still yields a best-effort record, so the
//! engine always gets a complete (if partially zeroed) case file.

use serde::Deserialize;

use crate::models::{
    CashFlowRecord, MonthlySalesRecord, RecordSet, SalesRegisterEntry, Transaction,
    TransactionType, TransferRecord, VendorRecord,
};

// ---------------------------------------------------------------------------
// Raw row shapes (wizard form state / pre-parsed sheet rows)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTransactionRow {
    pub id: String,
    pub date: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub party_name: String,
    pub category: String,
    pub is_related_party: String,
    pub is_disclosed: String,
    pub actual_cash_flow: String,
    pub stated_purpose: String,
    pub actual_usage: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVendorRow {
    pub id: String,
    pub vendor_name: String,
    pub bank_account_no: String,
    pub ifsc_code: String,
    pub bank_address: String,
    pub gst_or_pan: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSalesRegisterRow {
    pub id: String,
    pub customer_name: String,
    pub bank_account_no: String,
    pub ifsc_code: String,
    pub location: String,
    pub gst_or_pan: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCashFlowRow {
    pub date: String,
    pub opening_cash: String,
    pub cash_in: String,
    pub cash_out: String,
    pub closing_cash: String,
    pub flag: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTransferRow {
    pub from_account: String,
    pub to_account: String,
    pub amount: String,
    pub remark: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMonthlySalesRow {
    pub month: String,
    pub amount: String,
    pub remark: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecordSet {
    pub transactions: Vec<RawTransactionRow>,
    pub vendors: Vec<RawVendorRow>,
    pub sales_register: Vec<RawSalesRegisterRow>,
    pub cash_flow: Vec<RawCashFlowRow>,
    pub transfers: Vec<RawTransferRow>,
    pub sales_summary: Vec<RawMonthlySalesRow>,
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

/// Signed currency amount from user input: currency symbols, separators
/// and whitespace stripped; anything unparseable coerces to zero.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '₹' | ',') && !c.is_whitespace())
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Truthy form-state values: yes / true / 1 / y, case-insensitive.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "yes" | "true" | "1" | "y")
}

/// Map free-form type labels onto the canonical enum. Unknown labels
/// default to Sale, matching the upstream entry forms.
pub fn parse_type(raw: &str) -> TransactionType {
    let label: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .collect();
    if label.contains("loanin") || label.contains("borrow") || label == "loan" {
        TransactionType::LoanIn
    } else if label.contains("loanout") || label.contains("lend") || label.contains("advance") {
        TransactionType::LoanOut
    } else if label.contains("purchase") || label == "buy" || label == "cogs" {
        TransactionType::Purchase
    } else if label.contains("expense") || label == "operational" {
        TransactionType::Expense
    } else if label.contains("transfer") {
        TransactionType::Transfer
    } else {
        TransactionType::Sale
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Row conversions
// ---------------------------------------------------------------------------

pub fn transaction(row: &RawTransactionRow, index: usize) -> Transaction {
    Transaction {
        id: if row.id.trim().is_empty() {
            format!("T-{}", index + 1)
        } else {
            row.id.trim().to_string()
        },
        // Empty stays empty: date rules already degrade on unparseable
        // dates, and the normalizer carries no clock.
        date: row.date.trim().to_string(),
        amount: parse_amount(&row.amount).abs(),
        tx_type: parse_type(&row.tx_type),
        counterparty_name: optional(&row.party_name).unwrap_or_else(|| "Unknown".to_string()),
        category: row.category.trim().to_string(),
        is_related_party: parse_flag(&row.is_related_party),
        is_disclosed: parse_flag(&row.is_disclosed),
        actual_cash_flow: parse_amount(&row.actual_cash_flow),
        stated_purpose: optional(&row.stated_purpose),
        actual_usage: optional(&row.actual_usage),
    }
}

pub fn vendor(row: &RawVendorRow) -> VendorRecord {
    VendorRecord {
        vendor_id: row.id.trim().to_string(),
        name: row.vendor_name.trim().to_string(),
        bank_account_number: optional(&row.bank_account_no).unwrap_or_else(|| "N/A".to_string()),
        ifsc_code: row.ifsc_code.trim().to_string(),
        bank_address: row.bank_address.trim().to_string(),
        tax_id: row.gst_or_pan.trim().to_string(),
    }
}

pub fn sales_entry(row: &RawSalesRegisterRow) -> SalesRegisterEntry {
    SalesRegisterEntry {
        id: row.id.trim().to_string(),
        customer_name: row.customer_name.trim().to_string(),
        bank_account_number: optional(&row.bank_account_no).unwrap_or_else(|| "N/A".to_string()),
        ifsc_code: row.ifsc_code.trim().to_string(),
        location: row.location.trim().to_string(),
        tax_id: row.gst_or_pan.trim().to_string(),
    }
}

pub fn cash_flow(row: &RawCashFlowRow) -> CashFlowRecord {
    CashFlowRecord {
        date: row.date.trim().to_string(),
        opening_balance: parse_amount(&row.opening_cash),
        cash_in: parse_amount(&row.cash_in),
        cash_out: parse_amount(&row.cash_out),
        closing_balance: parse_amount(&row.closing_cash),
        flag: row.flag.trim().to_string(),
    }
}

pub fn transfer(row: &RawTransferRow) -> TransferRecord {
    TransferRecord {
        from_account: row.from_account.trim().to_string(),
        to_account: row.to_account.trim().to_string(),
        amount: parse_amount(&row.amount),
        remark: row.remark.trim().to_string(),
        reason: optional(&row.reason),
    }
}

pub fn monthly_sales(row: &RawMonthlySalesRow) -> MonthlySalesRecord {
    MonthlySalesRecord {
        month: row.month.trim().to_string(),
        sales_amount: parse_amount(&row.amount),
        remark: optional(&row.remark),
    }
}

/// Convert a full raw case file into canonical records.
pub fn record_set(raw: &RawRecordSet) -> RecordSet {
    RecordSet {
        transactions: raw
            .transactions
            .iter()
            .enumerate()
            .map(|(i, row)| transaction(row, i))
            .collect(),
        vendors: raw.vendors.iter().map(vendor).collect(),
        sales_register: raw.sales_register.iter().map(sales_entry).collect(),
        cash_flow: raw.cash_flow.iter().map(cash_flow).collect(),
        transfers: raw.transfers.iter().map(transfer).collect(),
        sales_summary: raw.sales_summary.iter().map(monthly_sales).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_formatting() {
        assert_eq!(parse_amount("₹1,00,000"), 100_000.0);
        assert_eq!(parse_amount(" 42000.50 "), 42_000.5);
        assert_eq!(parse_amount("-5,000"), -5_000.0);
    }

    #[test]
    fn test_parse_amount_coerces_junk_to_zero() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("N/A"), 0.0);
    }

    #[test]
    fn test_parse_flag_variants() {
        for truthy in ["yes", "Yes", "TRUE", "1", "y"] {
            assert!(parse_flag(truthy), "{truthy} should be true");
        }
        for falsy in ["no", "false", "0", "", "maybe"] {
            assert!(!parse_flag(falsy), "{falsy} should be false");
        }
    }

    #[test]
    fn test_parse_type_synonyms() {
        assert_eq!(parse_type("Revenue"), TransactionType::Sale);
        assert_eq!(parse_type("sale"), TransactionType::Sale);
        assert_eq!(parse_type("COGS"), TransactionType::Purchase);
        assert_eq!(parse_type("operational"), TransactionType::Expense);
        assert_eq!(parse_type("Bank Transfer"), TransactionType::Transfer);
        assert_eq!(parse_type("loan_in"), TransactionType::LoanIn);
        assert_eq!(parse_type("borrowing"), TransactionType::LoanIn);
        assert_eq!(parse_type("loan-out"), TransactionType::LoanOut);
        assert_eq!(parse_type("advance"), TransactionType::LoanOut);
    }

    #[test]
    fn test_parse_type_defaults_to_sale() {
        assert_eq!(parse_type(""), TransactionType::Sale);
        assert_eq!(parse_type("???"), TransactionType::Sale);
    }

    #[test]
    fn test_transaction_amount_is_magnitude_cash_flow_keeps_sign() {
        let row = RawTransactionRow {
            amount: "-4,00,00,000".to_string(),
            actual_cash_flow: "-4,00,00,000".to_string(),
            ..RawTransactionRow::default()
        };
        let tx = transaction(&row, 0);
        assert_eq!(tx.amount, 40_000_000.0);
        assert_eq!(tx.actual_cash_flow, -40_000_000.0);
    }

    #[test]
    fn test_transaction_fallbacks() {
        let row = RawTransactionRow::default();
        let tx = transaction(&row, 4);
        assert_eq!(tx.id, "T-5");
        assert_eq!(tx.counterparty_name, "Unknown");
        assert_eq!(tx.date, "");
        assert_eq!(tx.stated_purpose, None);
    }

    #[test]
    fn test_vendor_empty_account_becomes_sentinel() {
        let row = RawVendorRow {
            id: "5".to_string(),
            vendor_name: "Suresh Bhati".to_string(),
            ..RawVendorRow::default()
        };
        assert_eq!(vendor(&row).bank_account_number, "N/A");
    }

    #[test]
    fn test_record_set_conversion_covers_all_tables() {
        let raw: RawRecordSet = serde_json::from_str(
            r#"{
                "transactions": [{"id": "T-1", "date": "2024-01-05", "amount": "5000", "type": "sale"}],
                "vendors": [{"id": "1", "vendorName": "Rajesh", "bankAccountNo": "987654"}],
                "salesRegister": [{"id": "101", "customerName": "ABC Traders"}],
                "cashFlow": [{"date": "2025-01-05", "openingCash": "200000", "cashIn": "50000", "cashOut": "30000", "closingCash": "220000", "flag": "OK"}],
                "transfers": [{"fromAccount": "A", "toAccount": "B", "amount": "1,00,000", "remark": "Payment"}],
                "salesSummary": [{"month": "NOV", "amount": "1000000", "remark": "HIGH JUMP"}]
            }"#,
        )
        .unwrap();
        let records = record_set(&raw);
        assert_eq!(records.transactions[0].amount, 5_000.0);
        assert_eq!(records.vendors[0].bank_account_number, "987654");
        assert_eq!(records.sales_register[0].bank_account_number, "N/A");
        assert_eq!(records.cash_flow[0].closing_balance, 220_000.0);
        assert_eq!(records.transfers[0].amount, 100_000.0);
        assert_eq!(records.sales_summary[0].remark.as_deref(), Some("HIGH JUMP"));
    }
}
