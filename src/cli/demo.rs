use chrono::Local;

use crate::cli::analyze::report;
use crate::error::Result;
use crate::models::{
    CashFlowRecord, MonthlySalesRecord, RecordSet, SalesRegisterEntry, Transaction,
    TransactionType, TransferRecord, VendorRecord,
};

fn txn(
    id: &str,
    date: &str,
    amount: f64,
    tx_type: TransactionType,
    party: &str,
    category: &str,
    cash: f64,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date.to_string(),
        amount,
        tx_type,
        counterparty_name: party.to_string(),
        category: category.to_string(),
        is_related_party: false,
        is_disclosed: true,
        actual_cash_flow: cash,
        stated_purpose: None,
        actual_usage: None,
    }
}

/// One year of sample books: normal activity in January, a growing
/// debtor balance in February, and a March with a year-end spike, an
/// undisclosed related party, and a diverted loan.
fn demo_transactions() -> Vec<Transaction> {
    use TransactionType::*;

    let mut txns = vec![
        txn("T-JAN-01", "2024-01-05", 5_000_000.0, Sale, "Standard Client A", "Revenue", 5_000_000.0),
        txn("T-JAN-02", "2024-01-12", 3_000_000.0, Purchase, "Vendor X", "COGS", -3_000_000.0),
        txn("T-JAN-03", "2024-01-20", 15_000_000.0, Sale, "Retail Chain B", "Revenue", 15_000_000.0),
        txn("T-FEB-01", "2024-02-10", 22_000_000.0, Sale, "Tech Corp", "Revenue", 22_000_000.0),
        // High sales growth while the debtor balance climbs: no cash came in.
        txn("T-162", "2024-02-25", 42_000_000.0, Sale, "Global Impex", "Revenue", 0.0),
        // Sudden year-end sale to a new customer, no cash received.
        txn("T-101", "2024-03-28", 80_000_000.0, Sale, "Viper Holdings", "Revenue", 0.0),
        txn("T-145", "2024-03-29", 65_000_000.0, Sale, "ABC Traders", "Revenue", 0.0),
        txn("T-LOAN-01", "2024-03-15", 100_000_000.0, LoanIn, "City Bank", "Financial", 100_000_000.0),
        txn("T-LOAN-02", "2024-03-16", 40_000_000.0, Expense, "Promoter Shell Co", "Operational", -40_000_000.0),
        txn("T-LOAN-03", "2024-03-18", 20_000_000.0, Expense, "Staff Payroll", "Operational", -20_000_000.0),
    ];

    // T-145: promoter-related entity, never disclosed.
    txns[6].is_related_party = true;
    txns[6].is_disclosed = false;

    txns[7].stated_purpose = Some("New Factory Construction".to_string());
    txns[8].is_related_party = true;
    txns[8].is_disclosed = false;
    txns[8].stated_purpose = Some("New Factory Construction".to_string());
    txns[8].actual_usage = Some("Paying Old Debts".to_string());
    txns[9].actual_usage = Some("Salaries".to_string());

    txns
}

fn vendor(id: &str, name: &str, account: &str, ifsc: &str, address: &str, tax: &str) -> VendorRecord {
    VendorRecord {
        vendor_id: id.to_string(),
        name: name.to_string(),
        bank_account_number: account.to_string(),
        ifsc_code: ifsc.to_string(),
        bank_address: address.to_string(),
        tax_id: tax.to_string(),
    }
}

fn sales_entry(id: &str, customer: &str, account: &str, ifsc: &str, location: &str, tax: &str) -> SalesRegisterEntry {
    SalesRegisterEntry {
        id: id.to_string(),
        customer_name: customer.to_string(),
        bank_account_number: account.to_string(),
        ifsc_code: ifsc.to_string(),
        location: location.to_string(),
        tax_id: tax.to_string(),
    }
}

fn cash_day(date: &str, opening: f64, cash_in: f64, cash_out: f64, closing: f64, flag: &str) -> CashFlowRecord {
    CashFlowRecord {
        date: date.to_string(),
        opening_balance: opening,
        cash_in,
        cash_out,
        closing_balance: closing,
        flag: flag.to_string(),
    }
}

fn transfer(from: &str, to: &str, amount: f64, remark: &str, reason: Option<&str>) -> TransferRecord {
    TransferRecord {
        from_account: from.to_string(),
        to_account: to.to_string(),
        amount,
        remark: remark.to_string(),
        reason: reason.map(str::to_string),
    }
}

fn summary(month: &str, sales: f64, remark: Option<&str>) -> MonthlySalesRecord {
    MonthlySalesRecord {
        month: month.to_string(),
        sales_amount: sales,
        remark: remark.map(str::to_string),
    }
}

/// The bundled sample case file. Built fresh on every call; the engine
/// takes all record sets as explicit parameters and keeps no state.
pub fn demo_records() -> RecordSet {
    RecordSet {
        transactions: demo_transactions(),
        vendors: vec![
            vendor("1", "Rajesh Kumar Sharma", "987654-321012", "SBIN0001234", "Pali Main Branch, Rajasthan", "08AAAAA0000A1Z5"),
            vendor("2", "Amit Singh", "501001-234567", "HDFC0000456", "Mumbai, Maharashtra", "27AAAAA0000A1Z5"),
            vendor("3", "Priya Verma", "40500-0123456", "ICIC0000004", "Delhi, Connaught Place", "07BBBBB1111B1Z2"),
            // Same account as vendor 1 under a reused name.
            vendor("4", "Rajesh Kumar Sharma", "987654-321012", "SBIN0001234", "Pali Main Branch, Rajasthan", "08AAAAA0000A1Z5"),
            vendor("5", "Suresh Bhati", "N/A", "N/A", "Jodhpur", "N/A"),
        ],
        sales_register: vec![
            sales_entry("101", "ABC Traders", "30210015000123", "PUNB0302100", "Jodhpur, Rajasthan", "08CCCCC2222C1Z9"),
            sales_entry("102", "XYZ Corp", "12340100012345", "BARB0PAL0XX", "Pali, Rajasthan", "08DDDDD3333D1Z0"),
            sales_entry("103", "Dummy Customer", "915010045678901", "UTIB0000123", "Bangalore, Karnataka", "29EEEEE4444E1Z7"),
            sales_entry("104", "CBD Company", "N/A", "N/A", "N/A", "N/A"),
            sales_entry("101", "ABC Traders", "30210015000123", "PUNB0302100", "Jodhpur, Rajasthan", "08CCCCC2222C1Z9"),
            sales_entry("102", "XYZ Corp", "12340100012345", "BARB0PAL0XX", "Pali, Rajasthan", "08DDDDD3333D1Z0"),
        ],
        cash_flow: vec![
            cash_day("2025-01-05", 200_000.0, 50_000.0, 30_000.0, 220_000.0, "OK"),
            cash_day("2025-01-06", 220_000.0, 90_000.0, 150_000.0, 150_000.0, "Cash Missing"),
            cash_day("2025-01-07", 160_000.0, 80_000.0, 120_000.0, 110_000.0, "Cash Missing"),
            cash_day("2025-01-08", 120_000.0, 80_000.0, 60_000.0, 140_000.0, "ok"),
            cash_day("2025-01-09", 140_000.0, 70_000.0, 90_000.0, 115_000.0, "Cash Missing"),
        ],
        transfers: vec![
            transfer("Company A", "Vendor X", 100_000.0, "Payment", None),
            transfer("Vendor X", "Company A", 98_000.0, "Returned", None),
            transfer("Company A", "Vendor X", 100_000.0, "Repeated Cycle", None),
            transfer("BANK LOAN", "", 1_000_000.0, "RECEIVED", Some("MANUFACTURING")),
            transfer("PAID SALARY", "", 500_000.0, "Payment", Some("SALARY")),
            transfer("OLD DEBTS", "", 500_000.0, "Payment", Some("OLD DUE CLEARING")),
        ],
        sales_summary: vec![
            summary("APR", 45_000.0, None),
            summary("MAY", 50_000.0, None),
            summary("JUNE", 120_000.0, Some("HIGH JUMP")),
            summary("JULY", 60_000.0, None),
            summary("AUG", 65_000.0, None),
            summary("NOV", 1_000_000.0, Some("HIGH JUMP")),
            summary("DEC", 70_000.0, None),
        ],
    }
}

pub fn run(json: bool) -> Result<()> {
    report(&demo_records(), Local::now().date_naive(), json)
}
