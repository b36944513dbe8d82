use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{
    AnalysisResult, CashFlowAnomaly, CashFlowRecord, CircularTrade, DuplicatePair,
    MonthlySalesRecord, RecordSet, SalesRegisterEntry, SalesSpike, TransferRecord, VendorRecord,
};

/// Two reversed transfer legs match when their amounts differ by at most
/// this fraction of the first leg's amount.
const CYCLE_AMOUNT_TOLERANCE: f64 = 0.05;

/// A monthly sales figure above this multiple of the mean is a spike.
const SPIKE_MEAN_MULTIPLE: f64 = 1.5;

const SPIKE_REMARK: &str = "HIGH JUMP";

/// Vendors whose bank account is unknown carry this sentinel and are
/// excluded from duplicate matching.
const UNKNOWN_ACCOUNT: &str = "N/A";

// ---------------------------------------------------------------------------
// Duplicate records
// ---------------------------------------------------------------------------

/// First-seen-wins duplicate scan: the first record for a key is stored
/// as the original; every later sighting of that key pairs with it.
/// Records whose key resolves to None never match and are never stored.
fn scan_duplicates<T, K, F>(records: &[T], key_of: F) -> Vec<DuplicatePair<T>>
where
    T: Clone,
    K: Hash + Eq,
    F: Fn(&T) -> Option<K>,
{
    let mut seen: HashMap<K, &T> = HashMap::new();
    let mut pairs = Vec::new();
    for record in records {
        let Some(key) = key_of(record) else {
            continue;
        };
        match seen.entry(key) {
            Entry::Occupied(original) => pairs.push(DuplicatePair {
                original: (*original.get()).clone(),
                duplicate: record.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }
    pairs
}

/// Flag vendors sharing a bank account number.
pub fn duplicate_vendors(vendors: &[VendorRecord]) -> Vec<DuplicatePair<VendorRecord>> {
    scan_duplicates(vendors, |v| {
        (v.bank_account_number != UNKNOWN_ACCOUNT).then(|| v.bank_account_number.clone())
    })
}

/// Flag sales-register entries sharing an id.
pub fn duplicate_sales(entries: &[SalesRegisterEntry]) -> Vec<DuplicatePair<SalesRegisterEntry>> {
    scan_duplicates(entries, |e| Some(e.id.clone()))
}

// ---------------------------------------------------------------------------
// Cash-flow reconciliation
// ---------------------------------------------------------------------------

/// Fixed-precision currency units. Both sides of the reconciliation are
/// compared in paise so float representation noise never reports a
/// balanced day as broken.
fn to_paise(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Report days where closing != opening + in - out.
pub fn cash_flow_anomalies(records: &[CashFlowRecord]) -> Vec<CashFlowAnomaly> {
    records
        .iter()
        .filter_map(|record| {
            let expected = record.opening_balance + record.cash_in - record.cash_out;
            (to_paise(expected) != to_paise(record.closing_balance)).then(|| CashFlowAnomaly {
                date: record.date.clone(),
                expected,
                actual: record.closing_balance,
                difference: record.closing_balance - expected,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Circular trading
// ---------------------------------------------------------------------------

/// Two-hop cycle detection over transfer legs: a pair i < j whose account
/// pairs reverse each other within the amount tolerance. Legs with an
/// empty account on either side are external cash movements and are
/// skipped up front. Longer chains are out of scope.
pub fn circular_transfers(transfers: &[TransferRecord]) -> Vec<CircularTrade> {
    let legs: Vec<&TransferRecord> = transfers
        .iter()
        .filter(|t| !t.from_account.is_empty() && !t.to_account.is_empty())
        .collect();

    let mut cycles = Vec::new();
    for i in 0..legs.len() {
        for j in (i + 1)..legs.len() {
            let (out, back) = (legs[i], legs[j]);
            if out.to_account == back.from_account && out.from_account == back.to_account {
                // Tolerance is taken from the first leg's amount only,
                // not the pair average.
                let margin = out.amount * CYCLE_AMOUNT_TOLERANCE;
                if (out.amount - back.amount).abs() <= margin {
                    cycles.push(CircularTrade {
                        cycle: vec![
                            out.from_account.clone(),
                            out.to_account.clone(),
                            out.from_account.clone(),
                        ],
                        amount: out.amount,
                    });
                }
            }
        }
    }
    cycles
}

// ---------------------------------------------------------------------------
// Sales spikes
// ---------------------------------------------------------------------------

/// Compute the spike threshold from the record set itself: anything above
/// 1.5x the arithmetic mean of all sales amounts.
pub fn sales_spikes_from_mean(records: &[MonthlySalesRecord]) -> Vec<SalesSpike> {
    if records.is_empty() {
        return Vec::new();
    }
    let mean = records.iter().map(|r| r.sales_amount).sum::<f64>() / records.len() as f64;
    let threshold = mean * SPIKE_MEAN_MULTIPLE;
    records
        .iter()
        .filter(|r| r.sales_amount > threshold)
        .map(|r| SalesSpike {
            month: r.month.clone(),
            amount: r.sales_amount,
            growth: SPIKE_REMARK.to_string(),
        })
        .collect()
}

/// Trust remarks already set upstream instead of recomputing a threshold.
/// A record set goes through exactly one of the two spike modes.
pub fn sales_spikes_from_remarks(records: &[MonthlySalesRecord]) -> Vec<SalesSpike> {
    records
        .iter()
        .filter_map(|r| {
            let remark = r.remark.as_deref()?;
            remark.contains(SPIKE_REMARK).then(|| SalesSpike {
                month: r.month.clone(),
                amount: r.sales_amount,
                growth: remark.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Run all five cross-record scans over a case file. The spike scan
/// trusts upstream remarks here; use `sales_spikes_from_mean` directly
/// for summaries without precomputed remarks.
pub fn analyze_records(records: &RecordSet) -> AnalysisResult {
    AnalysisResult {
        duplicate_vendors: duplicate_vendors(&records.vendors),
        duplicate_sales: duplicate_sales(&records.sales_register),
        cash_flow_anomalies: cash_flow_anomalies(&records.cash_flow),
        circular_trading: circular_transfers(&records.transfers),
        sales_spikes: sales_spikes_from_remarks(&records.sales_summary),
    }
}
