use chrono::{Local, NaiveDate};
use colored::Colorize;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::error::Result;
use crate::fmt::money;
use crate::models::{AnalysisResult, MonthlyStat, RecordSet, RiskAnalysisResult, RiskLevel};
use crate::monthly::monthly_stats;
use crate::normalizer::{self, RawRecordSet};
use crate::patterns::analyze_records;
use crate::scorer::score_transaction;

pub fn run(file: &str, raw: bool, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let records = load_records(&text, raw)?;
    report(&records, Local::now().date_naive(), json)
}

pub(crate) fn load_records(text: &str, raw: bool) -> Result<RecordSet> {
    if raw {
        let rows: RawRecordSet = serde_json::from_str(text)?;
        Ok(normalizer::record_set(&rows))
    } else {
        Ok(serde_json::from_str(text)?)
    }
}

/// Run the full pipeline over one case file and render it.
pub(crate) fn report(records: &RecordSet, reference: NaiveDate, json_output: bool) -> Result<()> {
    let risk: Vec<RiskAnalysisResult> = records
        .transactions
        .iter()
        .map(|tx| score_transaction(tx, reference))
        .collect();
    let stats = monthly_stats(&records.transactions, reference);
    let findings = analyze_records(records);

    if json_output {
        let doc = json!({
            "riskAnalysis": risk,
            "monthlyStats": stats,
            "patternFindings": findings,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    render_risk(records, &risk);
    render_monthly(&stats);
    render_findings(&findings);
    Ok(())
}

fn level_cell(level: RiskLevel) -> Cell {
    let label = match level {
        RiskLevel::Critical => level.as_str().red().bold(),
        RiskLevel::High => level.as_str().red(),
        RiskLevel::Medium => level.as_str().yellow(),
        RiskLevel::Low => level.as_str().green(),
    };
    Cell::new(label)
}

fn render_risk(records: &RecordSet, risk: &[RiskAnalysisResult]) {
    if records.transactions.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Counterparty", "Amount", "Score", "Level", "Risk Factors"]);
    for (tx, result) in records.transactions.iter().zip(risk) {
        table.add_row(vec![
            Cell::new(&tx.id),
            Cell::new(&tx.date),
            Cell::new(&tx.counterparty_name),
            Cell::new(money(tx.amount)),
            Cell::new(result.score),
            level_cell(result.risk_level),
            Cell::new(result.risk_factors.join("; ")),
        ]);
    }
    println!("Transaction Risk\n{table}\n");
}

fn render_monthly(stats: &[MonthlyStat]) {
    if stats.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Month", "Sales", "Cash Flow", "Flagged", "Risk Score"]);
    for stat in stats {
        let score = if stat.risk_score >= 85 {
            stat.risk_score.to_string().red().bold()
        } else if stat.risk_score > 30 {
            stat.risk_score.to_string().yellow()
        } else {
            stat.risk_score.to_string().normal()
        };
        table.add_row(vec![
            Cell::new(&stat.month),
            Cell::new(money(stat.total_sales)),
            Cell::new(money(stat.total_cash_flow)),
            Cell::new(stat.flagged_count),
            Cell::new(score),
        ]);
    }
    println!("Monthly Overview\n{table}\n");
}

fn render_findings(findings: &AnalysisResult) {
    let mut any = false;

    if !findings.duplicate_vendors.is_empty() {
        any = true;
        let mut table = Table::new();
        table.set_header(vec!["Bank Account", "Original", "Duplicate"]);
        for pair in &findings.duplicate_vendors {
            table.add_row(vec![
                Cell::new(&pair.original.bank_account_number),
                Cell::new(format!("{} ({})", pair.original.name, pair.original.vendor_id)),
                Cell::new(format!("{} ({})", pair.duplicate.name, pair.duplicate.vendor_id)),
            ]);
        }
        println!("{}\n{table}\n", "Duplicate Vendors".red().bold());
    }

    if !findings.duplicate_sales.is_empty() {
        any = true;
        let mut table = Table::new();
        table.set_header(vec!["Entry ID", "Original", "Duplicate"]);
        for pair in &findings.duplicate_sales {
            table.add_row(vec![
                Cell::new(&pair.original.id),
                Cell::new(&pair.original.customer_name),
                Cell::new(&pair.duplicate.customer_name),
            ]);
        }
        println!("{}\n{table}\n", "Duplicate Sales Entries".red().bold());
    }

    if !findings.cash_flow_anomalies.is_empty() {
        any = true;
        let mut table = Table::new();
        table.set_header(vec!["Date", "Expected Closing", "Actual Closing", "Difference"]);
        for anomaly in &findings.cash_flow_anomalies {
            table.add_row(vec![
                Cell::new(&anomaly.date),
                Cell::new(money(anomaly.expected)),
                Cell::new(money(anomaly.actual)),
                Cell::new(money(anomaly.difference).red()),
            ]);
        }
        println!("{}\n{table}\n", "Cash-Flow Anomalies".red().bold());
    }

    if !findings.circular_trading.is_empty() {
        any = true;
        let mut table = Table::new();
        table.set_header(vec!["Cycle", "Amount"]);
        for cycle in &findings.circular_trading {
            table.add_row(vec![
                Cell::new(cycle.cycle.join(" -> ")),
                Cell::new(money(cycle.amount)),
            ]);
        }
        println!("{}\n{table}\n", "Circular Trading".red().bold());
    }

    if !findings.sales_spikes.is_empty() {
        any = true;
        let mut table = Table::new();
        table.set_header(vec!["Month", "Sales", "Remark"]);
        for spike in &findings.sales_spikes {
            table.add_row(vec![
                Cell::new(&spike.month),
                Cell::new(money(spike.amount)),
                Cell::new(spike.growth.yellow()),
            ]);
        }
        println!("{}\n{table}\n", "Sales Spikes".red().bold());
    }

    if !any {
        println!("{}", "No pattern findings.".green());
    }
}
