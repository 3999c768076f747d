// Colored terminal output for claim analyses, language checks and
// keep-alive runs. The CLI commands in main.rs delegate here.

use colored::Colorize;

use crate::fraud::{RiskLevel, RiskVerdict};
use crate::keepalive::{KeepAliveSummary, PingOutcome, PingReport};
use crate::language::Language;
use crate::pipeline::document::ClaimAnalysis;

/// Display extracted fields followed by the fraud verdict.
pub fn display_claim_analysis(analysis: &ClaimAnalysis) {
    let claim = &analysis.extracted;

    println!("\n{}", "=== Extracted Claim ===".bold());
    let fields = [
        ("Name", &claim.name),
        ("Age", &claim.age),
        ("Reason", &claim.reason),
        ("Hospital", &claim.hospital),
        ("Amount", &claim.amount),
        ("Date", &claim.date),
        ("Doctor", &claim.doctor),
    ];
    for (label, value) in fields {
        match value {
            Some(v) => println!("  {:<10} {}", label, v),
            None => println!("  {:<10} {}", label, "-".dimmed()),
        }
    }

    if let Some(quality) = &claim.document_quality {
        println!("  {:<10} {}", "Quality", quality);
    }
    if !claim.suspicious_patterns.is_empty() {
        println!("\n  Model-flagged patterns:");
        for pattern in &claim.suspicious_patterns {
            println!("    {} {}", "~".yellow(), pattern);
        }
    }
    if !claim.missing_info.is_empty() {
        println!("\n  Missing information:");
        for item in &claim.missing_info {
            println!("    {} {}", "-".dimmed(), item);
        }
    }
    if let Some(raw) = claim.extra.get("raw").and_then(|v| v.as_str()) {
        println!("\n  Model reply (no JSON found):");
        println!("    {}", super::truncate_chars(raw, 300).dimmed());
    }

    display_verdict(&analysis.fraud_detection);
}

/// Display a fraud verdict.
pub fn display_verdict(verdict: &RiskVerdict) {
    println!("\n{}", "=== Fraud Check ===".bold());
    println!("  Risk level: {}", colorize_level(verdict.risk_level));
    println!("  Fraud score: {}", verdict.fraud_score);

    let flag = if verdict.is_suspicious {
        "yes".red().bold().to_string()
    } else {
        "no".green().to_string()
    };
    println!("  Suspicious: {flag}");

    if verdict.fraud_reasons.is_empty() {
        println!("  {}", "No fraud rules triggered.".dimmed());
    } else {
        println!();
        for (i, reason) in verdict.fraud_reasons.iter().enumerate() {
            println!("    {}. {}", i + 1, reason);
        }
    }
}

/// Display the detected language for a message.
pub fn display_language(text: &str, language: Language) {
    let preview = super::truncate_chars(text, 80);
    println!("  \"{}\" -> {}", preview.dimmed(), language.as_str().bold());
}

/// Display one keep-alive ping as it completes.
pub fn display_ping(report: &PingReport) {
    let timestamp = report.at.to_rfc3339();
    match &report.outcome {
        PingOutcome::Success(code) => println!(
            "  {} [{}] {} - Status: {}",
            "ok".green(),
            timestamp,
            report.target.name,
            code
        ),
        PingOutcome::Warning(code) => println!(
            "  {} [{}] {} - Status: {}",
            "!!".yellow(),
            timestamp,
            report.target.name,
            code
        ),
        PingOutcome::Error(msg) => println!(
            "  {} [{}] {} - Error: {}",
            "xx".red(),
            timestamp,
            report.target.name,
            msg
        ),
        PingOutcome::Timeout => println!(
            "  {} [{}] {} - Timeout",
            "xx".red(),
            timestamp,
            report.target.name
        ),
    }
}

/// Display the keep-alive tally and list the failing services.
pub fn display_keepalive_summary(reports: &[PingReport]) {
    let summary = KeepAliveSummary::from_reports(reports);

    println!("\n{}", "Summary:".bold());
    println!("  Successful: {}", summary.successful.to_string().green());
    println!("  Warnings:   {}", summary.warnings.to_string().yellow());
    println!("  Errors:     {}", summary.errors.to_string().red());

    if summary.errors > 0 {
        println!("\n  Services with issues:");
        for report in reports.iter().filter(|r| r.outcome.is_failure()) {
            let detail = match &report.outcome {
                PingOutcome::Error(msg) => msg.as_str(),
                _ => "Request timeout",
            };
            println!("    - {}: {}", report.target.name, detail);
        }
    }
}

/// Colorize a risk level.
fn colorize_level(level: RiskLevel) -> colored::ColoredString {
    match level {
        RiskLevel::High => level.as_str().red().bold(),
        RiskLevel::Medium => level.as_str().yellow(),
        RiskLevel::Low => level.as_str().green(),
    }
}
