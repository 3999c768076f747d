// Fraud rule table.
//
// Each rule is an independent predicate with fixed points and a fixed reason.
// Rules are evaluated in table order and every triggered rule contributes,
// so the reasons list always follows table order.

use crate::extraction::profiles::ReferenceProfile;

/// Claims above this amount score the high-amount rule.
pub const HIGH_AMOUNT_THRESHOLD: f64 = 50_000.0;
/// Exact multiples of this unit (above one unit) look fabricated.
pub const ROUND_AMOUNT_UNIT: f64 = 10_000.0;
/// Substrings of a lower-cased hospital name that mark it as unverified.
pub const SUSPICIOUS_HOSPITAL_MARKERS: &[&str] = &["unknown", "test", "demo", "sample", "fake"];

/// Score at which a claim is Medium risk and flagged suspicious.
pub const SUSPICIOUS_SCORE: i64 = 25;
/// Score at which a claim is High risk.
pub const HIGH_RISK_SCORE: i64 = 50;

/// Claim fields prepared once for rule evaluation.
#[derive(Debug, Clone, Default)]
pub struct ClaimFacts<'a> {
    /// Parsed amount; None when absent or malformed
    pub amount: Option<f64>,
    /// Lower-cased hospital name, empty when absent
    pub hospital: String,
    /// Extracted name, None when absent or blank
    pub name: Option<&'a str>,
}

/// Predicate half of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    HighAmount,
    RoundAmount,
    UnverifiedHospital,
    PriorClaims,
    NameMismatch,
}

impl RuleKind {
    pub fn matches(&self, facts: &ClaimFacts<'_>, profile: Option<&ReferenceProfile>) -> bool {
        match self {
            RuleKind::HighAmount => facts.amount.is_some_and(|a| a > HIGH_AMOUNT_THRESHOLD),
            RuleKind::RoundAmount => facts
                .amount
                .is_some_and(|a| a % ROUND_AMOUNT_UNIT == 0.0 && a > ROUND_AMOUNT_UNIT),
            RuleKind::UnverifiedHospital => {
                !facts.hospital.is_empty()
                    && SUSPICIOUS_HOSPITAL_MARKERS
                        .iter()
                        .any(|marker| facts.hospital.contains(marker))
            }
            RuleKind::PriorClaims => profile.is_some_and(|p| p.prior_claimed_amount > 0.0),
            RuleKind::NameMismatch => match (facts.name, profile) {
                (Some(extracted), Some(p)) if !p.name.trim().is_empty() => {
                    normalize_name(extracted) != normalize_name(&p.name)
                }
                _ => false,
            },
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct FraudRule {
    pub kind: RuleKind,
    pub points: i64,
    pub reason: &'static str,
}

/// The rule table, in evaluation order.
pub const RULES: &[FraudRule] = &[
    FraudRule {
        kind: RuleKind::HighAmount,
        points: 20,
        reason: "High claim amount (>50,000)",
    },
    FraudRule {
        kind: RuleKind::RoundAmount,
        points: 15,
        reason: "Suspicious round number amount",
    },
    FraudRule {
        kind: RuleKind::UnverifiedHospital,
        points: 30,
        reason: "Unverified or suspicious hospital name",
    },
    FraudRule {
        kind: RuleKind::PriorClaims,
        points: 10,
        reason: "Previous claims detected",
    },
    FraudRule {
        kind: RuleKind::NameMismatch,
        points: 25,
        reason: "Name mismatch with user profile",
    },
];

/// Lower-case a name and drop every whitespace character.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
