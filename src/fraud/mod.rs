// Fraud scoring: a fixed rule table applied to an extracted claim and the
// policy holder's reference profile.
//
// Scoring is pure and total: a malformed amount only disables the amount
// rules, and missing fields only disable the rules that need them.

pub mod rules;
pub mod verdict;

use tracing::debug;

use crate::extraction::models::ExtractedClaim;
use crate::extraction::profiles::ReferenceProfile;

use rules::{ClaimFacts, RULES};
pub use verdict::{RiskLevel, RiskVerdict};

/// Score an extracted claim against an optional reference profile.
pub fn score(extracted: &ExtractedClaim, profile: Option<&ReferenceProfile>) -> RiskVerdict {
    let amount = match extracted.amount_value() {
        Ok(amount) => amount,
        Err(e) => {
            debug!(error = %e, "Skipping amount rules");
            None
        }
    };

    let facts = ClaimFacts {
        amount,
        hospital: extracted
            .hospital
            .as_deref()
            .unwrap_or_default()
            .to_lowercase(),
        name: extracted.name.as_deref().filter(|n| !n.trim().is_empty()),
    };

    let triggered = RULES
        .iter()
        .filter(|rule| rule.kind.matches(&facts, profile))
        .map(|rule| (rule.points, rule.reason.to_string()))
        .collect();

    let verdict = RiskVerdict::from_triggered(triggered);
    debug!(
        fraud_score = verdict.fraud_score,
        risk_level = %verdict.risk_level,
        "Scored claim"
    );
    verdict
}
