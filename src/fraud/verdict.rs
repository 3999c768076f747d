// Risk verdict: the output bundle of a scoring call.

use serde::{Deserialize, Serialize};

use super::rules::{HIGH_RISK_SCORE, SUSPICIOUS_SCORE};

/// Risk level thresholds over the accumulated fraud score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify an accumulated fraud score.
    pub fn from_score(score: i64) -> Self {
        match score {
            s if s >= HIGH_RISK_SCORE => RiskLevel::High,
            s if s >= SUSPICIOUS_SCORE => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of scoring one extracted claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskVerdict {
    /// Sum of the points of every triggered rule. No upper cap.
    pub fraud_score: i64,
    /// One entry per triggered rule, in rule order
    pub fraud_reasons: Vec<String>,
    pub risk_level: RiskLevel,
    /// True from the Medium boundary upward
    pub is_suspicious: bool,
}

impl RiskVerdict {
    /// Build a verdict from the triggered rules' points and reasons.
    pub fn from_triggered(triggered: Vec<(i64, String)>) -> Self {
        let fraud_score = triggered.iter().map(|(points, _)| points).sum();
        let fraud_reasons = triggered.into_iter().map(|(_, reason)| reason).collect();
        Self {
            fraud_score,
            fraud_reasons,
            risk_level: RiskLevel::from_score(fraud_score),
            is_suspicious: fraud_score >= SUSPICIOUS_SCORE,
        }
    }
}
