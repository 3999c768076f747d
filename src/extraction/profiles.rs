// Reference profiles: the known-good identity and claim history that an
// extracted bill is cross-checked against.
//
// The lookup is a trait so a real identity store can replace the in-memory
// demo directory without touching the scoring or web code.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trusted identity and claim-history record for one policy holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceProfile {
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    /// Total already claimed against the policy
    #[serde(default)]
    pub prior_claimed_amount: f64,
}

/// Source of reference profiles.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Look up the profile for a mobile number. `None` asks for the
    /// directory's default profile (the logged-in demo user).
    async fn lookup(&self, mobile: Option<&str>) -> Result<Option<ReferenceProfile>>;
}

/// In-memory directory keyed by mobile number.
pub struct StaticProfiles {
    by_mobile: HashMap<String, ReferenceProfile>,
    default_mobile: Option<String>,
}

impl StaticProfiles {
    pub fn new(default_mobile: Option<String>) -> Self {
        Self {
            by_mobile: HashMap::new(),
            default_mobile,
        }
    }

    pub fn with_profile(mut self, mobile: &str, profile: ReferenceProfile) -> Self {
        self.by_mobile.insert(mobile.to_string(), profile);
        self
    }

    /// The two demo policy holders the client app ships with. The first one
    /// is the default when a request doesn't identify the user.
    pub fn demo() -> Self {
        Self::new(Some("9028833979".to_string()))
            .with_profile(
                "9028833979",
                ReferenceProfile {
                    name: "Vandan Dalvi".to_string(),
                    age: Some(26),
                    prior_claimed_amount: 200_000.0,
                },
            )
            .with_profile(
                "9123456780",
                ReferenceProfile {
                    name: "Shravani Rangnekar".to_string(),
                    age: Some(21),
                    prior_claimed_amount: 1_000_000.0,
                },
            )
    }

    pub fn len(&self) -> usize {
        self.by_mobile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_mobile.is_empty()
    }
}

#[async_trait]
impl ProfileDirectory for StaticProfiles {
    async fn lookup(&self, mobile: Option<&str>) -> Result<Option<ReferenceProfile>> {
        let key = match mobile.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => m,
            None => match self.default_mobile.as_deref() {
                Some(m) => m,
                None => return Ok(None),
            },
        };
        Ok(self.by_mobile.get(key).cloned())
    }
}
