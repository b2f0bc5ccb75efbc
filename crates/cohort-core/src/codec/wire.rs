//! Wire representation of a rule set
//!
//! The wire tree has the same JSON shape as the internal one; only the
//! content of filter fields differs. Wrapping it in its own type keeps the
//! two from being mixed up.

use crate::ast::RuleSet;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Rule set in wire shape: filter fields are unqualified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireRuleSet(RuleSet);

impl WireRuleSet {
    /// Wrap a tree whose filter fields are already unqualified
    pub fn from_inner(ruleset: RuleSet) -> Self {
        Self(ruleset)
    }

    pub fn as_inner(&self) -> &RuleSet {
        &self.0
    }

    pub fn into_inner(self) -> RuleSet {
        self.0
    }
}

/// Parse wire JSON. `null` and an empty rule list both decode to `None`.
pub fn from_json_str(json: &str) -> Result<Option<WireRuleSet>> {
    let wire: Option<WireRuleSet> = serde_json::from_str(json)?;
    Ok(wire.filter(|wire| !wire.0.is_empty()))
}

/// Serialize a wire tree; `None` becomes `null`
pub fn to_json_string(wire: Option<&WireRuleSet>) -> Result<String> {
    Ok(serde_json::to_string(&wire)?)
}
