//! Audit trace model.
//!
//! Every reconciliation records the decisions it made as a sequence of
//! [`AuditStep`]s so a rebuilt ledger can be explained row by row.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a reconciliation decision.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "anchor_resolution".to_string(),
///     rule_name: "Anchor Week Resolution".to_string(),
///     input: serde_json::json!({"process_date": "14/11/2025"}),
///     output: serde_json::json!({"week_start": "2025-11-10"}),
///     reasoning: "Process date 2025-11-14 falls in the week starting 2025-11-10".to_string(),
/// };
/// assert_eq!(step.rule_id, "anchor_resolution");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "forward_pass".to_string(),
            rule_name: "Forward Pass".to_string(),
            input: serde_json::json!({"weeks": 2}),
            output: serde_json::json!({"rows": 2}),
            reasoning: "Computed 2 weeks exactly".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":3"));
        assert!(json.contains("\"rule_id\":\"forward_pass\""));
        assert!(json.contains("\"input\":{\"weeks\":2}"));
    }
}
