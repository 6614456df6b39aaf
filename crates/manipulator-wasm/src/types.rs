//! Conversions between JavaScript call arguments and core types.

use manipulator_core::{parse_actions, Action, ActionError};
use serde_json::Value;

/// Parse the optional `actions` argument.
///
/// A missing list means no actions. Entries without a recognised action key
/// are skipped.
pub(crate) fn actions_from_values(
    values: Option<Vec<Value>>,
) -> Result<Vec<Action>, ActionError> {
    match values {
        Some(values) => parse_actions(&values),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actions_missing() {
        assert!(actions_from_values(None).unwrap().is_empty());
    }

    #[test]
    fn test_actions_parsed_in_order() {
        let actions = actions_from_values(Some(vec![
            json!({"rotate": 90}),
            json!({"flip": "vertical"}),
        ]))
        .unwrap();

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].name(), "rotate");
        assert_eq!(actions[1].name(), "flip");
    }

    #[test]
    fn test_actions_malformed_params() {
        let result = actions_from_values(Some(vec![json!({"rotate": "left"})]));
        assert!(result.is_err());
    }
}
