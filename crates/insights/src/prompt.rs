//! Analyst prompt for the decision cockpit.

use crate::types::InsightsRequest;

pub const SYSTEM_PROMPT: &str = "You are an expert marketing analyst tasked with \
creating a \"Decision Cockpit\". Analyze marketing mix model dashboard data and \
respond with a single JSON object containing exactly these keys: \
\"recommendations\" (array of 3-5 concrete, actionable sentences), \
\"expected_uplift\" (estimated profit uplift range, e.g. \"3-5%\"), \
\"assumptions\" (array of key assumptions), and \"risks\" (array of potential \
risks or limitations).";

/// Render the user-turn prompt for a request.
pub fn user_prompt(request: &InsightsRequest) -> String {
    format!(
        "Analyze the following marketing mix model dashboard data and generate a \
summary of recommended actions, expected profit uplift, key assumptions, and \
potential risks.\n\nDashboard Data: {}",
        request.dashboard_data
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_payload() {
        let request = InsightsRequest {
            dashboard_data: "{\"total_roas\":3.2}".to_string(),
        };
        let prompt = user_prompt(&request);
        assert!(prompt.contains("{\"total_roas\":3.2}"));
        assert!(prompt.contains("expected profit uplift"));
    }

    #[test]
    fn test_system_prompt_names_all_output_keys() {
        for key in ["recommendations", "expected_uplift", "assumptions", "risks"] {
            assert!(SYSTEM_PROMPT.contains(key), "missing {key}");
        }
    }
}
