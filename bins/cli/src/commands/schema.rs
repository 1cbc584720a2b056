//! `dq schema`: JSON Schema of the request model, or of the validate response.

use crate::error::CliError;
use crate::output::{CliOutput, render_json};
use deal_query_api::v1::{api_v1_query_parameters_schema, api_v1_validate_response_schema};

/// Run the schema command. Output is JSON in every mode.
pub fn run_schema(response: bool) -> Result<CliOutput, CliError> {
    let schema = if response {
        api_v1_validate_response_schema()
    } else {
        api_v1_query_parameters_schema()
    };
    Ok(CliOutput::ok(render_json(&schema)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(output: &CliOutput) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
        let properties = value
            .get("properties")
            .and_then(serde_json::Value::as_object)
            .ok_or("schema should list properties")?;
        let mut keys: Vec<_> = properties.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    #[test]
    fn request_schema_is_the_default() -> Result<(), Box<dyn std::error::Error>> {
        let keys = properties(&run_schema(false)?)?;
        assert_eq!(keys.len(), 16);
        assert!(keys.iter().any(|key| key == "customParameterValue"));
        Ok(())
    }

    #[test]
    fn response_schema_describes_validate_output() -> Result<(), Box<dyn std::error::Error>> {
        let keys = properties(&run_schema(true)?)?;
        assert_eq!(keys, ["issues", "valid"]);
        Ok(())
    }
}
