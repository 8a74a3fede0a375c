use marquee::connect::operations::execute_dynamic;
use marquee::error::{MarqueeError, Result};
use serde_json::Value;

/// Execute an operation by wire name and print the raw payload
pub async fn run(config_path: &str, operation: &str, vars: Option<&str>) -> Result<()> {
    let vars: Option<Value> = vars
        .map(serde_json::from_str)
        .transpose()
        .map_err(|e| MarqueeError::InvalidArgument(format!("--vars is not valid JSON: {}", e)))?;

    let (_, dc) = super::connect(config_path)?;
    let result = execute_dynamic(&dc, operation, vars.as_ref()).await?;

    println!("{}", serde_json::to_string_pretty(&result.data)?);
    Ok(())
}
