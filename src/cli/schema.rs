use crate::config::Config;
use schemars::schema_for;

pub fn execute() -> anyhow::Result<()> {
    println!("{}", render()?);
    Ok(())
}

/// JSON Schema for `incusched.yaml`
pub fn render() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(Config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_nested_sections() {
        let schema = render().unwrap();
        assert!(schema.contains("lookup_batch_size"));
        assert!(schema.contains("grouped_day"));
        assert!(schema.contains("tuesday"));
        assert!(schema.contains("max_attempts"));
    }
}
