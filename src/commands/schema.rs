use crate::cli::OutputFormat;
use crate::error::Result;
use crate::schema::{ParamSpec, ParameterSchema};
use serde_json::json;

pub fn execute(format: OutputFormat) -> Result<()> {
    let schema = ParameterSchema::standard();

    match format {
        OutputFormat::Json => {
            let specs: Vec<_> = schema.specs().iter().map(spec_json).collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
        OutputFormat::Text => {
            println!(
                "{:<26} {:<34} {:<22} DESCRIPTION",
                "KEY", "TYPE", "DEFAULT"
            );
            for spec in schema.specs() {
                println!(
                    "{:<26} {:<34} {:<22} {}",
                    spec.key.as_str(),
                    spec.value_type.to_string(),
                    requirement(spec),
                    spec.description
                );
            }
        }
    }

    Ok(())
}

fn requirement(spec: &ParamSpec) -> String {
    match spec.default_value() {
        Some(default) => default.to_string(),
        None => "(required)".to_string(),
    }
}

fn spec_json(spec: &ParamSpec) -> serde_json::Value {
    json!({
        "key": spec.key.as_str(),
        "type": spec.value_type.to_string(),
        "concern": spec.key.concern().to_string(),
        "required": spec.is_required(),
        "default": spec.default_value().map(|d| d.to_string()),
        "description": spec.description,
    })
}
