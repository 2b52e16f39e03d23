use crate::error::AppResult;
use crate::io;
use crate::logging::{log, LogLevel};
use crate::model::output::PokemonRecord;
use schemars::schema::RootSchema;
use schemars::schema_for;
use std::path::PathBuf;

pub fn output_schema() -> RootSchema {
    schema_for!(Vec<PokemonRecord>)
}

pub async fn write_output_schema(path: PathBuf) -> AppResult<()> {
    let display = path.display().to_string();
    io::save_json(path, output_schema(), "Output Schema".to_string()).await?;
    log(
        LogLevel::Success,
        &format!("Output schema written to {}", display),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_describes_an_array_of_records() {
        let value = serde_json::to_value(output_schema()).unwrap();
        assert_eq!(value["type"], "array");
        let record = &value["definitions"]["PokemonRecord"];
        let required: Vec<&str> = record["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"idx"));
        assert!(required.contains(&"slug"));
        assert!(!required.contains(&"stats"));
    }
}
