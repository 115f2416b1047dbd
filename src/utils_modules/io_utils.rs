use crate::common::*;

#[doc = r#"
    Reads a TOML file and deserializes it into the requested structure.

    All agent configuration (system, caption, export sections) is kept in a
    single TOML file whose path comes from the environment; this is the one
    place that file is parsed.

    # Arguments
    * `file_path` - path of the TOML file to read

    # Returns
    * `Result<T, anyhow::Error>` - the parsed structure on success
"#]
pub fn read_toml_from_file<T: DeserializeOwned>(file_path: &str) -> Result<T, anyhow::Error> {
    let toml_content = std::fs::read_to_string(file_path)?;
    let toml: T = toml::from_str(&toml_content)?;

    Ok(toml)
}
