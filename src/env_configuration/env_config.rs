use crate::common::*;

#[doc = r#"
    Reads an environment variable and treats its absence as a fatal startup
    error: every value resolved here is required for the agent to run at all.

    # Arguments
    * `key` - environment variable name

    # Panics
    When the variable is not set.
"#]
fn get_env_or_panic(key: &str) -> String {
    match env::var(key) {
        Ok(val) => val,
        Err(_) => {
            let msg = format!("[ENV file read Error] '{}' must be set", key);
            error!("{}", msg);
            panic!("{}", msg);
        }
    }
}

#[doc = r#"
    Path of the agent configuration file (TOML), resolved once on first use.

    The file carries the `system`, `caption`, and `export` sections consumed
    by `TotalConfig`.
"#]
pub static AGENT_CONFIG_PATH: once_lazy<String> =
    once_lazy::new(|| get_env_or_panic("AGENT_CONFIG_PATH"));
