use thiserror::Error;

#[doc = r#"
    Closed error taxonomy for the plotting pipeline.

    Services return `anyhow::Error`; whenever a failure belongs to one of the
    conditions below it wraps an `AgentError` so the controller can downcast
    and apply the matching propagation policy:

    - `Parse` / `Export` abort the whole action
    - `ColumnSelection` / `TypeMismatch` abort only the chart-generation step
    - `CaptionUnavailable` is logged and replaced by a placeholder message
"#]
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to parse '{file_name}': {reason}")]
    Parse { file_name: String, reason: String },

    #[error("column '{0}' does not exist in the loaded table")]
    ColumnSelection(String),

    #[error("{chart} requires a numeric column but '{column}' is not numeric")]
    TypeMismatch { chart: String, column: String },

    #[error("failed to encode workbook: {0}")]
    Export(String),

    #[error("caption service unavailable: {0}")]
    CaptionUnavailable(String),
}
