pub mod chart_type;
pub mod upload_format;
