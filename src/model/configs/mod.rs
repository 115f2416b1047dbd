pub mod caption_config;
pub mod export_config;
pub mod system_config;
pub mod total_config;
