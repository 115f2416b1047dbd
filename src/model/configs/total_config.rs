use crate::common::*;

use crate::model::configs::{caption_config::*, export_config::*, system_config::*};

use crate::utils_modules::io_utils::*;

use crate::env_configuration::env_config::*;

static TOTAL_CONFIG: once_lazy<TotalConfig> = once_lazy::new(initialize_agent_config);

#[doc = "Function to initialize agent configuration information instances"]
pub fn initialize_agent_config() -> TotalConfig {
    info!("initialize_agent_config() START!");
    TotalConfig::new()
}

#[derive(Debug, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct TotalConfig {
    pub system: SystemConfig,
    pub caption: CaptionConfig,
    pub export: ExportConfig,
}

#[doc = "System settings: preview size and chart canvas dimensions"]
pub fn get_system_config_info() -> &'static SystemConfig {
    &TOTAL_CONFIG.system
}

#[doc = "Completion endpoint settings for the caption variant"]
pub fn get_caption_config_info() -> &'static CaptionConfig {
    &TOTAL_CONFIG.caption
}

#[doc = "Workbook export settings"]
pub fn get_export_config_info() -> &'static ExportConfig {
    &TOTAL_CONFIG.export
}

impl TotalConfig {
    fn new() -> Self {
        match read_toml_from_file::<TotalConfig>(&AGENT_CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                let err_msg = "Failed to convert the data from AGENT_CONFIG_PATH into the TotalConfig structure.";
                error!("[TotalConfig->new] {} {:?}", err_msg, e);
                std::process::exit(1);
            }
        }
    }
}
