use crate::common::*;

#[doc = "Completion endpoint settings; the API credential itself comes from the environment"]
#[derive(Debug, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct CaptionConfig {
    pub endpoint_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_sec: u64,
}
