pub mod caption_service_impl;
pub mod chart_service_impl;
pub mod export_service_impl;
pub mod loader_service_impl;
pub mod summary_service_impl;
