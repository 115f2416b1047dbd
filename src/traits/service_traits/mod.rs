pub mod caption_service;
pub mod chart_service;
pub mod export_service;
pub mod loader_service;
pub mod summary_service;
