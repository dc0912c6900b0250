pub mod guwen_service;
pub mod prompts;

pub use guwen_service::GuwenService;
