pub mod cache_slot;
pub mod generator;
pub mod openai_backend;
pub mod payload_decoder;
pub mod prefetch_service;
pub mod question_service;
pub mod shuffler;
