pub mod api;
pub mod config;
pub mod data_models;
pub mod error;
pub mod extractor;
pub mod parse;
pub mod pipeline;
pub mod platform;
pub mod providers;
pub mod refine;
