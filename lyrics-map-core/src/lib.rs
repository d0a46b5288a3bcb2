pub mod config;
pub mod dataset;
pub mod embedding;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod projection;
pub mod sampling;
pub mod sanitize;
