pub mod config;
pub mod records; // CSV source/sink + paragraph export
pub mod pipeline; // anonymize → pre-filter → AI validate
