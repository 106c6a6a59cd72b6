mod analytics;
mod common;
