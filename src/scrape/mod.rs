// src/scrape/mod.rs
//! Payload acquisition. Each strategy only produces parsed JSON documents;
//! what to do with them is the runner's business.
pub mod api;
pub mod captured;
pub mod payload;

pub use api::{fetch_pages, PageRun};
pub use captured::{expand_paths, load_all, PayloadFile};
pub use payload::Payload;
