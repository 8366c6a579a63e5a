pub mod arxiv_search;
pub mod canned;
pub mod draft_writer;
pub mod llm_service;
pub mod provider;

pub use arxiv_search::ArxivSearch;
pub use canned::{CannedGenerator, CannedPapers};
pub use draft_writer::DraftWriter;
pub use llm_service::{extract_text, LlmService};
pub use provider::{PaperSource, TextGenerator};
