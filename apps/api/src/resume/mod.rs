// Resume ingestion and ATS scoring.
// Extraction is the only fallible step; every analyzer is a pure function of the text.

pub mod ats;
pub mod extract;
pub mod formatting;
pub mod handlers;
pub mod ingest;
pub mod keyword_match;
pub mod keywords;
pub mod length;
pub mod personal_info;
pub mod scoring;
pub mod store;

pub use keywords::KeywordSet;
