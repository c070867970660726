//! # Brain Module
//!
//! Deterministic, non-LLM text handling for MailSort.
//! Everything here runs before or after the remote model call, never during it.
//!
//! ## Components
//! - `normalizer`: signature stripping, cleaning, tokenizing, stemming
//! - `stemmer`: Portuguese suffix-stripping stemmer (RSLP)
//! - `keywords`: stop words, indicator lists and the simulation classifier
//! - `prompts`: prompt templates and canned replies
//! - `parser`: JSON verdict extraction and validation

pub mod keywords;
pub mod normalizer;
pub mod parser;
pub mod prompts;
pub mod stemmer;

pub use keywords::{KeywordClassifier, KeywordScore};
pub use normalizer::TextNormalizer;
pub use parser::{extract_json, parse_verdict};
pub use stemmer::RslpStemmer;
