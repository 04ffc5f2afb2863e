// Filter pipeline: completion text -> filter record -> catalog search URLs.
// Normalizer, parser and URL builder are pure; only the extractor performs I/O.

pub mod extractor;
pub mod normalizer;
pub mod parser;
pub mod prompts;
pub mod record;
pub mod search_url;
pub mod vocabulary;

pub use record::{FilterField, FilterRecord};
pub use vocabulary::CatalogVocabulary;
