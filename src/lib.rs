pub mod error;
pub mod tree;
pub mod sentence;
pub mod rmh_file;

// Re-export main types for convenient access
pub use error::RmhError;
pub use rmh_file::{derived_file_names, RmhFile, TEI_NS};
pub use sentence::{compose_index, Sentence, Token, ABSENT};
pub use tree::{Element, XmlTree};
