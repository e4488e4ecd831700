pub mod vault;

pub use vault::{enumerate_vault, publish_output, read_document, validate_file_size};
