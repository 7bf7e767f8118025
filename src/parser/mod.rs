//! Dataset parser (verb module)
//!
//! Transforms YAML files into a [`Dataset`].

use std::path::Path;
use crate::dataset::{Dataset, DatasetTables};
use crate::error::ParseError;

/// Parse a dataset from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Dataset, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str(&contents)
}

/// Parse a dataset from a YAML string
pub fn parse_str(yaml: &str) -> Result<Dataset, ParseError> {
    let tables: DatasetTables = serde_yaml::from_str(yaml)?;
    Dataset::from_tables(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture() {
        let dataset = parse_file("tests/test_data/blog.yaml").unwrap();

        assert_eq!(dataset.countries().len(), 3);
        assert_eq!(dataset.users().len(), 5);
        assert_eq!(dataset.blogs().len(), 5);
        assert_eq!(dataset.view_rows().len(), 14);

        let blog = dataset.blog(1).unwrap();
        assert_eq!(blog.title, "Rust Ownership Explained");
        let author = dataset.user(blog.author).unwrap();
        assert_eq!(author.username, "alice");
        assert_eq!(dataset.country(author.country.unwrap()).unwrap().code, "US");
    }

    #[test]
    fn test_parse_empty_document_sections() {
        let dataset = parse_str("countries: []").unwrap();
        assert!(dataset.view_rows().is_empty());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_str("not: [valid: yaml");
        assert!(matches!(result, Err(ParseError::Yaml { .. })));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file("tests/test_data/does_not_exist.yaml");
        assert!(matches!(result, Err(ParseError::Io { ref path, .. }) if path.ends_with("does_not_exist.yaml")));
    }
}
