use crate::listing::{FileList, ListOptions};
use crate::output::ListResult;
use anyhow::Result;
use std::path::Path;

/// List operation - returns structured data
pub fn list_operation(directory: &Path, options: &ListOptions) -> Result<ListResult> {
    let list = FileList::load(directory, options)?;
    let total_size = list.total_size();
    Ok(ListResult {
        directory: list.directory,
        files: list.records,
        total_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_operation() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "bb").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let result = list_operation(temp_dir.path(), &ListOptions::default()).unwrap();
        let names: Vec<_> = result.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(result.total_size, 3);
    }

    #[test]
    fn test_list_operation_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = list_operation(&missing, &ListOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::NotADirectory(_))
        ));
    }
}
