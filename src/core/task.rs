//! Image task definition.

use crate::core::{OperationSpec, UploadedFile};

/// One file of a batch together with the operation to apply to it.
///
/// `index` is the file's position in the upload so results can be put back
/// in input order whatever order the workers finish in.
#[derive(Debug, Clone)]
pub struct ImageTask {
    pub index: usize,
    pub file: UploadedFile,
    pub operation: OperationSpec,
}

impl ImageTask {
    /// Splits a batch into indexed tasks sharing one operation.
    pub fn for_batch(files: Vec<UploadedFile>, operation: &OperationSpec) -> Vec<Self> {
        files
            .into_iter()
            .enumerate()
            .map(|(index, file)| Self {
                index,
                file,
                operation: operation.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_are_indexed_in_upload_order() {
        let op = OperationSpec::compress(50).unwrap();
        let tasks = ImageTask::for_batch(
            vec![UploadedFile::new("a.png", vec![1]), UploadedFile::new("b.png", vec![2])],
            &op,
        );
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].index, 0);
        assert_eq!(tasks[1].file.name, "b.png");
        assert_eq!(tasks[1].operation, op);
    }
}
