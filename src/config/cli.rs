use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// 把模型檔名接在模型目錄後面
pub fn artifact_path(model_dir: &str, file: &str) -> String {
    Path::new(model_dir).join(file).to_string_lossy().into_owned()
}

/// 從本機目錄讀取模型檔
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = artifact_path(&self.base_path, path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    fn describe(&self, path: &str) -> String {
        artifact_path(&self.base_path, path)
    }
}
