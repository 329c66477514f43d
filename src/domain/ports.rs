use crate::domain::model::{Condition, FeatureVector, Label};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// 錯誤訊息用的完整路徑
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn model_dir(&self) -> &str;
    fn artifact_file(&self, condition: Condition) -> &str;
}

/// 已載入、唯讀的二元分類器
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// 呼叫前向量長度已由 Registry 檢查過
    fn classify(&self, vector: &FeatureVector) -> Label;
}
