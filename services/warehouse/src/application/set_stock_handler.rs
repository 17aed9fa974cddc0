/// ID指定の在庫数設定（運用ツール用）
///
/// エージェントを介さずにレコードIDを直接指定して在庫数を書き換える。
/// UpdateItemは存在しないキーに対して新規アイテムを作成してしまうため、
/// 先に存在確認を行う。
use thiserror::Error;
use tracing::info;

use crate::domain::ProductRecord;
use crate::infrastructure::{ProductRepository, RepositoryError};

/// 在庫数設定のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SetStockError {
    /// 指定IDのレコードが存在しない
    #[error("Product not found: id={0}")]
    NotFound(String),

    /// 在庫テーブルの読み書きに失敗
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// レコードIDを指定して在庫数を設定するハンドラー
pub struct SetStockHandler<PR>
where
    PR: ProductRepository,
{
    product_repo: PR,
}

impl<PR> SetStockHandler<PR>
where
    PR: ProductRepository,
{
    pub fn new(product_repo: PR) -> Self {
        Self { product_repo }
    }

    /// 在庫数を設定し、更新後のレコード（ALL_NEW）を返す
    pub async fn handle(&self, id: &str, num: &str) -> Result<ProductRecord, SetStockError> {
        let current = self
            .product_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| SetStockError::NotFound(id.to_string()))?;

        let updated = self.product_repo.update_num(id, num).await?;

        info!(
            id = id,
            product_name = %updated.product_name,
            previous_num = %current.num,
            num = %updated.num,
            "在庫数設定完了"
        );

        Ok(updated)
    }
}
