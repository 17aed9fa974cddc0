/// 在庫数検索ハンドラー
///
/// `product_name`に完全一致する最初のレコードの在庫数を回答する。
use tracing::debug;

use super::{AgentRequest, AgentResponse, HandlerError};
use crate::domain::ReplyMessage;
use crate::infrastructure::ProductRepository;

/// 商品名パラメーターの名前
pub const PRODUCT_NAME_PARAM: &str = "product_name";

/// 在庫数検索の必須パラメーター
pub const SEARCH_REQUIRED_PARAMS: &[&str] = &[PRODUCT_NAME_PARAM];

/// 在庫数を回答するハンドラー
pub struct SearchHandler<PR>
where
    PR: ProductRepository,
{
    /// 商品リポジトリ
    product_repo: PR,
}

impl<PR> SearchHandler<PR>
where
    PR: ProductRepository,
{
    /// 新しいSearchHandlerを作成
    pub fn new(product_repo: PR) -> Self {
        Self { product_repo }
    }

    /// 在庫数検索リクエストを処理
    ///
    /// # 処理フロー
    /// 1. `product_name`パラメーターを取得（無ければエラー）
    /// 2. 商品名で在庫テーブルを検索
    /// 3. 0件なら「見つかりませんでした」、それ以外は先頭レコードの在庫数を回答
    pub async fn handle(&self, request: &AgentRequest) -> Result<AgentResponse, HandlerError> {
        let product_name = request.parameter(PRODUCT_NAME_PARAM)?;

        let records = self.product_repo.find_by_name(product_name).await?;

        debug!(
            product_name = product_name,
            matched = records.len(),
            "在庫検索完了"
        );

        let message = match records.first() {
            Some(record) => ReplyMessage::stock_count(record),
            None => ReplyMessage::NotFound,
        };

        Ok(AgentResponse::reply(request, &message))
    }
}
