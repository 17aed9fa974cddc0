/// 商品詳細ハンドラー
///
/// 在庫数に加えて保管倉庫・販売者・重さを回答する。
use tracing::debug;

use super::search_handler::PRODUCT_NAME_PARAM;
use super::{AgentRequest, AgentResponse, HandlerError};
use crate::domain::ReplyMessage;
use crate::infrastructure::{ProductRepository, RepositoryError};

/// 詳細検索の必須パラメーター
pub const INFO_REQUIRED_PARAMS: &[&str] = &[PRODUCT_NAME_PARAM];

/// 商品の詳細情報を回答するハンドラー
pub struct InfoHandler<PR>
where
    PR: ProductRepository,
{
    product_repo: PR,
}

impl<PR> InfoHandler<PR>
where
    PR: ProductRepository,
{
    /// 新しいInfoHandlerを作成
    pub fn new(product_repo: PR) -> Self {
        Self { product_repo }
    }

    /// 詳細検索リクエストを処理
    ///
    /// 入力と0件時の挙動は在庫数検索と同じ。
    /// 先頭レコードに倉庫名・販売者・重さのいずれかが無い場合は、
    /// 欠けた文面を返さずに変換エラーとして扱う。
    pub async fn handle(&self, request: &AgentRequest) -> Result<AgentResponse, HandlerError> {
        let product_name = request.parameter(PRODUCT_NAME_PARAM)?;

        let records = self.product_repo.find_by_name(product_name).await?;

        debug!(
            product_name = product_name,
            matched = records.len(),
            "詳細検索完了"
        );

        let message = match records.first() {
            Some(record) => ReplyMessage::product_detail(record).map_err(|field| {
                RepositoryError::SerializationError(format!("Missing {} field", field))
            })?,
            None => ReplyMessage::NotFound,
        };

        Ok(AgentResponse::reply(request, &message))
    }
}
