/// 在庫数更新ハンドラー
///
/// 商品名で検索した先頭レコードの在庫数を、指定値で上書きする。
///
/// # 注意事項
/// 検索と更新は別々のリクエストで、条件付き書き込みも行わない。
/// 同一商品への更新が並行した場合は後から書き込んだ値が残る。
use tracing::{debug, info};

use super::search_handler::PRODUCT_NAME_PARAM;
use super::{AgentRequest, AgentResponse, HandlerError};
use crate::domain::ReplyMessage;
use crate::infrastructure::ProductRepository;

/// 新しい在庫数パラメーターの名前
pub const NUM_PARAM: &str = "num";

/// 在庫数更新の必須パラメーター
pub const UPDATE_REQUIRED_PARAMS: &[&str] = &[PRODUCT_NAME_PARAM, NUM_PARAM];

/// 在庫数を更新するハンドラー
pub struct UpdateHandler<PR>
where
    PR: ProductRepository,
{
    product_repo: PR,
}

impl<PR> UpdateHandler<PR>
where
    PR: ProductRepository,
{
    /// 新しいUpdateHandlerを作成
    pub fn new(product_repo: PR) -> Self {
        Self { product_repo }
    }

    /// 在庫数更新リクエストを処理
    ///
    /// # 処理フロー
    /// 1. `product_name`と`num`パラメーターを取得（どちらか欠ければエラー）
    /// 2. 商品名で在庫テーブルを検索し、0件なら書き込まずに「見つかりませんでした」を返す
    /// 3. 先頭レコードのIDを指定して`num`を上書き（値の検証はしない）
    /// 4. 先頭レコードの商品名と指定値で更新完了を回答
    pub async fn handle(&self, request: &AgentRequest) -> Result<AgentResponse, HandlerError> {
        let product_name = request.parameter(PRODUCT_NAME_PARAM)?;
        let num = request.parameter(NUM_PARAM)?;

        let records = self.product_repo.find_by_name(product_name).await?;

        let Some(record) = records.first() else {
            debug!(product_name = product_name, "更新対象の商品なし");
            return Ok(AgentResponse::reply(request, &ReplyMessage::NotFound));
        };

        let updated = self.product_repo.update_num(&record.id, num).await?;

        info!(
            id = %record.id,
            product_name = %record.product_name,
            previous_num = %record.num,
            num = %updated.num,
            "在庫数更新"
        );

        Ok(AgentResponse::reply(
            request,
            &ReplyMessage::stock_updated(record, num),
        ))
    }
}
