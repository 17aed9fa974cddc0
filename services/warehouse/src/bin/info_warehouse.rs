/// 商品詳細アクショングループのLambda関数
///
/// Bedrock Agentsから商品名を受け取り、在庫数・保管倉庫・販売者・重さを回答する。
///
/// # 環境変数
/// - TABLE_NAME: 在庫DynamoDBテーブル名（必須）
use lambda_runtime::{Error, LambdaEvent, service_fn};
use tokio::sync::OnceCell;
use tracing::info;
use warehouse::application::{
    AgentRequest, AgentResponse, HandlerError, INFO_REQUIRED_PARAMS, InfoHandler, into_invocation_result,
    with_required_parameters,
};
use warehouse::infrastructure::{
    DynamoDbConfig, DynamoDbConfigError, DynamoProductRepository, init_logging,
};

/// DynamoDB設定の静的インスタンス
///
/// Lambda warm start時にクライアントを再利用するため、初回呼び出しで初期化して保持する。
static DYNAMODB_CONFIG: OnceCell<DynamoDbConfig> = OnceCell::const_new();

async fn get_config() -> Result<&'static DynamoDbConfig, DynamoDbConfigError> {
    DYNAMODB_CONFIG.get_or_try_init(DynamoDbConfig::from_env).await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// 必須パラメーターの欠落は設定より先に判定し、呼び出しを失敗させる。
/// 設定読み込みやDynamoDB操作の失敗時はログ出力のみ行い、応答なしで終了する。
async fn handler(event: LambdaEvent<AgentRequest>) -> Result<Option<AgentResponse>, Error> {
    let request = &event.payload;

    info!(
        action_group = %request.action_group,
        function = %request.function,
        session_id = request.session_id_or_unknown(),
        "商品詳細リクエスト受信"
    );

    let result = with_required_parameters(request, INFO_REQUIRED_PARAMS, move || async move {
        let config = get_config()
            .await
            .map_err(|e| HandlerError::Configuration(e.to_string()))?;

        let product_repo = DynamoProductRepository::new(
            config.client().clone(),
            config.table_name().to_string(),
        );

        InfoHandler::new(product_repo).handle(request).await
    })
    .await;

    into_invocation_result(request, result)
}
