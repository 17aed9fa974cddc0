/// 在庫数設定ツール
///
/// レコードIDを指定して在庫テーブルの在庫数を直接書き換える。
/// Lambda関数としても、ローカルスクリプトとしても実行可能。
///
/// # 環境変数
/// - TABLE_NAME: 在庫DynamoDBテーブル名（必須）
///
/// # Lambda実行
/// `{"id": "1", "num": "99"}`をペイロードとしてトリガーする。
///
/// # ローカル実行
/// ```bash
/// export TABLE_NAME=CdkWmsStack-WarehouseTable0B0B99EB-XXXXXXXX
///
/// cargo run --bin set_stock -- --id 1 --num 99
/// ```
use clap::Parser;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{error, info};
use warehouse::application::SetStockHandler;
use warehouse::domain::ProductRecord;
use warehouse::infrastructure::{DynamoDbConfig, DynamoProductRepository, init_logging};

/// コマンドライン引数（ローカル実行用）
#[derive(Parser, Debug)]
#[command(name = "set_stock")]
#[command(about = "レコードIDを指定して在庫数を設定")]
struct CliArgs {
    /// 対象レコードのID
    #[arg(long, short = 'i')]
    id: String,

    /// 設定する在庫数
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    num: String,
}

/// Lambda関数の入力
#[derive(Debug, Deserialize)]
struct SetStockInput {
    id: String,
    /// 文字列・数値どちらの表記も受け付ける
    #[serde(deserialize_with = "string_or_number")]
    num: String,
}

/// JSONの文字列または数値を文字列として読み込む
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "num must be a string or a number, got {}",
            other
        ))),
    }
}

/// Lambda関数の出力
#[derive(Debug, Serialize)]
struct SetStockOutput {
    /// 処理成功フラグ
    success: bool,
    /// 更新後のレコード（成功時のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<ItemOutput>,
    /// エラーメッセージ（エラー時のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

/// 更新後レコードの出力形式
#[derive(Debug, Serialize)]
struct ItemOutput {
    id: String,
    product_name: String,
    num: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<String>,
}

impl From<ProductRecord> for ItemOutput {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            product_name: record.product_name,
            num: record.num,
            warehouse_name: record.warehouse_name,
            seller: record.seller,
            weight: record.weight,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // Lambda環境かどうかを判定
    if std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok() {
        info!("Lambda関数として起動");
        let func = service_fn(handler);
        lambda_runtime::run(func).await?;
    } else {
        info!("ローカルスクリプトとして起動");
        run_local().await?;
    }

    Ok(())
}

/// Lambda関数のメインハンドラー
async fn handler(event: LambdaEvent<SetStockInput>) -> Result<SetStockOutput, Error> {
    let input = event.payload;

    match run_set_stock(&input.id, &input.num).await {
        Ok(record) => Ok(SetStockOutput {
            success: true,
            item: Some(record.into()),
            error_message: None,
        }),
        Err(e) => Ok(SetStockOutput {
            success: false,
            item: None,
            error_message: Some(e.to_string()),
        }),
    }
}

/// ローカル実行用関数
async fn run_local() -> Result<(), Error> {
    let args = CliArgs::parse();

    let record = run_set_stock(&args.id, &args.num).await?;

    // 更新後のレコードをJSONで標準出力へ
    let output = serde_json::to_string_pretty(&ItemOutput::from(record))?;
    println!("{}", output);

    Ok(())
}

/// 在庫数設定を実行
async fn run_set_stock(id: &str, num: &str) -> Result<ProductRecord, Error> {
    let config = DynamoDbConfig::from_env().await.map_err(|e| {
        error!(error = %e, "DynamoDB設定読み込み失敗");
        Error::from(e.to_string())
    })?;

    info!(
        table_name = %config.table_name(),
        id = id,
        num = num,
        "在庫数設定開始"
    );

    let product_repo = DynamoProductRepository::new(
        config.client().clone(),
        config.table_name().to_string(),
    );

    SetStockHandler::new(product_repo)
        .handle(id, num)
        .await
        .map_err(|e| {
            error!(error = %e, id = id, "在庫数設定失敗");
            Error::from(e.to_string())
        })
}
