/// DynamoDB接続設定
///
/// 在庫テーブル名はデプロイ時に環境変数`TABLE_NAME`で注入される。
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// 在庫テーブル名を格納する環境変数名
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// DynamoDB設定のエラー型
#[derive(Debug, Error)]
pub enum DynamoDbConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// テーブル名とクライアントを持つDynamoDB設定
///
/// Lambdaのウォームスタート間で使い回せるよう、クライアントごと保持する。
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// 在庫テーブル名
    table_name: String,
}

impl DynamoDbConfig {
    /// 環境からAWS設定を読み込み、環境変数からテーブル名を読み取って新しいDynamoDbConfigを作成
    ///
    /// 環境変数:
    /// - AWS認証情報: aws-configにより自動読み込み
    /// - TABLE_NAME: 在庫用DynamoDBテーブル名
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        // テーブル名が無ければAWS設定の読み込み自体を行わない
        let table_name = table_name_from_env(TABLE_NAME_ENV)?;

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        Ok(Self { client, table_name })
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// 在庫テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// 指定した環境変数からテーブル名を読み込む
///
/// 空文字列は未設定として扱う。
fn table_name_from_env(var: &str) -> Result<String, DynamoDbConfigError> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DynamoDbConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 安全性: #[serial]で直列化されたテストからのみ呼び出す
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    // 他のテストとの競合を避けるためユニークな環境変数名を使用
    const TEST_VAR: &str = "TEST_CONFIG_WAREHOUSE_TABLE";

    #[test]
    fn test_missing_env_var_error_display() {
        let error = DynamoDbConfigError::MissingEnvVar("TABLE_NAME".to_string());
        assert_eq!(error.to_string(), "Missing environment variable: TABLE_NAME");
    }

    #[tokio::test]
    async fn test_dynamodb_config_new() {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        let config = DynamoDbConfig::new(client, "test-warehouse".to_string());

        assert_eq!(config.table_name(), "test-warehouse");
        let _client_ref = config.client();
    }

    #[test]
    #[serial]
    fn test_table_name_from_env_missing() {
        unsafe { remove_env(TEST_VAR) };

        let result = table_name_from_env(TEST_VAR);

        match result {
            Err(DynamoDbConfigError::MissingEnvVar(var)) => assert_eq!(var, "TABLE_NAME"),
            Ok(name) => panic!("Expected MissingEnvVar, got {}", name),
        }
    }

    #[test]
    #[serial]
    fn test_table_name_from_env_empty() {
        unsafe { set_env(TEST_VAR, "") };

        let result = table_name_from_env(TEST_VAR);
        assert!(matches!(result, Err(DynamoDbConfigError::MissingEnvVar(_))));

        unsafe { remove_env(TEST_VAR) };
    }

    #[test]
    #[serial]
    fn test_table_name_from_env_present() {
        unsafe { set_env(TEST_VAR, "CdkWmsStack-WarehouseTable") };

        let result = table_name_from_env(TEST_VAR);
        assert_eq!(result.unwrap(), "CdkWmsStack-WarehouseTable");

        unsafe { remove_env(TEST_VAR) };
    }
}
