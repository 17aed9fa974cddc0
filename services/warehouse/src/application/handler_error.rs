/// ハンドラー共通のエラー型と、Lambda戻り値への変換
use std::future::Future;

use lambda_runtime::Error as LambdaError;
use thiserror::Error;
use tracing::error;

use super::{AgentRequest, AgentResponse};
use crate::infrastructure::RepositoryError;

/// ハンドラーのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HandlerError {
    /// 必須パラメーターがリクエストに含まれていない
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// 在庫テーブルの読み書きに失敗
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// テーブル名などの実行環境設定が読み込めない
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// 必須パラメーターを確認してから`run`を実行する
///
/// パラメーター欠落は設定やテーブルの状態より先に判定し、
/// 欠落していれば`run`は呼ばない。
pub async fn with_required_parameters<F, Fut>(
    request: &AgentRequest,
    required: &[&str],
    run: F,
) -> Result<AgentResponse, HandlerError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<AgentResponse, HandlerError>>,
{
    request.require_parameters(required)?;
    run().await
}

/// ハンドラーの結果をLambda関数の戻り値に変換する
///
/// - 成功: 応答エンベロープを返す
/// - 必須パラメーター欠落: 呼び出し自体を失敗させる（構造化応答は返さない）
/// - リポジトリエラー・設定エラー: ログ出力のみ行い、応答なし（`null`）で終了する
///
/// フロントエンドのエージェントは応答なしを失敗として扱う。
pub fn into_invocation_result(
    request: &AgentRequest,
    result: Result<AgentResponse, HandlerError>,
) -> Result<Option<AgentResponse>, LambdaError> {
    match result {
        Ok(response) => Ok(Some(response)),
        Err(HandlerError::Repository(err)) => {
            error!(
                action_group = %request.action_group,
                function = %request.function,
                session_id = request.session_id_or_unknown(),
                error = %err,
                "在庫テーブル操作失敗（応答なしで終了）"
            );
            Ok(None)
        }
        Err(err @ HandlerError::Configuration(_)) => {
            error!(
                action_group = %request.action_group,
                function = %request.function,
                session_id = request.session_id_or_unknown(),
                error = %err,
                "DynamoDB設定読み込み失敗（応答なしで終了）"
            );
            Ok(None)
        }
        Err(err @ HandlerError::MissingParameter(_)) => {
            error!(
                action_group = %request.action_group,
                function = %request.function,
                error = %err,
                "必須パラメーター欠落"
            );
            Err(err.into())
        }
    }
}
