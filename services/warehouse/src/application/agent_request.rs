/// Bedrock Agentsから届くアクショングループ呼び出しイベント
///
/// 関数定義（function-details）形式のイベントのうち、ハンドラーが参照する項目だけを定義する。
/// 未知のフィールドは無視する。
use serde::{Deserialize, Deserializer};

use super::HandlerError;

/// 呼び出し元エージェントの情報
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentInfo {
    pub name: String,
    pub id: String,
    pub alias: String,
    pub version: String,
}

/// 関数呼び出しのパラメーター
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FunctionParameter {
    /// パラメーター名（例: `product_name`）
    pub name: String,
    /// エージェント側で宣言された型（`string`、`number`など）
    #[serde(default, rename = "type")]
    pub param_type: Option<String>,
    /// 値（型に関わらず文字列で届く）
    pub value: String,
}

/// アクショングループ呼び出しリクエスト
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    #[serde(default)]
    pub message_version: Option<String>,
    #[serde(default)]
    pub agent: Option<AgentInfo>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// ユーザーの発話そのもの
    #[serde(default)]
    pub input_text: Option<String>,
    /// アクショングループ名（応答にそのまま返す）
    pub action_group: String,
    /// 関数名（応答にそのまま返す）
    pub function: String,
    /// `parameters`が欠落またはnullの場合は空として扱う
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Vec<FunctionParameter>,
}

impl AgentRequest {
    /// 名前が一致する最初のパラメーターの値を取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(&str)`
    /// * 見つからなかった場合は`Err(HandlerError::MissingParameter)`
    pub fn parameter(&self, name: &str) -> Result<&str, HandlerError> {
        self.parameters
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.value.as_str())
            .ok_or_else(|| HandlerError::MissingParameter(name.to_string()))
    }

    /// 必須パラメーターがすべて揃っているか確認
    ///
    /// 欠けている場合は、`names`の順で最初に欠けたものを`MissingParameter`で返す。
    pub fn require_parameters(&self, names: &[&str]) -> Result<(), HandlerError> {
        names.iter().try_for_each(|name| self.parameter(name).map(|_| ()))
    }

    /// ログ出力用のセッションID
    pub fn session_id_or_unknown(&self) -> &str {
        self.session_id.as_deref().unwrap_or("unknown")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FunctionParameter>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<FunctionParameter>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
