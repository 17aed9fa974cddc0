/// Bedrock Agentsへ返す応答エンベロープ
///
/// アクショングループ名と関数名はリクエストからそのまま折り返し、本文だけをハンドラーが決める。
/// 失敗を表すフィールドは持たない。失敗時は応答そのものを返さない。
use serde::Serialize;

use super::AgentRequest;
use crate::domain::ReplyMessage;

/// 成功時のステータスコード（常に200）
const STATUS_OK: u16 = 200;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub status_code: u16,
    pub response: ActionResponse,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub function: String,
    pub function_response: FunctionResponse,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub response_body: ResponseBody,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseBody {
    #[serde(rename = "TEXT")]
    pub text: TextBody,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextBody {
    pub body: String,
}

impl AgentResponse {
    /// テキスト本文の応答を作成
    pub fn text(action_group: &str, function: &str, body: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_OK,
            response: ActionResponse {
                action_group: action_group.to_string(),
                function: function.to_string(),
                function_response: FunctionResponse {
                    response_body: ResponseBody {
                        text: TextBody { body: body.into() },
                    },
                },
            },
        }
    }

    /// リクエストの識別子を折り返し、応答文を本文に設定する
    pub fn reply(request: &AgentRequest, message: &ReplyMessage) -> Self {
        Self::text(&request.action_group, &request.function, message.to_body())
    }

    /// 応答本文を取得
    pub fn body(&self) -> &str {
        &self.response.function_response.response_body.text.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_envelope() {
        let response = AgentResponse::text("search-warehouse", "product_name", "本文");

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "response": {
                    "actionGroup": "search-warehouse",
                    "function": "product_name",
                    "functionResponse": {
                        "responseBody": {
                            "TEXT": { "body": "本文" }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_reply_echoes_request_identifiers() {
        let request: AgentRequest = serde_json::from_value(json!({
            "actionGroup": "info-warehouse",
            "function": "get_detail",
            "parameters": []
        }))
        .unwrap();

        let response = AgentResponse::reply(&request, &ReplyMessage::NotFound);

        assert_eq!(response.status_code, 200);
        assert_eq!(response.response.action_group, "info-warehouse");
        assert_eq!(response.response.function, "get_detail");
        assert_eq!(response.body(), "商品が見つかりませんでした。");
    }
}
