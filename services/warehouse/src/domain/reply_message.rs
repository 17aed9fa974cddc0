/// エージェントへ返す応答文
///
/// 各ハンドラーが返す日本語の定型文を組み立てる。
/// 文面はフロントエンド側のエージェントがそのままユーザーに提示するため、
/// 句読点を含めて固定のフォーマットを守ること。
use super::ProductRecord;

/// 該当商品が存在しない場合の応答文
pub const NOT_FOUND_MESSAGE: &str = "商品が見つかりませんでした。";

/// 応答文の種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMessage {
    /// 商品が見つからなかった
    NotFound,
    /// 在庫数の回答
    StockCount { product_name: String, num: String },
    /// 在庫数・倉庫・販売者・重さの回答
    ProductDetail {
        product_name: String,
        num: String,
        warehouse_name: String,
        seller: String,
        weight: String,
    },
    /// 在庫数の更新完了
    StockUpdated { product_name: String, num: String },
}

impl ReplyMessage {
    /// 在庫数の回答を作成
    pub fn stock_count(record: &ProductRecord) -> Self {
        ReplyMessage::StockCount {
            product_name: record.product_name.clone(),
            num: record.num.clone(),
        }
    }

    /// 詳細情報の回答を作成
    ///
    /// 倉庫名・販売者・重さのいずれかが欠けている場合は文面を作らず、
    /// 欠けている属性名を`Err`で返す。
    pub fn product_detail(record: &ProductRecord) -> Result<Self, &'static str> {
        match (&record.warehouse_name, &record.seller, &record.weight) {
            (Some(warehouse_name), Some(seller), Some(weight)) => Ok(ReplyMessage::ProductDetail {
                product_name: record.product_name.clone(),
                num: record.num.clone(),
                warehouse_name: warehouse_name.clone(),
                seller: seller.clone(),
                weight: weight.clone(),
            }),
            _ => Err(record.missing_detail_field().unwrap_or("detail")),
        }
    }

    /// 更新完了の回答を作成
    ///
    /// `num`はリクエストで受け取った値をそのまま使う。
    pub fn stock_updated(record: &ProductRecord, num: &str) -> Self {
        ReplyMessage::StockUpdated {
            product_name: record.product_name.clone(),
            num: num.to_string(),
        }
    }

    /// 応答本文の文字列に変換
    pub fn to_body(&self) -> String {
        match self {
            ReplyMessage::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ReplyMessage::StockCount { product_name, num } => {
                format!("{}の在庫数は{}です。", product_name, num)
            }
            ReplyMessage::ProductDetail {
                product_name,
                num,
                warehouse_name,
                seller,
                weight,
            } => format!(
                "{}は現在{}個あります。{}の倉庫にあります。販売者は{}です。重さは{}です。",
                product_name, num, warehouse_name, seller, weight
            ),
            ReplyMessage::StockUpdated { product_name, num } => {
                format!("倉庫内の{}を{}個に更新しました。", product_name, num)
            }
        }
    }
}
