/// DynamoDBの在庫テーブルを操作する商品リポジトリ
///
/// 提供する操作は商品名による完全一致検索、IDによる取得、在庫数の上書きのみ。
/// 検索と更新の間に排他制御は無く、同一商品への同時更新は後勝ちになる。
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use thiserror::Error;
use tracing::warn;

use crate::domain::ProductRecord;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// アイテムからレコードへの変換に失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 商品レコード管理用トレイト
///
/// ハンドラーはこのトレイト越しに在庫テーブルへアクセスする
/// （実際のDynamoDB、テスト用モック）。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 商品名が完全一致するレコードをすべて取得
    ///
    /// 大文字小文字を区別し、部分一致は行わない。
    /// 戻り値の順序はテーブルのスキャン順で、呼び出しごとに保証されない。
    async fn find_by_name(&self, product_name: &str) -> Result<Vec<ProductRecord>, RepositoryError>;

    /// IDでレコードを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(ProductRecord))`
    /// * 見つからなかった場合は`Ok(None)`
    async fn get_by_id(&self, id: &str) -> Result<Option<ProductRecord>, RepositoryError>;

    /// IDで指定したレコードの在庫数を上書きし、更新後のレコードを返す
    ///
    /// 値の検証は行わない。条件付き書き込みも行わないため、
    /// 並行する更新とは後勝ちになる。
    async fn update_num(&self, id: &str, num: &str) -> Result<ProductRecord, RepositoryError>;
}

/// ProductRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoProductRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// 在庫テーブル名
    table_name: String,
}

impl DynamoProductRepository {
    /// 新しいDynamoProductRepositoryを作成
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBアイテムを商品レコードに変換
    ///
    /// `id`・`product_name`・`num`は必須。`num`はN型を正とし、S型で入っていても受け付ける。
    /// 倉庫名・販売者・重さは欠けていれば`None`とし、必須かどうかは呼び出し側で判断する。
    fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<ProductRecord, RepositoryError> {
        let id = Self::required_string(item, "id")?;
        let product_name = Self::required_string(item, "product_name")?;

        let num = item
            .get("num")
            .and_then(|v| v.as_n().or_else(|_| v.as_s()).ok())
            .cloned()
            .ok_or_else(|| RepositoryError::SerializationError("Missing num field".to_string()))?;

        Ok(ProductRecord {
            id,
            product_name,
            num,
            warehouse_name: Self::optional_string(item, "warehouse_name"),
            seller: Self::optional_string(item, "seller"),
            weight: Self::optional_string(item, "weight"),
        })
    }

    fn required_string(
        item: &HashMap<String, AttributeValue>,
        field: &str,
    ) -> Result<String, RepositoryError> {
        item.get(field)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| RepositoryError::SerializationError(format!("Missing {} field", field)))
    }

    fn optional_string(item: &HashMap<String, AttributeValue>, field: &str) -> Option<String> {
        item.get(field).and_then(|v| v.as_s().ok()).cloned()
    }

    /// スキャン結果のアイテムを変換して`records`に追加
    ///
    /// ハンドラーが採用するのは先頭の一致だけなので、変換失敗をエラーにするのは
    /// 先頭になるアイテムに限る。2件目以降の壊れたアイテムは警告を出して読み飛ばす。
    fn collect_matches(
        items: &[HashMap<String, AttributeValue>],
        records: &mut Vec<ProductRecord>,
    ) -> Result<(), RepositoryError> {
        for item in items {
            match Self::item_to_record(item) {
                Ok(record) => records.push(record),
                Err(e) if records.is_empty() => return Err(e),
                Err(e) => {
                    warn!(
                        error = %e,
                        first_id = %records[0].id,
                        "先頭以外の一致アイテムを変換できないためスキップ"
                    );
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for DynamoProductRepository {
    async fn find_by_name(&self, product_name: &str) -> Result<Vec<ProductRecord>, RepositoryError> {
        let mut records = Vec::new();
        let mut last_evaluated_key = None;

        // FilterExpressionはページ単位で適用されるため、LastEvaluatedKeyが尽きるまで読む
        loop {
            let mut scan_builder = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("#pn = :product_name")
                .expression_attribute_names("#pn", "product_name")
                .expression_attribute_values(
                    ":product_name",
                    AttributeValue::S(product_name.to_string()),
                );

            if let Some(key) = last_evaluated_key.take() {
                scan_builder = scan_builder.set_exclusive_start_key(Some(key));
            }

            let result = scan_builder
                .send()
                .await
                .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

            if let Some(items) = result.items {
                Self::collect_matches(&items, &mut records)?;
            }

            match result.last_evaluated_key {
                Some(key) => last_evaluated_key = Some(key),
                None => break,
            }
        }

        Ok(records)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<ProductRecord>, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        match result.item {
            Some(item) => Ok(Some(Self::item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn update_num(&self, id: &str, num: &str) -> Result<ProductRecord, RepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .update_expression("SET #num = :product_num")
            .expression_attribute_names("#num", "num")
            .expression_attribute_values(":product_num", AttributeValue::N(num.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::SerializationError("Missing attributes in update response".to_string())
        })?;

        Self::item_to_record(&attributes)
    }
}
