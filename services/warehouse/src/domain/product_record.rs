/// 在庫テーブルの商品レコード
///
/// DynamoDBの1アイテムに対応するフラットなエンティティ。
/// `num`は数値文字列のまま保持し、テーブル上ではN型として格納される。
/// 倉庫名・販売者・重さは詳細回答でのみ参照するため、欠けていても読み込みは失敗させない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// パーティションキー（商品名とは無関係な安定ID）
    pub id: String,
    /// 商品名（一意性は保証されない）
    pub product_name: String,
    /// 在庫数（整数値の文字列表現）
    pub num: String,
    /// 保管倉庫名
    pub warehouse_name: Option<String>,
    /// 販売者
    pub seller: Option<String>,
    /// 重さ（自由形式、数値として解釈しない）
    pub weight: Option<String>,
}

impl ProductRecord {
    /// 在庫数だけを差し替えた新しいレコードを返す
    pub fn with_num(&self, num: &str) -> Self {
        Self {
            num: num.to_string(),
            ..self.clone()
        }
    }

    /// 詳細回答に必要な属性のうち、最初に欠けているものの名前
    pub fn missing_detail_field(&self) -> Option<&'static str> {
        [
            ("warehouse_name", &self.warehouse_name),
            ("seller", &self.seller),
            ("weight", &self.weight),
        ]
        .into_iter()
        .find(|(_, value)| value.is_none())
        .map(|(field, _)| field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn towel() -> ProductRecord {
        ProductRecord {
            id: "2".to_string(),
            product_name: "タオル".to_string(),
            num: "3".to_string(),
            warehouse_name: Some("東京".to_string()),
            seller: Some("山田".to_string()),
            weight: Some("200g".to_string()),
        }
    }

    #[test]
    fn test_with_num_replaces_only_num() {
        let record = towel();
        let updated = record.with_num("10");

        assert_eq!(updated.num, "10");
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.product_name, record.product_name);
        assert_eq!(updated.warehouse_name, record.warehouse_name);
        assert_eq!(updated.seller, record.seller);
        assert_eq!(updated.weight, record.weight);
    }

    #[test]
    fn test_with_num_keeps_original_untouched() {
        let record = towel();
        let _ = record.with_num("99");

        assert_eq!(record.num, "3");
    }

    #[test]
    fn test_missing_detail_field_complete_record() {
        assert_eq!(towel().missing_detail_field(), None);
    }

    #[test]
    fn test_missing_detail_field_reports_first_gap() {
        let record = ProductRecord {
            seller: None,
            weight: None,
            ..towel()
        };

        assert_eq!(record.missing_detail_field(), Some("seller"));
    }
}
