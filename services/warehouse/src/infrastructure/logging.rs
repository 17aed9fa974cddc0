/// ログ基盤モジュール
///
/// Lambda環境（CloudWatch Logs）向けの構造化ログ設定を提供する。
/// イベントのフィールドはトップレベルに展開し、`product_name`や`session_id`で
/// CloudWatch Logs Insightsから直接絞り込めるようにする。
use std::sync::Once;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::{Format, Json, JsonFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// `RUST_LOG`が未設定または不正な場合のログレベル
const DEFAULT_LEVEL: &str = "info";

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// JSON形式での構造化ログ出力を設定し、環境変数`RUST_LOG`または
/// デフォルトのログレベル（info）でフィルタリングを行う。
/// 複数回呼び出しても初期化は最初の1回だけ行われる。
///
/// # 使用例
/// ```ignore
/// use warehouse::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!("Lambda function started");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer(std::io::stdout))
            .init();
    });
}

/// CloudWatch向けのJSONログレイヤーを作成
///
/// 1イベント1行。`with_current_span(false)`のためスパンのフィールドは出力しない。
fn json_layer<S, W>(make_writer: W) -> tracing_subscriber::fmt::Layer<S, JsonFields, Format<Json>, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(make_writer)
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
///
/// ハンドラーのテストから呼び出し、失敗時に処理中のログを確認できるようにする。
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::{debug, error, info};

    /// 出力をメモリに溜めるライター
    #[derive(Clone, Default)]
    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl BufferWriter {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    /// `level`で絞り込んだJSONサブスクライバーのもとで`f`を実行し、出力行を返す
    fn capture(level: &str, f: impl FnOnce()) -> Vec<serde_json::Value> {
        let buffer = BufferWriter::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(level))
            .with(json_layer(move || writer.clone()));

        tracing::subscriber::with_default(subscriber, f);

        buffer.lines()
    }

    #[test]
    fn test_init_test_logging_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_json_layer_flattens_event_fields() {
        let lines = capture(DEFAULT_LEVEL, || {
            info!(product_name = "タオル", matched = 1, "在庫検索完了");
        });

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["message"], "在庫検索完了");
        assert_eq!(line["product_name"], "タオル");
        assert_eq!(line["matched"], 1);
        assert!(line.get("fields").is_none());
        assert!(
            line["target"]
                .as_str()
                .unwrap()
                .starts_with("warehouse::infrastructure::logging")
        );
    }

    #[test]
    fn test_json_layer_omits_span_fields() {
        let lines = capture(DEFAULT_LEVEL, || {
            let span = tracing::info_span!("invocation", session_id = "session-123");
            let _guard = span.enter();
            error!(error = "Read error: timeout", "在庫テーブル操作失敗");
        });

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], "ERROR");
        assert_eq!(lines[0]["error"], "Read error: timeout");
        assert!(lines[0].get("span").is_none());
        assert!(lines[0].get("session_id").is_none());
    }

    #[test]
    fn test_default_level_drops_debug() {
        let lines = capture(DEFAULT_LEVEL, || {
            debug!(matched = 0, "詳細検索完了");
            info!(num = "10", "在庫数更新");
        });

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["message"], "在庫数更新");
    }
}
