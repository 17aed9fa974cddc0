// アプリケーション層モジュール
pub mod agent_request;
pub mod agent_response;
pub mod handler_error;
pub mod info_handler;
pub mod search_handler;
pub mod set_stock_handler;
pub mod update_handler;

// 再エクスポート
pub use agent_request::{AgentInfo, AgentRequest, FunctionParameter};
pub use agent_response::AgentResponse;
pub use handler_error::{HandlerError, into_invocation_result, with_required_parameters};
pub use info_handler::{INFO_REQUIRED_PARAMS, InfoHandler};
pub use search_handler::{SEARCH_REQUIRED_PARAMS, SearchHandler};
pub use set_stock_handler::{SetStockError, SetStockHandler};
pub use update_handler::{UPDATE_REQUIRED_PARAMS, UpdateHandler};
