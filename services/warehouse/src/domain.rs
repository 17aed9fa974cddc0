// Domain layer modules
pub mod product_record;
pub mod reply_message;

// Re-exports
pub use product_record::ProductRecord;
pub use reply_message::{NOT_FOUND_MESSAGE, ReplyMessage};
