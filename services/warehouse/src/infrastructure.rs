// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod product_repository;

// Re-exports
pub use config::{DynamoDbConfig, DynamoDbConfigError, TABLE_NAME_ENV};
pub use logging::init_logging;
pub use product_repository::{DynamoProductRepository, ProductRepository, RepositoryError};
