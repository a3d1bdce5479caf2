pub mod models;
pub mod repositories;
pub mod services;

pub use repositories::memory_repository::InMemoryStore;
pub use services::game_service::GameService;
pub use services::pool_service::PoolService;
