pub mod game_service_errors;
pub mod pool_service_errors;
