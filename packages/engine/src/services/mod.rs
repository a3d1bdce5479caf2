pub mod auto_assigner;
pub mod errors;
pub mod game_locks;
pub mod game_service;
pub mod pool_service;
pub mod rollover;
pub mod round_resolver;
pub mod termination;
