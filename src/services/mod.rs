pub mod game_service;
pub mod rating_service;
pub mod release_service;
pub mod revision_service;
pub mod screenshot_service;
pub mod user_service;
