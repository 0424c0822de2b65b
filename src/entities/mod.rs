//! SeaORM entity models, one module per table.

pub mod game;
pub mod game_revision;
pub mod rating;
pub mod release;
pub mod release_revision;
pub mod review;
pub mod screenshot;
pub mod user;
