//! Form payloads accepted by the routes and the page models they render.

pub mod account;
pub mod game;
pub mod page;
pub mod rating;
pub mod release;
pub mod revision;
