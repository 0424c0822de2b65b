//! DGDB - community-edited catalogue of games
//!
//! This crate serves the catalogue site:
//! - Game and release entries, created and edited by logged-in users
//! - A field-level revision history of every accepted edit
//! - Screenshots, user ratings and reviews
//! - A game list sortable by title or Bayesian rating

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod revision;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;
