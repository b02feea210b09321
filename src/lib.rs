//! Grid raycasting: a tile map, a player walking around it, and the
//! per-column wall heights of the first-person view.
//!
//! The crate does no drawing. [`Game`] owns one map and one player and,
//! after every [`Game::tick`], exposes the cast rays and projected columns
//! for whatever front-end renders them.

pub mod config;
pub mod game;
pub mod geometry;
pub mod map;
pub mod player;
pub mod projection;
pub mod ray;

pub use config::Config;
pub use game::Game;
pub use map::Map;
pub use player::Player;
pub use projection::{Column, Projector};
pub use ray::{cast_all, Cardinal, Ray};
