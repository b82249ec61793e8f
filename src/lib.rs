//! Far West: a top-down arcade shooter. The library holds the whole
//! simulation; the binary only draws it and reads the keyboard.

pub mod ai;
pub mod animation;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod hud;
pub mod spawn;
