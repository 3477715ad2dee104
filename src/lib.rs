//! Grid snake: the simulation core (`snake`, `food`, `game`) and the
//! terminal front end that drives it once per tick.

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
