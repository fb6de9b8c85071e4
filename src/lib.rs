pub mod compute;
pub mod config;
pub mod entities;
pub mod highscore;
pub mod viewport;
