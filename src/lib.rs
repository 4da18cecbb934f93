pub mod catalog;
pub mod collision;
pub mod constants;
pub mod geometry;
pub mod orbit_model;
pub mod risk;
pub mod route;
pub mod simulation;
pub mod sweeper_errors;
pub mod time;
