pub mod config;
pub mod focus;
pub mod hydration;
pub mod run;
pub mod task;
