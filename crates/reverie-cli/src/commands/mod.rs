pub mod config;
pub mod mode;
pub mod run;
pub mod themes;
