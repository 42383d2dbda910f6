pub mod config;
pub mod costs;
pub mod input;
pub mod matcher;
pub mod output;
pub mod validate;
