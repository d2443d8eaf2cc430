pub mod compose;
pub mod config;
pub mod helpers;
pub mod launch;
pub mod scenarios;
pub mod schema;
pub mod validate;
