pub mod config;
pub mod logging;

pub mod category;
pub mod convert;
pub mod fetch;
pub mod player;
pub mod playlist;
pub mod session;
pub mod worker;
