pub mod config;
pub mod logging;

pub mod canonical;
pub mod http;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod resolver;
pub mod suggest;
pub mod title;
