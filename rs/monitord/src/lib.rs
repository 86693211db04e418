pub mod client;
pub mod config;
pub mod constant;
pub mod credentials;
pub mod error;
pub mod handler;
pub mod informer;
pub mod lifecycle;
pub mod selector;

#[cfg(test)]
mod test_util;
