pub mod api;
pub mod config;
pub mod error;
pub mod homework;
pub mod notifier;
pub mod poller;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_support;
