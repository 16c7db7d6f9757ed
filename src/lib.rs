pub mod cli;
pub mod command;
pub mod config;
pub mod env;
pub mod inspect;
pub mod manifest;
pub mod paths;
pub mod registry;
pub mod repo;
pub mod result;
pub mod scaffold;

pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
