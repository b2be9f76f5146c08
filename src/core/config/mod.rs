pub mod data;
pub mod io;

pub use data::{path_display, Config, RelaySettings};
pub use io::ConfigError;

#[cfg(test)]
mod tests;
