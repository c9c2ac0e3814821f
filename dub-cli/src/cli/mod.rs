pub mod args;
pub mod types;

pub use args::{Cli, Commands, NamingArgs, SelectionArgs};
pub use types::{OutputFormat, PreviewArg};
