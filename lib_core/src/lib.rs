mod cli_error;
mod constants;
mod tty;

pub use cli_error::*;
pub use constants::*;
pub use tty::*;
