mod printer;
mod tty;

pub use printer::*;
pub use tty::*;
