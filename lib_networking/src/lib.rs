mod public_ip;

pub use public_ip::*;
