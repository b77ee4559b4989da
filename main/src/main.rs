use std::process::ExitCode;

use clap::{error::ErrorKind, Parser};
use public_ip::Tty;

#[derive(Parser, Debug)]
#[command(
    name = "public-ip",
    version,
    about = "Print this machine's public IP address, as reported by ipinfo.io."
)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    // Only --help and --version are honoured; other arguments are ignored.
    if let Err(e) = Cli::try_parse() {
        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            kind => log::debug!("Ignoring command-line arguments ({:?}).", kind),
        }
    }

    let tty = Tty::new();
    let result = public_ip::run().await;
    tty.close(result)
}
