mod app;
mod args;
mod bench;
mod config;
mod dispatch;
mod entry;
mod error;
mod remote;
mod shutdown;
mod system;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
