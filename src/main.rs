mod args;
mod batch;
mod config;
mod entry;
mod error;
mod extract;
mod logger;
mod probe;
mod render;
mod shutdown;
mod shutdown_handlers;
mod store;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
