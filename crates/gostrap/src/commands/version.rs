//! Version command

use anyhow::Result;

pub fn run() -> Result<()> {
    println!("gostrap {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
