//! fmtrc: inspect and validate formatter configuration

use anyhow::Result;

fn main() -> Result<()> {
    fmtrc::cli::run()
}
