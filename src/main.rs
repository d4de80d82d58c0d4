//! CLI entry point for the stereogram renderer

use clap::Parser;
use sirds::io::cli::{Cli, StereogramRenderer};

fn main() -> sirds::Result<()> {
    let cli = Cli::parse();
    let renderer = StereogramRenderer::new(cli);
    renderer.process()
}
