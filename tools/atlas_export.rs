#![cfg(all(feature = "tool", feature = "save-to-rust"))]

use atlas_packer::builder::SheetBuilder;
use atlas_packer::{DEFAULT_PADDING, PackerConfig};
use clap::Parser;
use log::info;
use std::{error::Error, path::PathBuf};

/// Packs PNG images into a single padded atlas.
#[derive(Parser, Debug)]
#[command(name = "atlas_export", about = "Pack PNG images into one texture atlas")]
struct Args {
    /// Atlas PNG to write.
    #[arg(long)]
    output: PathBuf,
    /// Blank border around every image, in pixels.
    #[arg(long, default_value_t = DEFAULT_PADDING)]
    padding: usize,
    /// Also write the sprite table as Rust source.
    #[arg(long)]
    rust: Option<PathBuf>,
    /// Constant name used in the Rust source.
    #[arg(long, default_value = "SPRITE_ATLAS")]
    name: String,
    /// Images to pack, in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    export_atlas(&args)?;
    Ok(())
}

fn export_atlas(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut builder = SheetBuilder::new(PackerConfig::default().with_padding(args.padding))?;
    for input in &args.inputs {
        builder.add_image(input)?;
    }
    let sheet = builder.finish();
    sheet.atlas.save_png_image(&args.output)?;
    info!("wrote {}x{} atlas to {}", sheet.atlas.width(), sheet.atlas.height(), args.output.display());

    if let Some(path) = &args.rust {
        sheet.to_rust_file(&args.name, path)?;
        info!("wrote {} sprite(s) to {}", sheet.sprites.len(), path.display());
    }
    Ok(())
}
