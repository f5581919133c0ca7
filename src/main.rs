//! glyphtone CLI - Interactive brightness-matched ASCII art from an image

use clap::Parser;
use glyphtone::config::Config;
use glyphtone::shell::{OutputMode, Shell};
use glyphtone::{Converter, FontRasterizer, GlyphtoneError, PaddedImage};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glyphtone", about = "Convert images to brightness-matched ASCII art")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Font file used to measure glyph brightness
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Initial output width in characters
    #[arg(short, long)]
    width: Option<u32>,
    /// Initial character set
    #[arg(long)]
    chars: Option<String>,
    /// HTML output file
    #[arg(long)]
    html_file: Option<PathBuf>,
    /// Start with console output instead of HTML
    #[arg(long)]
    console: bool,
}

fn main() -> Result<(), GlyphtoneError> {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(font) = args.font {
        config.font_path = font;
    }
    if let Some(width) = args.width {
        config.chars_per_row = width;
    }
    if let Some(chars) = args.chars {
        config.charset = chars;
    }
    if let Some(html_file) = args.html_file {
        config.html_file = html_file;
    }
    config.validate()?;

    let image = PaddedImage::open(&args.input)?;
    let rasterizer = FontRasterizer::from_file(&config.font_path)?;
    let converter = Converter::new(rasterizer).with_bitmap_size(config.bitmap_size);

    let mut shell = Shell::new(image, converter, &config);
    if args.console {
        shell.state_mut().set_output_mode(OutputMode::Console);
    }

    let stdin = std::io::stdin();
    shell.run(stdin.lock(), std::io::stdout())
}
