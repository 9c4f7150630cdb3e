use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use price_brackets::brand::Brand;
use price_brackets::sample::{sample_table, usage_hint, SAMPLE_PRODUCT};
use price_brackets::{PriceBracketGenerator, DEFAULT_OUTPUT_DIR};

/// Renders the sample ESD mat roll price brackets as PDF and PNG.
///
/// The raster output needs a TrueType font pair. The bundled DejaVu fonts
/// under `assets/fonts` are found automatically; point
/// `PRICE_BRACKETS_FONTS_DIR` elsewhere to override them.
#[derive(Parser)]
#[command(author, version, about = "Generate branded price bracket documents")]
struct Cli {
    /// Directory that receives the generated documents.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Logo image drawn above the title; skipped when the file is missing.
    #[arg(long, value_name = "PATH")]
    logo: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut brand = Brand::from_env();
    if let Some(logo) = cli.logo {
        brand = brand.with_logo_path(logo);
    }

    fs::create_dir_all(&cli.output_dir)?;
    let table = sample_table()?;
    let documents = PriceBracketGenerator::new(brand).generate(SAMPLE_PRODUCT, &table, &cli.output_dir)?;

    println!("PDF: {}", documents.pdf.display());
    println!("PNG: {}", documents.png.display());
    println!();
    print!("{}", usage_hint());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
