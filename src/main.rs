use clap::{ArgAction, Parser};
use mp3_cover_resizer::imaging::Quality;
use mp3_cover_resizer::logger::{ConsoleLogger, Logger, NullLogger};
use mp3_cover_resizer::{batch, config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mp3-cover-resizer")]
#[command(version)]
#[command(about = "Resize the album covers embedded in the ID3v2 tags of MP3 files")]
#[command(long_about = "\
Resize the album covers embedded in the ID3v2 tags of all MP3 files in a
given directory.

Every picture is scaled to fit inside WIDTHxHEIGHT with its aspect ratio
preserved and re-encoded in its own format at the given quality. Files
without an ID3v2 tag are reported and skipped.

With --override-cover, an image named like --cover-name next to a track
replaces all of its embedded pictures before resizing.

Settings can also come from a config file (--config); flags win. Run
'mp3-cover-resizer --gen-config' for a documented example.")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Directory containing MP3 files, which should be processed
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    dir: Option<PathBuf>,

    /// New max width of images
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// New max height of images
    #[arg(short = 'h', long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Compress image after resizing (value: 0 - 100)
    #[arg(short = 'q', long, allow_negative_numbers = true)]
    quality: Option<i64>,

    /// Also process files in subdirectories
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Only process files whose name matches this glob
    #[arg(short = 'f', long, value_name = "GLOB")]
    filter: Option<String>,

    /// Replace embedded pictures with an image file next to each track
    #[arg(long)]
    override_cover: bool,

    /// File name of the override image
    #[arg(long, value_name = "NAME")]
    cover_name: Option<String>,

    /// Read settings from a TOML config file
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a config.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Show progress and other messages
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Show information about usage
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    /// Layer command-line flags over the loaded config.
    fn apply_to(&self, config: &mut config::ResizeConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(quality) = self.quality {
            config.quality = Quality::new(quality);
        }
        if self.recursive {
            config.recursive = true;
        }
        if let Some(filter) = &self.filter {
            config.filter = filter.clone();
        }
        if self.override_cover {
            config.cover.override_from_file = true;
        }
        if let Some(name) = &self.cover_name {
            config.cover.file_name = name.clone();
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    // Without a directory there is nothing to configure.
    let Some(dir) = &cli.dir else {
        println!(
            "No path to a directory with MP3 files provided. \
             Please use 'mp3-cover-resizer -d \"/music/Amon Amarth\"' to choose a directory."
        );
        return Ok(());
    };

    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;

    let logger: &dyn Logger = if cli.verbose {
        &ConsoleLogger
    } else {
        &NullLogger
    };

    let report = batch::resize(dir, &config, logger)?;
    output::print_batch_summary(&report);

    Ok(())
}
