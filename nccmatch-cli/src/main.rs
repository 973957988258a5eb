use clap::{Parser, Subcommand};
use nccmatch::io::{decode_base64_image, load_decoded};
use nccmatch::{find_slider_offset, search_best_from_row, Template};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Masked NCC template matcher")]
struct Cli {
    /// Enable tracing output for diagnostics.
    #[arg(long)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Locate the slider offset in a captcha background image.
    Slide {
        /// Path to the background image.
        image: Option<PathBuf>,
        /// Base64 payload of the background image instead of a path.
        #[arg(long, value_name = "DATA", conflicts_with = "image")]
        base64: Option<String>,
    },
    /// Locate an alpha-masked template inside a background image.
    Find {
        /// Path to the template image (must carry an alpha channel).
        template: PathBuf,
        /// Path to the background image.
        background: PathBuf,
        /// Write a copy of the background with the match outlined.
        #[arg(long, value_name = "FILE")]
        annotate: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct OffsetRecord {
    x: usize,
    score: f64,
    confident: bool,
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: usize,
    y: usize,
    origin_y: usize,
    score: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("nccmatch=info".parse()?))
            .with_target(false)
            .init();
    }

    match cli.command {
        Command::Slide { image, base64 } => {
            let decoded = match (image, base64) {
                (Some(path), None) => load_decoded(path)?,
                (None, Some(data)) => decode_base64_image(&data)?,
                _ => return Err("provide an image path or --base64 data".into()),
            };
            let offset = find_slider_offset(&decoded)?;
            let record = OffsetRecord {
                x: offset.x,
                score: offset.score,
                confident: offset.confident,
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Find {
            template,
            background,
            annotate,
        } => {
            let tpl_image = load_decoded(&template)?;
            let tpl = Template::extract(&tpl_image)?;
            let bg = load_decoded(&background)?;
            let best = search_best_from_row(bg.gray().view(), &tpl, tpl.origin_y())?;
            let record = MatchRecord {
                x: best.x,
                y: best.y,
                origin_y: tpl.origin_y(),
                score: best.score,
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
            if let Some(out) = annotate {
                write_annotated(&background, &out, best.x, best.y, tpl.width(), tpl.height())?;
            }
        }
    }

    Ok(())
}

fn write_annotated(
    background: &Path,
    out: &Path,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = image::open(background)?.to_rgba8();
    let rect = imageproc::rect::Rect::at(x as i32, y as i32).of_size(width as u32, height as u32);
    imageproc::drawing::draw_hollow_rect_mut(&mut canvas, rect, image::Rgba([255, 0, 0, 255]));
    canvas.save(out)?;
    Ok(())
}
