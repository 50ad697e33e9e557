//! Show and edit the ID3v2 tag of an audio file
//!
//! Run with:
//! ```bash
//! # Print the tag
//! cargo run -p core-tag --example retag -- song.mp3
//!
//! # Set title and artist, then save
//! cargo run -p core-tag --example retag -- song.mp3 "Foo" "Bar"
//!
//! # Forward debug events to the console sink as well
//! RETAG_SINK=1 cargo run -p core-tag --example retag -- song.mp3
//! ```

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context};
use bridge_traits::time::{ConsoleLogger, LogLevel};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_tag::{PictureFrame, Tag};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        bail!("usage: retag <file> [title] [artist]");
    };

    let mut config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);
    if env::var_os("RETAG_SINK").is_some() {
        config = config.with_logger_sink(Arc::new(ConsoleLogger {
            min_level: LogLevel::Debug,
        }));
    }
    init_logging(config)?;

    let mut tag = Tag::open(path).with_context(|| format!("failed to open {}", path))?;
    info!(version = tag.version().major(), "opened");

    if let Some(title) = args.get(1) {
        tag.set_title(title)?;
    }
    if let Some(artist) = args.get(2) {
        tag.set_artist(artist)?;
    }
    if args.len() > 1 {
        tag.save().context("failed to save tag")?;
    }

    println!("Title:  {}", tag.title()?);
    println!("Artist: {}", tag.artist()?);
    println!("Album:  {}", tag.album()?);
    println!("Year:   {}", tag.year()?);
    println!("Genre:  {}", tag.genre()?);

    let picture_id = tag.id("Attached picture");
    for picture in tag.get_frames(picture_id)? {
        if let Some(picture) = picture.downcast_ref::<PictureFrame>() {
            println!(
                "Picture: {:?}, {}, {} bytes",
                picture.picture_type,
                picture.mime_type,
                picture.picture.len()
            );
        }
    }

    for (id, frames) in tag.all_frames()? {
        println!("{} x{}", id, frames.len());
    }

    tag.close()?;
    Ok(())
}
