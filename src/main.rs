//! Obscura - Reversible text and image obfuscation
//!
//! CLI for obfuscating and restoring text files and images. Obfuscation
//! writes the scrambled payload plus a JSON sidecar holding the data needed
//! to invert the transform; restoration reads both back.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use obscura::metadata::{ImageMetadata, TextMetadata};
use obscura::text::TextMode;
use obscura::ObfuscationError;

/// Text file extensions processed during directory walks.
const TEXT_EXTENSIONS: &[&str] = &["txt", "csv", "xml", "html", "md", "js", "py"];

/// Image file extensions processed during directory walks.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "webp"];

/// Obscura - Reversible text and image obfuscation
///
/// Scrambles text files or images under a key and restores them bit-exactly
/// from the scrambled output plus a JSON sidecar.
#[derive(Parser)]
#[command(name = "obscura")]
#[command(version = "0.5.0")]
#[command(about = "Reversibly obfuscate and restore text files and images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Obfuscate or restore text files
    ///
    /// Modes basic and advanced write a `{stem}_meta.json` sidecar next to
    /// the output; restoring looks the sidecar up next to the input. Mode
    /// aes is self-contained and needs no sidecar.
    Text {
        /// Input file or directory
        input: PathBuf,

        /// Obfuscation key (any string)
        key: String,

        /// Processing direction: confuse or restore
        #[arg(long, default_value = "confuse")]
        mode: String,

        /// Text obfuscation mode: basic, advanced, or aes
        #[arg(long, default_value = "basic")]
        text_mode: String,

        /// Output directory
        #[arg(long, default_value = "output")]
        output: PathBuf,

        /// Prefix prepended to output file names
        #[arg(long, default_value = "")]
        prefix: String,

        /// Do not recurse into subdirectories
        #[arg(long)]
        no_recursive: bool,
    },

    /// Obfuscate or restore images
    ///
    /// Output is always PNG (a lossy format would destroy the exact byte
    /// values restoration depends on). The pixel permutation is written to a
    /// `{stem}_perm.json` sidecar next to the output; restoring looks it up
    /// next to the input.
    Image {
        /// Input file or directory
        input: PathBuf,

        /// Obfuscation key (integer)
        key: u64,

        /// Processing direction: confuse or restore
        #[arg(long, default_value = "confuse")]
        mode: String,

        /// Output directory
        #[arg(long, default_value = "output")]
        output: PathBuf,

        /// Prefix prepended to output file names
        #[arg(long, default_value = "")]
        prefix: String,

        /// Do not recurse into subdirectories
        #[arg(long)]
        no_recursive: bool,
    },
}

/// Processing direction for both subcommands.
#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Confuse,
    Restore,
}

fn parse_direction(mode: &str) -> Result<Direction> {
    match mode {
        "confuse" => Ok(Direction::Confuse),
        "restore" => Ok(Direction::Restore),
        other => bail!("unknown processing mode: {other}. Use: confuse or restore"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Text {
            input,
            key,
            mode,
            text_mode,
            output,
            prefix,
            no_recursive,
        } => {
            let direction = parse_direction(&mode)?;
            let text_mode = text_mode.parse::<TextMode>()?;
            run_batch(
                &input,
                &output,
                !no_recursive,
                TEXT_EXTENSIONS,
                |in_file, out_dir| {
                    process_text_file(in_file, out_dir, &prefix, &key, text_mode, direction)
                },
            )
        }

        Commands::Image {
            input,
            key,
            mode,
            output,
            prefix,
            no_recursive,
        } => {
            let direction = parse_direction(&mode)?;
            run_batch(
                &input,
                &output,
                !no_recursive,
                IMAGE_EXTENSIONS,
                |in_file, out_dir| process_image_file(in_file, out_dir, &prefix, key, direction),
            )
        }
    }
}

/// Runs `process` over a single file or every matching file under a
/// directory, mirroring the directory structure below `output`.
///
/// A failing file is reported and counted as skipped; it never aborts the
/// batch.
fn run_batch(
    input: &Path,
    output: &Path,
    recursive: bool,
    extensions: &[&str],
    process: impl Fn(&Path, &Path) -> Result<PathBuf>,
) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    if input.is_file() {
        let out_path = process(input, output)?;
        println!("done: {} -> {}", input.display(), out_path.display());
        return Ok(());
    }

    if !input.is_dir() {
        bail!(
            "path '{}' does not exist or is not a file/directory",
            input.display()
        );
    }

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut pending = vec![(input.to_path_buf(), output.to_path_buf())];

    while let Some((dir, out_dir)) = pending.pop() {
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        for entry in entries {
            let path = entry?.path();

            if path.is_dir() {
                if recursive {
                    let name = path.file_name().unwrap_or_default().to_os_string();
                    pending.push((path, out_dir.join(name)));
                }
                continue;
            }

            if !has_extension(&path, extensions) {
                continue;
            }

            fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create {}", out_dir.display()))?;

            match process(&path, &out_dir) {
                Ok(out_path) => {
                    println!("done: {} -> {}", path.display(), out_path.display());
                    processed += 1;
                }
                Err(e) => {
                    eprintln!("failed: {} - {e:#}", path.display());
                    skipped += 1;
                }
            }
        }
    }

    println!();
    println!("Finished: {processed} file(s) processed, {skipped} skipped");
    Ok(())
}

/// Case-insensitive extension match against `extensions`.
fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_lowercase();
            extensions.iter().any(|&ext| ext == e)
        })
        .unwrap_or(false)
}

/// Sidecar path for a payload file: same directory, `{stem}{suffix}.json`.
fn sidecar_path(file: &Path, suffix: &str) -> PathBuf {
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    file.with_file_name(format!("{stem}{suffix}.json"))
}

/// Obfuscates or restores one text file, returning the output path.
fn process_text_file(
    input: &Path,
    out_dir: &Path,
    prefix: &str,
    key: &str,
    text_mode: TextMode,
    direction: Direction,
) -> Result<PathBuf> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .context("input has no file name")?;
    let out_path = out_dir.join(format!("{prefix}{file_name}"));

    match direction {
        Direction::Confuse => {
            let (scrambled, metadata) = obscura::text::obfuscate(&content, key, text_mode)?;

            fs::write(&out_path, scrambled)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;

            // AES envelopes carry their own framing; no sidecar.
            if metadata != TextMetadata::Aes {
                let meta_path = sidecar_path(&out_path, "_meta");
                let json =
                    serde_json::to_string(&metadata).context("Failed to serialize metadata")?;
                fs::write(&meta_path, json)
                    .with_context(|| format!("Failed to write {}", meta_path.display()))?;
            }
        }
        Direction::Restore => {
            let metadata = if text_mode == TextMode::Aes {
                TextMetadata::Aes
            } else {
                let meta_path = sidecar_path(input, "_meta");
                let json = fs::read_to_string(&meta_path).with_context(|| {
                    format!("Metadata sidecar not found: {}", meta_path.display())
                })?;
                let metadata: TextMetadata =
                    serde_json::from_str(&json).context("Failed to parse metadata sidecar")?;

                // A sidecar written by a different mode cannot invert this
                // payload; refuse rather than produce garbage.
                if metadata.mode_name() != text_mode.as_str() {
                    return Err(ObfuscationError::InvalidMetadata {
                        field: "mode",
                        expected: text_mode.as_str().to_string(),
                        actual: metadata.mode_name().to_string(),
                    }
                    .into());
                }
                metadata
            };

            let restored = obscura::text::restore(&content, key, &metadata)?;
            fs::write(&out_path, restored)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
        }
    }

    Ok(out_path)
}

/// Obfuscates or restores one image, returning the output path.
/// Output is always PNG regardless of the input format.
fn process_image_file(
    input: &Path,
    out_dir: &Path,
    prefix: &str,
    key: u64,
    direction: Direction,
) -> Result<PathBuf> {
    let decoded = image::open(input)
        .with_context(|| format!("Failed to open image {}", input.display()))?;
    let rgb = obscura::image::normalize(&decoded);

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input has no file name")?;
    let out_path = out_dir.join(format!("{prefix}{stem}.png"));

    match direction {
        Direction::Confuse => {
            let (scrambled, permutation) = obscura::image::obfuscate(&rgb, key);

            scrambled
                .save(&out_path)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;

            let meta_path = sidecar_path(&out_path, "_perm");
            let metadata = ImageMetadata {
                permutation_key: permutation,
            };
            let json = serde_json::to_string(&metadata).context("Failed to serialize metadata")?;
            fs::write(&meta_path, json)
                .with_context(|| format!("Failed to write {}", meta_path.display()))?;
        }
        Direction::Restore => {
            let meta_path = sidecar_path(input, "_perm");
            let json = fs::read_to_string(&meta_path).with_context(|| {
                format!("Permutation sidecar not found: {}", meta_path.display())
            })?;
            let metadata: ImageMetadata =
                serde_json::from_str(&json).context("Failed to parse permutation sidecar")?;

            let restored = obscura::image::restore(&rgb, key, &metadata.permutation_key)?;
            restored
                .save(&out_path)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
        }
    }

    Ok(out_path)
}
