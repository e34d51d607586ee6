use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use tinge_effects::Effect;
use tinge_pipeline::run_file;

#[derive(Parser, Debug)]
#[command(name = "tinge")]
#[command(about = "Apply per-frame color effects to video files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input video file
    #[arg(short, long)]
    input: PathBuf,

    /// Output video file
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert the video to greyscale
    Greyscale {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Shift hue and scale saturation and lightness
    Hsl {
        /// Hue shift in half-degrees, wraps at 180
        #[arg(long, default_value_t = 0.0)]
        hue: f32,

        /// Saturation multiplier
        #[arg(long, default_value_t = 1.0)]
        saturation: f32,

        /// Lightness multiplier
        #[arg(long, default_value_t = 1.0)]
        lightness: f32,

        #[command(flatten)]
        io: IoArgs,
    },
    /// Adjust contrast and brightness
    Cb {
        /// Contrast multiplier
        #[arg(long, default_value_t = 1.0)]
        contrast: f32,

        /// Brightness offset, added per channel
        #[arg(long, default_value_t = 0.0)]
        brightness: f32,

        #[command(flatten)]
        io: IoArgs,
    },
    /// Apply a sepia tone
    Sepia {
        /// Tone intensity: 0 leaves the video unchanged, 1 is full sepia
        #[arg(long, default_value_t = 1.0)]
        intensity: f32,

        #[command(flatten)]
        io: IoArgs,
    },
    /// Invert all colors
    Invert {
        #[command(flatten)]
        io: IoArgs,
    },
}

impl Command {
    fn into_parts(self) -> (Effect, IoArgs) {
        match self {
            Self::Greyscale { io } => (Effect::Greyscale, io),
            Self::Hsl {
                hue,
                saturation,
                lightness,
                io,
            } => (
                Effect::HslAdjust {
                    hue,
                    saturation,
                    lightness,
                },
                io,
            ),
            Self::Cb {
                contrast,
                brightness,
                io,
            } => (
                Effect::ContrastBrightness {
                    contrast,
                    brightness,
                },
                io,
            ),
            Self::Sepia { intensity, io } => (Effect::Sepia { intensity }, io),
            Self::Invert { io } => (Effect::Invert, io),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (effect, io) = cli.command.into_parts();

    println!(
        "[tinge] applying {} to {}",
        effect.name(),
        io.input.display()
    );

    let output = run_file(&io.input, &io.output, &effect)
        .with_context(|| format!("processing {}", io.input.display()))?;

    println!("[tinge] done: {}", output.display());
    Ok(())
}
