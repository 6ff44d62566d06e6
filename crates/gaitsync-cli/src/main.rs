//! gaitsync CLI - leg angle extraction and retargeting from the command line
//!
//! This binary extracts sagittal leg angles from pose files, maps them onto
//! a target rig, and runs a procedural demo animation through the pipeline.

use clap::{Parser, Subcommand};
use gaitsync_core::AngleSet;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Use modules from the library crate
use gaitsync_cli::commands;
use gaitsync_cli::commands::retarget::AngleSource;
use gaitsync_cli::input::parse_angle_set;

/// gaitsync - Leg Angle Extraction and Retargeting
#[derive(Parser)]
#[command(name = "gaitsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract thigh, calf and foot angles of both legs from a pose file
    Angles {
        /// Path to the pose file (JSON tick input or snapshot)
        #[arg(short, long)]
        input: String,

        /// Path to a pipeline config file (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Report unsigned angles (0..180) instead of signed ones
        #[arg(long)]
        unsigned: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Map leg angles onto the target rig's bind pose
    Retarget {
        /// Path to the pose file to extract angles from
        #[arg(
            short,
            long,
            conflicts_with_all = ["left", "right"],
            required_unless_present_all = ["left", "right"]
        )]
        input: Option<String>,

        /// Left leg angles in degrees as thigh,calf,foot
        #[arg(long, requires = "right", allow_hyphen_values = true, value_parser = parse_angle_set)]
        left: Option<AngleSet>,

        /// Right leg angles in degrees as thigh,calf,foot
        #[arg(long, requires = "left", allow_hyphen_values = true, value_parser = parse_angle_set)]
        right: Option<AngleSet>,

        /// Path to a pipeline config file (JSON) holding the bind poses
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Run the procedural leg-lift animation through the pipeline
    Demo {
        /// Number of frames to simulate
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// Seconds between frames
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Report unsigned angles (0..180) instead of signed ones
        #[arg(long)]
        unsigned: bool,

        /// Output one JSON object per frame (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Angles {
            input,
            config,
            unsigned,
            json,
        } => commands::angles::run(&input, config.as_deref(), unsigned, json),
        Commands::Retarget {
            input,
            left,
            right,
            config,
            json,
        } => AngleSource::from_args(input.as_deref(), left, right)
            .and_then(|source| commands::retarget::run(source, config.as_deref(), json)),
        Commands::Demo {
            frames,
            dt,
            unsigned,
            json,
        } => commands::demo::run(frames, dt, unsigned, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_angles() {
        let cli = Cli::try_parse_from(["gaitsync", "angles", "--input", "pose.json"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Angles {
                input,
                config,
                unsigned,
                json,
            } => {
                assert_eq!(input, "pose.json");
                assert!(config.is_none());
                assert!(!unsigned);
                assert!(!json);
            }
            _ => panic!("expected angles command"),
        }
    }

    #[test]
    fn test_cli_parses_angles_with_flags() {
        let cli = Cli::try_parse_from([
            "gaitsync",
            "-v",
            "angles",
            "-i",
            "pose.json",
            "-c",
            "rig.json",
            "--unsigned",
            "--json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Angles {
                config,
                unsigned,
                json,
                ..
            } => {
                assert_eq!(config.as_deref(), Some("rig.json"));
                assert!(unsigned);
                assert!(json);
            }
            _ => panic!("expected angles command"),
        }
    }

    #[test]
    fn test_cli_parses_retarget_direct_angles() {
        let cli = Cli::try_parse_from([
            "gaitsync",
            "retarget",
            "--left",
            "30,30,60",
            "--right",
            "-5,0,54.741",
        ])
        .unwrap();
        match cli.command {
            Commands::Retarget {
                input, left, right, ..
            } => {
                assert!(input.is_none());
                assert_eq!(left, Some(AngleSet::new(30.0, 30.0, 60.0)));
                assert_eq!(right, Some(AngleSet::new(-5.0, 0.0, 54.741)));
            }
            _ => panic!("expected retarget command"),
        }
    }

    #[test]
    fn test_cli_retarget_requires_a_source() {
        assert!(Cli::try_parse_from(["gaitsync", "retarget"]).is_err());
        assert!(Cli::try_parse_from(["gaitsync", "retarget", "--left", "1,2,3"]).is_err());
    }

    #[test]
    fn test_cli_retarget_rejects_both_sources() {
        let result = Cli::try_parse_from([
            "gaitsync",
            "retarget",
            "--input",
            "pose.json",
            "--left",
            "1,2,3",
            "--right",
            "1,2,3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_retarget_rejects_bad_triplet() {
        let err = Cli::try_parse_from([
            "gaitsync", "retarget", "--left", "1,2", "--right", "1,2,3",
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_cli_parses_demo_defaults() {
        let cli = Cli::try_parse_from(["gaitsync", "demo"]).unwrap();
        match cli.command {
            Commands::Demo {
                frames,
                dt,
                unsigned,
                json,
            } => {
                assert_eq!(frames, 60);
                assert!((dt - 1.0 / 60.0).abs() < 1e-9);
                assert!(!unsigned);
                assert!(!json);
            }
            _ => panic!("expected demo command"),
        }
    }
}
