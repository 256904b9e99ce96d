//! CLI Module
//!
//! Command-line interface for wavcreate.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wavcreate - render MIDI or JSON notes to a sine-tone WAV file
#[derive(Parser, Debug)]
#[command(name = "wavcreate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a note file to WAV
    #[command(name = "render")]
    Render {
        /// Input note file (.mid, .midi or .json)
        input: PathBuf,

        /// Output WAV file (defaults to the input name with .wav)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sample rate in Hz (overrides the config file)
        #[arg(short = 'r', long)]
        sample_rate: Option<u32>,

        /// JSON render configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check and describe a WAV file written by wavcreate
    #[command(name = "inspect")]
    Inspect {
        /// WAV file to inspect
        path: PathBuf,
    },

    /// Print the notes loaded from a file as JSON
    #[command(name = "notes")]
    Notes {
        /// Input note file (.mid, .midi or .json)
        input: PathBuf,
    },

    /// Print the frequency of a MIDI key
    #[command(name = "freq")]
    Freq {
        /// MIDI key number (69 = A4)
        #[arg(allow_hyphen_values = true)]
        key: i32,
    },
}
