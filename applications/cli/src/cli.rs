/// Command-line interface
use crate::config::{AppConfig, FailurePolicy, Verbosity};
use clap::Parser;
use std::path::PathBuf;

pub const COPYRIGHT_NOTICE: &str = concat!(
    "smoothloop ",
    env!("CARGO_PKG_VERSION"),
    "\n\n",
    "Copyright (c) 2010-2011 Jan Kaliszewski (zuo). All rights reserved.\n",
    "Copyright (c) Smoothloop Contributors.\n\n",
    "This program is free software: you can redistribute it and/or modify\n",
    "it under the terms of the GNU General Public License as published by\n",
    "the Free Software Foundation, either version 2 of the License, or\n",
    "(at your option) any later version.\n\n",
    "This program is distributed in the hope that it will be useful,\n",
    "but WITHOUT ANY WARRANTY; without even the implied warranty of\n",
    "MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the\n",
    "GNU General Public License for more details.\n\n",
    "You should have received a copy of the GNU General Public License\n",
    "along with this program.  If not, see <http://www.gnu.org/licenses/>.",
);

#[derive(Debug, Parser)]
#[command(name = "smoothloop", version)]
#[command(about = "Make seamless crossfade loops out of WAV samples", long_about = None)]
pub struct Cli {
    /// Show the copyright information and exit
    #[arg(long)]
    pub copyright: bool,

    /// Configuration file path (default: ./smoothloop.toml if present)
    #[arg(long, env = "SMOOTHLOOP_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Beginning of crossfade-loop mix source area, in SECONDS (default: 1.0)
    #[arg(short = 's', long, value_name = "SECONDS")]
    pub cf_source: Option<f64>,

    /// Crossfade-loop mix length, in SECONDS (default: 1.5)
    #[arg(short = 'l', long, value_name = "SECONDS")]
    pub cf_length: Option<f64>,

    /// Interval between the end of loop and the end of wave, in SECONDS (default: 0.1)
    #[arg(short = 'c', long, value_name = "SECONDS")]
    pub cf_cut: Option<f64>,

    /// Length of added after-loop area, in SECONDS (default: 0.1)
    #[arg(short = 'e', long, value_name = "SECONDS")]
    pub cf_extra: Option<f64>,

    /// Length of wave's beginning fade-in, in SECONDS (default: 0.0005)
    #[arg(short = 'i', long, value_name = "SECONDS")]
    pub wave_fade_in: Option<f64>,

    /// Output filename SUFFIX added before the .wav extension (default: .L)
    #[arg(short = 'f', long, value_name = "SUFFIX")]
    pub filename_suffix: Option<String>,

    /// Overwrite source file(s) (do not add any filename suffix)
    #[arg(short = 'o', long)]
    pub overwrite: bool,

    /// Verbosity LEVEL (default: info)
    #[arg(short = 'v', long, value_enum, value_name = "LEVEL")]
    pub verbosity: Option<Verbosity>,

    /// What to do when a file fails (default: abort)
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_error: Option<FailurePolicy>,

    /// WAVE files to process
    #[arg(value_name = "WAVEFILE", required_unless_present = "copyright")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Apply the flags given on the command line on top of `config`
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(value) = self.cf_source {
            config.loop_options.cf_source = value;
        }
        if let Some(value) = self.cf_length {
            config.loop_options.cf_length = value;
        }
        if let Some(value) = self.cf_cut {
            config.loop_options.cf_cut = value;
        }
        if let Some(value) = self.cf_extra {
            config.loop_options.cf_extra = value;
        }
        if let Some(value) = self.wave_fade_in {
            config.loop_options.wave_fade_in = value;
        }
        if let Some(suffix) = &self.filename_suffix {
            config.filename_suffix.clone_from(suffix);
        }
        if self.overwrite {
            config.overwrite = true;
        }
        if let Some(verbosity) = self.verbosity {
            config.verbosity = verbosity;
        }
        if let Some(policy) = self.on_error {
            config.on_error = policy;
        }
    }
}
