//! CLI for the textkit utilities.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use textkit_core::config::{self, TextkitConfig};

use commands::{run_decrypt, run_demo, run_encrypt, run_max_line, run_tags, DemoArgs, TagSource};

/// Top-level CLI. With no subcommand, runs the demo.
#[derive(Debug, Parser)]
#[command(name = "textkit")]
#[command(about = "textkit: max-word line scan, streaming Caesar cipher, HTML tag counts", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/textkit/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run all three utilities against the configured files and URL.
    Demo {
        /// Do not fetch the URL; stop after the cipher round trip.
        #[arg(long)]
        skip_tags: bool,
        /// Page to count tags on (overrides config).
        #[arg(long)]
        url: Option<String>,
        /// Cipher key character (overrides config).
        #[arg(long)]
        key: Option<char>,
        /// Directory for input/encrypted/decrypted files (default: current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Print the line with the most words in a text file.
    MaxLine {
        /// Path to a UTF-8 text file.
        path: PathBuf,
    },

    /// Encrypt a text file with the Caesar cipher.
    Encrypt {
        input: PathBuf,
        output: PathBuf,
        /// Cipher key character (default from config).
        #[arg(long)]
        key: Option<char>,
    },

    /// Decrypt a file produced by `encrypt`.
    Decrypt {
        input: PathBuf,
        output: PathBuf,
        /// Cipher key character (default from config).
        #[arg(long)]
        key: Option<char>,
    },

    /// Count HTML tags on a page (or in a local file) and print both reports.
    Tags {
        /// URL to fetch (default from config).
        url: Option<String>,
        /// Read pre-fetched HTML from a file instead of the network.
        #[arg(long, conflicts_with = "url", value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

impl Cli {
    fn load_config(&self) -> Result<TextkitConfig> {
        match &self.config {
            Some(path) => config::load_or_init_at(path),
            None => config::load_or_init(),
        }
    }
}

impl CliCommand {
    /// Whether the command reads any config value. Commands that don't never touch
    /// the config file.
    pub fn needs_config(&self) -> bool {
        match self {
            CliCommand::Demo { .. } => true,
            CliCommand::MaxLine { .. } => false,
            CliCommand::Encrypt { key, .. } | CliCommand::Decrypt { key, .. } => key.is_none(),
            // Fetch timeouts come from config even when the URL is given.
            CliCommand::Tags { file, .. } => file.is_none(),
        }
    }

    pub fn run_from_args() -> Result<()> {
        let mut cli = Cli::parse();
        let command = cli.command.take().unwrap_or(CliCommand::Demo {
            skip_tags: false,
            url: None,
            key: None,
            dir: None,
        });

        let cfg = if command.needs_config() {
            let cfg = cli.load_config()?;
            tracing::debug!("loaded config: {:?}", cfg);
            cfg
        } else {
            TextkitConfig::default()
        };

        match command {
            CliCommand::Demo {
                skip_tags,
                url,
                key,
                dir,
            } => run_demo(
                &cfg,
                DemoArgs {
                    skip_tags,
                    url,
                    key,
                    dir,
                },
            )?,
            CliCommand::MaxLine { path } => run_max_line(&path)?,
            CliCommand::Encrypt { input, output, key } => {
                run_encrypt(&input, &output, key.unwrap_or(cfg.cipher_key))?
            }
            CliCommand::Decrypt { input, output, key } => {
                run_decrypt(&input, &output, key.unwrap_or(cfg.cipher_key))?
            }
            CliCommand::Tags { url, file } => {
                let source = match file {
                    Some(path) => TagSource::File(path),
                    None => TagSource::Url(url.unwrap_or_else(|| cfg.url.clone())),
                };
                run_tags(&source, &cfg.fetch_options())?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
