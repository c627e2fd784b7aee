//! App Engine SDK bootstrap CLI
//!
//! Usage:
//!   gae-sdk download [DIR] [--version V]     Download and unpack the SDK
//!   gae-sdk locate [--download]              Print the resolved SDK path
//!   gae-sdk env [--download] [--pth FILE]    Print shell exports for the SDK

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gae_sdk_path::config::{DEFAULT_DIR, DEFAULT_PYTHON_VERSION, DEFAULT_VERSION, DOWNLOAD_URL_FORMAT};
use gae_sdk_path::{
    Config, Locator, PythonProbe, SearchPath, SystemHost, download_sdk_from, fix_paths, output,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gae-sdk")]
#[command(about = "Locate or download the App Engine SDK and fix up the Python path")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download App Engine SDK
    Download {
        /// Directory to download to
        #[arg(default_value = DEFAULT_DIR)]
        dir: PathBuf,

        /// SDK version string
        #[arg(long = "version", default_value = DEFAULT_VERSION)]
        sdk_version: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the resolved SDK directory
    Locate {
        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Print `export` lines for APPENGINE_SDK and PYTHONPATH
    Env {
        #[command(flatten)]
        lookup: LookupArgs,

        /// Python prefix whose site-packages are vendored in front
        #[arg(long, env = "VIRTUAL_ENV")]
        vendor_prefix: Option<PathBuf>,

        /// Python series used for the vendor site directory
        #[arg(long, default_value = DEFAULT_PYTHON_VERSION)]
        python_version: String,

        /// Write namespace package extensions to this .pth file
        #[arg(long)]
        pth: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Download URL template; `{version}` is replaced with the SDK version
    #[arg(long, env = "GAE_SDK_URL_FORMAT", default_value = DOWNLOAD_URL_FORMAT)]
    url_format: String,
}

#[derive(Args)]
struct LookupArgs {
    /// Local SDK directory, checked after $APPENGINE_SDK and $PATH
    #[arg(long, default_value = DEFAULT_DIR)]
    dir: PathBuf,

    /// SDK version to download when missing
    #[arg(long = "version", default_value = DEFAULT_VERSION)]
    sdk_version: String,

    /// Download the SDK into --dir if it cannot be found
    #[arg(long)]
    download: bool,

    #[command(flatten)]
    source: SourceArgs,
}

impl LookupArgs {
    fn into_config(self) -> Config {
        Config {
            default_dir: self.dir,
            version: self.sdk_version,
            auto_download: self.download,
            url_format: self.source.url_format,
            ..Config::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            dir,
            sdk_version,
            source,
        } => {
            let url = gae_sdk_path::config::format_url(&source.url_format, &sdk_version);
            download_sdk_from(&url, &dir)
                .with_context(|| format!("Failed to download SDK {} to {}", sdk_version, dir.display()))?;
        }

        Commands::Locate { lookup } => {
            let config = lookup.into_config();
            let location = Locator::new(&SystemHost, &config).locate()?;
            output::info(&format!(
                "App Engine SDK {} (from {})",
                location.version, location.source
            ));
            println!("{}", location.path.display());
        }

        Commands::Env {
            lookup,
            vendor_prefix,
            python_version,
            pth,
        } => {
            let config = Config {
                vendor_prefix,
                python_version,
                ..lookup.into_config()
            };
            let search_path = std::env::var_os("PYTHONPATH")
                .map(|v| SearchPath::from_env_value(&v))
                .unwrap_or_default();
            let probe = PythonProbe::discover(&SystemHost)?;
            output::detail(&format!("probing SDK with {}", probe.interpreter().display()));

            let env = fix_paths(&config, &SystemHost, &probe, search_path)?;

            if let Some(pth) = pth {
                let mut content = env.search_path.pth_lines().join("\n");
                content.push('\n');
                std::fs::write(&pth, content)
                    .with_context(|| format!("Failed to write {}", pth.display()))?;
                output::detail(&format!("wrote {}", pth.display()));
            }

            let pythonpath = env
                .search_path
                .to_env_value()
                .context("Search path entry contains the path separator")?;
            println!(
                "export APPENGINE_SDK={}",
                shell_quote(&env.location.path.to_string_lossy())
            );
            println!(
                "export PYTHONPATH={}",
                shell_quote(&pythonpath.to_string_lossy())
            );
        }
    }

    Ok(())
}

/// Quote a value for POSIX `sh`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
