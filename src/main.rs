use clap::{Parser, Subcommand};
use docsite_config::config::{self, SiteConfig};
use docsite_config::{autogen, fingerprint, output, sidebar};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Validate documentation-site configuration")]
#[command(long_about = "\
Validate documentation-site configuration

Checks the site config before the site build runs: the base path the site is
served under, the registered integrations, and each integration's sidebar and
plugins. Problems are reported with the full key path, e.g.

  integrations[0].options.sidebar[0].autogenerate.directory is required

Config discovery (first found wins):
  --config PATH
  ./docsite.toml
  ./docsite.json

Run 'docsite gen-config' to generate a documented docsite.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults to docsite.toml or docsite.json in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML file merged on top of the config; repeat to stack several
    #[arg(long, global = true)]
    overlay: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the config and print what it declares
    Check {
        /// Docs content root; lists the pages each autogenerate directive picks up
        #[arg(long)]
        docs_dir: Option<PathBuf>,
    },
    /// Emit the resolved config as JSON for the build pipeline
    Resolve {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a stock docsite.toml with all options documented
    GenConfig,
}

/// JSON document handed to the build pipeline.
#[derive(Serialize)]
struct ResolvedDocument<'a> {
    fingerprint: String,
    config: &'a SiteConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check { docs_dir } => {
            let source = config_path(cli.config.as_deref())?;
            println!("==> Checking {}", source.display());
            let site = config::load_config(&source, &cli.overlay)?;

            let previews: Vec<autogen::AutogenPreview> = match &docs_dir {
                Some(dir) => site
                    .integrations
                    .iter()
                    .flat_map(|i| sidebar::autogenerate_directives(&i.options.sidebar))
                    .map(|directive| autogen::preview(dir, directive))
                    .collect(),
                None => Vec::new(),
            };

            output::print_check_output(&site, &source, &previews);
            println!("==> Config is valid: {}", output::format_summary(&site));
        }
        Command::Resolve { out } => {
            let source = config_path(cli.config.as_deref())?;
            let site = config::load_config(&source, &cli.overlay)?;
            let document = ResolvedDocument {
                fingerprint: fingerprint::fingerprint(&site)?,
                config: &site,
            };
            let json = serde_json::to_string_pretty(&document)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("==> Wrote {} ({})", path.display(), document.fingerprint);
                }
                None => println!("{}", json),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Use the `--config` path if given, otherwise discover one in the current directory.
fn config_path(explicit: Option<&Path>) -> Result<PathBuf, config::ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config::find_config(Path::new(".")),
    }
}
