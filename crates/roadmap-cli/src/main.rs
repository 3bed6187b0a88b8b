mod config;
mod convert_cmds;
mod roadmap_file;
mod validate_cmd;

#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand};

use roadmap_core::QuarterName;

use config::RoadmapConfig;

#[derive(Parser)]
#[command(name = "roadmap", about = "Academic roadmap prerequisite checker")]
struct Cli {
    /// Course catalog JSON file (overrides ROADMAP_CATALOG env var)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a roadmap config file
    Init {
        /// Name for the plan of a legacy single-plan roadmap
        #[arg(long)]
        default_plan_name: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// List quarter names in academic order
    Quarters,
    /// Check every planned course's prerequisites against its position
    Validate {
        /// Saved roadmap JSON file
        file: String,
        /// Only validate the plan with this name
        #[arg(long)]
        plan: Option<String>,
        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Expand a saved roadmap into plans with full course data
    Expand {
        /// Saved roadmap JSON file
        file: String,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Collapse expanded plans back into a saved roadmap
    Collapse {
        /// Expanded plans JSON file (as written by `roadmap expand`)
        file: String,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
}

/// Execute the `roadmap init` command: write config file.
fn cmd_init(
    catalog: Option<&str>,
    default_plan_name: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        catalog: config::CatalogSection {
            path: catalog.map(str::to_string),
        },
        roadmap: config::RoadmapSection {
            default_plan_name: default_plan_name.map(str::to_string),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    if let Some(catalog) = catalog {
        println!("  catalog.path = {catalog}");
    } else {
        println!();
        println!("No catalog set; pass --catalog or set ROADMAP_CATALOG when validating.");
    }
    if let Some(name) = default_plan_name {
        println!("  roadmap.default_plan_name = {name}");
    }

    Ok(())
}

/// Execute the `roadmap quarters` command.
fn cmd_quarters() {
    for quarter in QuarterName::ALL {
        println!("{:<12}{}", quarter.id(), quarter.display_name());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            default_plan_name,
            force,
        } => {
            cmd_init(cli.catalog.as_deref(), default_plan_name.as_deref(), force)?;
        }
        Commands::Quarters => cmd_quarters(),
        Commands::Validate { file, plan, json } => {
            let resolved = RoadmapConfig::resolve(cli.catalog.as_deref())?;
            let all_valid =
                validate_cmd::run_validate(&resolved, &file, plan.as_deref(), json).await?;
            if !all_valid {
                std::process::exit(2);
            }
        }
        Commands::Expand { file, output } => {
            let resolved = RoadmapConfig::resolve(cli.catalog.as_deref())?;
            convert_cmds::run_expand(&resolved, &file, output.as_deref()).await?;
        }
        Commands::Collapse { file, output } => {
            convert_cmds::run_collapse(&file, output.as_deref())?;
        }
    }

    Ok(())
}
