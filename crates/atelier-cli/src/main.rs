//! atelier CLI - studio project tracker with role-based visibility
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ATELIER_*`)
//! 3. Project config (`.atelier/config.toml` in the project root)
//! 4. Global config (`~/.atelier/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `ATELIER_DEBUG`: Enable debug logging (`true`/`false`)
//! - `ATELIER_VERBOSE`: Enable info logging
//! - `ATELIER_ROLE`: Role to act as
//! - `ATELIER_NAME`: Person name for stage participation
//! - `ATELIER_ADMIN`: Admin account mode
//! - `ATELIER_SIMULATE`: Admin is previewing `ATELIER_ROLE`
//! - `ATELIER_SIMULATION`: `keep-admin-override` or `suppress-admin-override`
//! - `ATELIER_SEED`: JSON seed file instead of the sample portfolio

mod render;

use anyhow::{Context, Result};
use atelier_auth::{AccessPolicy, Capability, SimulationPolicy};
use atelier_runtime::config::{AtelierConfig, ConfigLoader, ConfigResolver};
use atelier_runtime::{seed, ProjectFilter, StudioState};
use atelier_types::{ProjectStatus, Role};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// atelier - studio project tracker
#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long = "project", id = "project_root", global = true, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Role to act as (e.g. "Project Manager")
    #[arg(long, global = true)]
    role: Option<String>,

    /// Person name, used for stage participation and task assignment
    #[arg(long, global = true)]
    name: Option<String>,

    /// Act as an admin account
    #[arg(long, global = true)]
    admin: bool,

    /// Admin previews the selected role
    #[arg(long, global = true)]
    simulate: bool,

    /// Whether admin override survives --simulate
    #[arg(long, global = true, value_name = "POLICY", value_parser = parse_simulation)]
    simulation: Option<SimulationPolicy>,

    /// JSON seed file (overrides [paths] seed_file)
    #[arg(long, global = true, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the role permission table
    Matrix,

    /// Show the acting viewer's effective capabilities
    Check {
        /// Capabilities to check (canEdit, upload, financials, ...); all when empty
        capabilities: Vec<String>,
    },

    /// List projects
    Projects {
        /// planning, active, on-hold or completed
        #[arg(long)]
        status: Option<String>,

        /// Substring of name, client or location
        #[arg(long)]
        search: Option<String>,

        /// Only projects where this role is staffed
        #[arg(long, value_name = "ROLE")]
        staffed: Option<String>,
    },

    /// Show one project
    Project {
        /// Project name or id
        project: String,
    },

    /// List the stages of a project visible to the viewer
    Stages {
        /// Project name or id
        project: String,
    },

    /// Tasks assigned to a person or role, in stages the viewer can see
    Tasks {
        /// Person or role (defaults to the viewer's name, then role)
        who: Option<String>,
    },

    /// List invoices
    Invoices,

    /// Portfolio totals
    Summary {
        /// Date used for overdue tasks (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,
    },
}

fn parse_simulation(s: &str) -> Result<SimulationPolicy, String> {
    SimulationPolicy::parse(s)
        .ok_or_else(|| "expected keep-admin-override or suppress-admin-override".to_string())
}

/// CLI-based configuration resolver.
///
/// Applies CLI argument overrides on top of the file/env config as the
/// highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    debug: bool,
    verbose: bool,
    role: Option<String>,
    name: Option<String>,
    admin: bool,
    simulate: bool,
    simulation: Option<SimulationPolicy>,
    seed: Option<PathBuf>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project_root.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to get current directory, using '.'");
                PathBuf::from(".")
            })
        });

        Self {
            project_root,
            debug: args.debug,
            verbose: args.verbose,
            role: args.role.clone(),
            name: args.name.clone(),
            admin: args.admin,
            simulate: args.simulate,
            simulation: args.simulation,
            seed: args.seed.clone(),
        }
    }

    fn resolve(&self) -> Result<AtelierConfig> {
        let mut config = ConfigLoader::new()
            .with_project_root(&self.project_root)
            .load()
            .context("Config error")?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut AtelierConfig) {
        if self.debug {
            config.debug = true;
        }
        if self.verbose {
            config.ui.verbose = true;
        }
        if let Some(ref role) = self.role {
            config.viewer.role = Some(role.clone());
        }
        if let Some(ref name) = self.name {
            config.viewer.name = Some(name.clone());
        }
        if self.admin {
            config.viewer.admin = Some(true);
        }
        if self.simulate {
            config.viewer.simulate = Some(true);
        }
        if let Some(policy) = self.simulation {
            config.access.simulation = policy;
        }
        if let Some(ref seed) = self.seed {
            config.paths.seed_file = Some(seed.clone());
        }
    }
}

fn init_tracing(config: &AtelierConfig) {
    // Terminal filter: debug > verbose > RUST_LOG env > default "warn"
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else if config.ui.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout carries command output, so logs go to stderr
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

fn load_studio(config: &AtelierConfig, project_root: &std::path::Path) -> Result<StudioState> {
    let evaluator = config
        .access
        .evaluator()
        .context("Invalid [access] configuration")?;

    let data = match &config.paths.seed_file {
        Some(path) => {
            let path = project_root.join(path);
            info!(path = %path.display(), "Loading seed file");
            seed::load_json(&path)?
        }
        None => seed::studio(),
    };

    Ok(StudioState::from_seed(data, Arc::new(evaluator)))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver.resolve()?;

    init_tracing(&config);
    info!(path = %resolver.project_root.display(), "Project root");
    debug!(
        simulation = %config.access.simulation,
        overrides = config.access.permissions.len(),
        seed = ?config.paths.seed_file,
        "Resolved config"
    );

    let studio = load_studio(&config, &resolver.project_root)?;
    let viewer = config.viewer.to_viewer();
    info!(viewer = %viewer, simulation = %config.access.simulation, "Acting viewer");

    let out = render::Renderer::new(args.json, &config.ui.redaction_marker);

    match args.command {
        Command::Matrix => {
            let table = config.access.permission_table()?;
            out.matrix(&table)
        }
        Command::Check { capabilities } => {
            let names: Vec<&str> = capabilities.iter().map(String::as_str).collect();
            let (requested, unknown) = Capability::parse_list(&names);
            if let Some(name) = unknown.first() {
                anyhow::bail!("Unknown capability '{name}'");
            }
            let caps: Vec<Capability> = Capability::EACH
                .into_iter()
                .filter(|cap| names.is_empty() || requested.contains(*cap))
                .collect();
            out.check(studio.policy(), &viewer, &caps)
        }
        Command::Projects {
            status,
            search,
            staffed,
        } => {
            let mut filter = ProjectFilter::new();
            if let Some(status) = status {
                let status = ProjectStatus::parse(&status)
                    .with_context(|| format!("Unknown project status '{status}'"))?;
                filter = filter.with_status(status);
            }
            if let Some(search) = search {
                filter = filter.with_search(search);
            }
            if let Some(role) = staffed {
                let role =
                    Role::parse(&role).with_context(|| format!("Unknown role '{role}'"))?;
                filter = filter.with_role(role);
            }
            out.projects(&studio.project_views(&viewer, &filter))
        }
        Command::Project { project } => {
            let id = studio.find_project(&project)?.id;
            out.project(&studio.project_view(&viewer, id)?)
        }
        Command::Stages { project } => {
            let id = studio.find_project(&project)?.id;
            out.stages(&studio.project_view(&viewer, id)?)
        }
        Command::Tasks { who } => {
            let who = who
                .or_else(|| viewer.name().map(str::to_string))
                .unwrap_or_else(|| viewer.role_key().to_string());
            let tasks: Vec<_> = atelier_runtime::tasks_for(studio.projects(), &who)
                .into_iter()
                .filter(|t| studio.policy().can_access_stage(&viewer, t.stage))
                .collect();
            out.tasks(&who, &tasks)
        }
        Command::Invoices => out.invoices(&studio, &viewer),
        Command::Summary { today } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            out.summary(&studio.summary(&viewer, today))
        }
    }
}
