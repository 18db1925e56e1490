//! atelier runtime.
//!
//! Everything between the access rules in `atelier-auth` and the
//! `atelier` binary:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  config/   : layered AtelierConfig (defaults → global →  │
//! │              project → env → CLI resolver)               │
//! ├──────────────────────────────────────────────────────────┤
//! │  seed      : built-in sample portfolio, JSON seed files  │
//! ├──────────────────────────────────────────────────────────┤
//! │  studio/   : StudioState (gated mutations), ProjectView  │
//! ├──────────────────────────────────────────────────────────┤
//! │  progress  : percent complete, filters, PortfolioSummary │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use atelier_runtime::{seed, ProjectFilter, StudioState};
//! use atelier_runtime::config::AtelierConfig;
//! use atelier_auth::Visibility;
//! use std::sync::Arc;
//!
//! let config = AtelierConfig::default();
//! let evaluator = config.access.evaluator().expect("default table");
//! let studio = StudioState::from_seed(seed::studio(), Arc::new(evaluator));
//!
//! // the default viewer is a client: every stage, no money
//! let viewer = config.viewer.to_viewer();
//! let views = studio.project_views(&viewer, &ProjectFilter::new());
//! assert_eq!(views.len(), 3);
//! assert!(views.iter().all(|v| v.budget == Visibility::Redacted));
//! ```

pub mod config;
pub mod progress;
pub mod seed;
pub mod studio;

pub use config::{AtelierConfig, ConfigError, ConfigLoader, ConfigResolver, NoOpResolver};
pub use progress::{
    completion, current_of, current_stage, percent_complete, stage_progress, tasks_for,
    AssignedTask, PortfolioSummary, ProjectFilter,
};
pub use seed::{SeedData, SeedError};
pub use studio::{ProjectView, StageView, StateError, StudioState};
