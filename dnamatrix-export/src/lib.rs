//! # DNA Matrix export
//!
//! Turns a DNA Matrix project into deployable artifacts.
//!
//! ## Features
//! - Single-file production site with an inlined React runtime
//! - Vite/React source-project archive carrying the project data
//! - Static preview built from the live renderer
//! - JSON export through the same guarded session
//! - YAML configuration for titles, CDN URLs and output names
//!
//! ## Example
//! ```ignore
//! use dnamatrix_export::{ExportConfig, ExportKind, ExportSession};
//!
//! let state = dnamatrix_blocks::parse_project(&json).expect("invalid project");
//! let session = ExportSession::new();
//! let site = session
//!     .export(ExportKind::Site, &state, &ExportConfig::default())
//!     .expect("export failed");
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod preview;
pub mod session;
pub mod site;
pub mod styles;

pub use archive::export_archive;
pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use preview::export_preview;
pub use session::{read_project, write_artifact, Artifact, ExportKind, ExportSession};
pub use site::{export_site, plan_site, PlannedBlock, SiteExport, SitePlan};
