//! halolife Launcher and Verification Harness
//!
//! This crate plays the part of the process launcher: it spawns one task
//! per rank, each with its own communicator, and collects the root's
//! result.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        LifeWorld                          │
//! │   ┌──────────┐   halo    ┌──────────┐   halo    ┌──────┐  │
//! │   │ rank 0   │◄─────────►│ rank 1   │◄─────────►│ ...  │  │
//! │   │ (root)   │           │          │           │      │  │
//! │   └────┬─────┘           └────┬─────┘           └──┬───┘  │
//! │        │◄──── reduce / gather ┴────────────────────┘      │
//! │        ▼                                                  │
//! │   Grid ──► BoardExporter ──► final_board_N_procs_P_gen_G  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use halolife_sim::{SimConfig, run_job};
//!
//! let config = SimConfig::new(100, 100).with_procs(4);
//! let report = run_job(&config, "out".as_ref(), false).await?;
//! ```

pub mod config;
pub mod exporter;
pub mod oracle;
pub mod runner;
pub mod world;

pub use config::{ConfigError, SimConfig};
pub use exporter::{BoardExporter, ExportError, JobReport};
pub use oracle::SequentialLife;
pub use runner::{run_job, run_job_from, JobError};
pub use world::{InitialBoard, LifeWorld, WorldError, WorldOutcome};
