//! # jobforge
//!
//! This library provides the core functionality for compiling declarative CI
//! job descriptions into Jenkins job documents and keeping a server's job set
//! synchronized with them. It is designed to be used by the `jobforge`
//! command-line tool but can also be integrated into other applications that
//! provision jobs programmatically.
//!
//! ## Quick Example
//!
//! ```
//! use jobforge::actions;
//! use jobforge::repository::Repository;
//!
//! let repository = Repository::new("http://server/space.git", "main");
//! let description = r#"
//! build_shell_commands:
//! - make test
//!
//! matrix:
//!   planet:
//!   - earth
//!   - mars
//! "#;
//!
//! let jobs = actions::jobs_from_file(&repository, description).unwrap();
//! assert_eq!(jobs.len(), 2);
//! assert_eq!(jobs[0].name, "space-main-earth");
//! ```
//!
//! ## Core Concepts
//!
//! - **Job description (`config`)**: the raw `.jobforge.yaml` document: base
//!   options, axis-conditional options, and the `matrix` block, all in
//!   declaration order.
//! - **Matrix expansion (`matrix`)**: the cross-product of the declared axes,
//!   yielding one [`matrix::JobDefinition`] per cell; single-value axes merge
//!   and substitute but never reach job names.
//! - **Compilation (`compiler`)**: a fixed baseline document plus a static
//!   registry of option handlers, applied in a fixed group order (test-report
//!   publishers always serialize before notification publishers).
//! - **Publishing (`publisher`, `jenkins`)**: ownership inference over the
//!   remote SCM sections, a minimal create/update/delete diff, and bounded
//!   retry around the transient transport failures.
//! - **Repository identity (`repository`, `git`)**: the clone URL + branch a
//!   job set is tied to, discovered from a checkout when not given.
//!
//! ## Execution Flow
//!
//! 1. **Expand**: parse the description and expand the matrix into job
//!    definitions.
//! 2. **Compile**: run each definition through the handler registry to
//!    produce named job documents.
//! 3. **Publish**: list the server's jobs, infer which ones this repository
//!    owns, and apply the delete/create/update diff.

pub mod actions;
pub mod compiler;
pub mod config;
pub mod error;
pub mod git;
pub mod jenkins;
pub mod markup;
pub mod matrix;
pub mod publisher;
pub mod repository;
