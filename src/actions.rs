//! # High-Level Actions
//!
//! The convenience layer the CLI (and embedders) call: expand and compile a
//! job description into its full job set, locate the description inside a
//! repository checkout, and push a compiled set to a live server.

use crate::compiler::{self, CompiledJob};
use crate::config::CONFIG_FILENAME;
use crate::error::Result;
use crate::git;
use crate::matrix;
use crate::publisher::{JenkinsApi, JobPublisher, PublishResult};
use crate::repository::Repository;
use std::path::Path;

/// Compile every job a description file declares for `repository`.
pub fn jobs_from_file(repository: &Repository, contents: &str) -> Result<Vec<CompiledJob>> {
    let definitions = matrix::expand(contents, repository)?;
    let mut jobs = Vec::with_capacity(definitions.len());
    for definition in &definitions {
        jobs.push(compiler::compile(definition)?);
    }
    log::debug!(
        "compiled {} job(s) for {}@{}",
        jobs.len(),
        repository.url,
        repository.branch
    );
    Ok(jobs)
}

/// Compile the jobs declared by a repository checkout.
///
/// The repository identity comes from the checkout's `origin` remote and
/// current branch. A checkout without a job description file declares zero
/// jobs; that is a valid state, not an error.
pub fn jobs_from_directory(path: &Path) -> Result<(Repository, Vec<CompiledJob>)> {
    let repository = git::repository_from_checkout(path)?;
    let config_path = path.join(CONFIG_FILENAME);
    if !config_path.exists() {
        log::info!("no {} in {}", CONFIG_FILENAME, path.display());
        return Ok((repository, Vec::new()));
    }
    let contents = std::fs::read_to_string(&config_path)?;
    let jobs = jobs_from_file(&repository, &contents)?;
    Ok((repository, jobs))
}

/// Compile a description file's jobs and reconcile them against a server.
pub fn upload_jobs_from_file(
    repository: &Repository,
    contents: &str,
    server: &mut dyn JenkinsApi,
) -> Result<PublishResult> {
    let jobs = jobs_from_file(repository, contents)?;
    JobPublisher::new(repository.clone(), jobs).publish(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENTS: &str = "\
junit_patterns:
- \"junit*.xml\"

build_batch_commands:
- \"command\"

matrix:
    planet:
    - mercury
    - venus
    - jupiter
";

    #[test]
    fn test_jobs_from_file_expands_matrix() {
        let repository = Repository::new("http://space.git", "branch");
        let jobs = jobs_from_file(&repository, CONTENTS).unwrap();
        let names: Vec<&str> = jobs.iter().map(|job| job.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["space-branch-mercury", "space-branch-venus", "space-branch-jupiter"]
        );
    }

    #[test]
    fn test_jobs_from_file_propagates_parse_errors() {
        let repository = Repository::new("http://space.git", "branch");
        assert!(jobs_from_file(&repository, "").is_err());
    }

    /// A server with no jobs at all; every compiled job is a create.
    struct EmptyServer {
        created: Vec<String>,
    }

    impl JenkinsApi for EmptyServer {
        fn list_job_names(&mut self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
        fn job_config(&mut self, name: &str) -> Result<String> {
            Err(crate::error::Error::JobNotFound {
                name: name.to_string(),
            })
        }
        fn create_job(&mut self, name: &str, _xml: &str) -> Result<()> {
            self.created.push(name.to_string());
            Ok(())
        }
        fn reconfigure_job(&mut self, _name: &str, _xml: &str) -> Result<()> {
            Ok(())
        }
        fn delete_job(&mut self, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_upload_jobs_from_file_creates_everything_on_an_empty_server() {
        let repository = Repository::new("http://space.git", "branch");
        let mut server = EmptyServer { created: Vec::new() };

        let result = upload_jobs_from_file(&repository, CONTENTS, &mut server).unwrap();
        assert_eq!(result.new_jobs.len(), 3);
        assert!(result.updated_jobs.is_empty());
        assert!(result.deleted_jobs.is_empty());
        assert_eq!(server.created.len(), 3);
        assert!(server.created.contains(&"space-branch-venus".to_string()));
    }
}
