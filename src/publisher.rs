//! # Reconciling Publisher
//!
//! Synchronizes a server's live job set with the jobs compiled from one
//! repository's job description: create what is missing, update what exists,
//! delete what the repository no longer declares, and touch nothing owned by
//! other repositories.
//!
//! ## Design
//!
//! The publisher talks to the server through the [`JenkinsApi`] trait, so
//! tests substitute a mock implementation and never open a socket, in the
//! same way the git and markup surfaces are kept behind their own seams.
//!
//! Ownership is inferred, not recorded: every remote job's configuration is
//! fetched and its SCM section inspected. A job belongs to the repository iff
//! at least one SCM entry's remote URL equals the repository's URL, whether
//! the job uses the plain single-SCM shape or the multiple-SCMs composite. A
//! configuration that does not parse as an SCM shape means "not ours"; a
//! foreign job type must never be deleted because we failed to read it.
//!
//! Individual create/update/delete calls are retried on the transient proxy
//! status (403 by this server's convention) with a fixed sleep, up to a
//! bounded number of attempts. Anything else aborts the reconciliation;
//! whatever was already applied stays applied, and re-running is safe because
//! the diff is recomputed from live state every time.

use crate::compiler::CompiledJob;
use crate::error::{Error, Result};
use crate::markup::Document;
use crate::repository::Repository;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Duration;

/// The remote job-execution server, as the publisher sees it.
///
/// Every mutating call may fail with [`Error::Transport`] carrying the HTTP
/// status code the server answered with.
pub trait JenkinsApi {
    /// Names of every job the server knows.
    fn list_job_names(&mut self) -> Result<Vec<String>>;

    /// A job's raw configuration document.
    fn job_config(&mut self, name: &str) -> Result<String>;

    /// Create a job that does not exist yet.
    fn create_job(&mut self, name: &str, xml: &str) -> Result<()>;

    /// Replace the configuration of an existing job.
    fn reconfigure_job(&mut self, name: &str, xml: &str) -> Result<()>;

    /// Delete an existing job.
    fn delete_job(&mut self, name: &str) -> Result<()>;
}

/// Whether a transport status is the transient, intermediary-level class
/// worth retrying (a proxy rejecting the request rather than the server
/// refusing it).
pub fn is_transient_status(status: u16) -> bool {
    status == 403
}

/// One `(url, branch)` reference extracted from a remote job's SCM section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmRef {
    pub url: String,
    pub branch: String,
}

/// Extract every SCM reference from a remote job configuration, normalizing
/// the single-SCM and multiple-SCMs shapes into one flat list.
///
/// Anything unparsable yields an empty list, which downstream means the job
/// is not owned by anyone we know.
pub fn scm_references(xml: &str) -> Vec<ScmRef> {
    let Ok(doc) = Document::parse(xml) else {
        return Vec::new();
    };
    let Some(scm) = doc.find_child(doc.root(), "scm") else {
        return Vec::new();
    };

    let entries = match doc.find_child(scm, "scms") {
        Some(scms) => doc.child_elements(scms),
        None => vec![scm],
    };

    let mut references = Vec::new();
    for entry in entries {
        let branch = doc
            .descendants_named(entry, "branches")
            .first()
            .and_then(|branches| doc.descendants_named(*branches, "name").first().copied())
            .map(|name| doc.text_of(name).trim().to_string())
            .unwrap_or_default();
        for remotes in doc.descendants_named(entry, "userRemoteConfigs") {
            for url in doc.descendants_named(remotes, "url") {
                references.push(ScmRef {
                    url: doc.text_of(url).trim().to_string(),
                    branch: branch.clone(),
                });
            }
        }
    }
    references
}

/// The outcome of one publish call: the job names attempted in each class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishResult {
    pub new_jobs: Vec<String>,
    pub updated_jobs: Vec<String>,
    pub deleted_jobs: Vec<String>,
}

/// Publishes one repository's compiled jobs to a server or a directory.
pub struct JobPublisher {
    repository: Repository,
    jobs: Vec<CompiledJob>,
    retries: u32,
    retry_sleep: Duration,
}

impl JobPublisher {
    /// Total attempts allowed per remote call.
    pub const RETRIES: u32 = 3;
    /// Fixed sleep between attempts of the same call.
    pub const RETRY_SLEEP: Duration = Duration::from_secs(10);

    pub fn new(repository: Repository, jobs: Vec<CompiledJob>) -> Self {
        JobPublisher {
            repository,
            jobs,
            retries: Self::RETRIES,
            retry_sleep: Self::RETRY_SLEEP,
        }
    }

    /// Override the retry bound and sleep; tests use a zero-delay policy.
    pub fn with_retry_policy(mut self, retries: u32, retry_sleep: Duration) -> Self {
        self.retries = retries;
        self.retry_sleep = retry_sleep;
        self
    }

    /// Reconcile the server's job set with the compiled set.
    ///
    /// Deletes run first so a freed name cannot collide with a later create;
    /// the three sets are disjoint by construction, so the ordering is
    /// operational hygiene rather than a correctness requirement.
    pub fn publish(&self, server: &mut dyn JenkinsApi) -> Result<PublishResult> {
        let local: BTreeMap<&str, &CompiledJob> = self
            .jobs
            .iter()
            .map(|job| (job.name.as_str(), job))
            .collect();

        let owned = self.owned_remote_jobs(server)?;

        let deleted_jobs: Vec<String> = owned
            .iter()
            .filter(|name| !local.contains_key(name.as_str()))
            .cloned()
            .collect();
        let new_jobs: Vec<String> = local
            .keys()
            .filter(|name| !owned.contains(**name))
            .map(|name| name.to_string())
            .collect();
        let updated_jobs: Vec<String> = local
            .keys()
            .filter(|name| owned.contains(**name))
            .map(|name| name.to_string())
            .collect();

        for name in &deleted_jobs {
            self.retrying(&format!("delete {}", name), || server.delete_job(name))?;
        }
        for name in &new_jobs {
            let job = local[name.as_str()];
            self.retrying(&format!("create {}", name), || {
                server.create_job(name, &job.xml)
            })?;
        }
        for name in &updated_jobs {
            let job = local[name.as_str()];
            self.retrying(&format!("update {}", name), || {
                server.reconfigure_job(name, &job.xml)
            })?;
        }

        log::info!(
            "reconciled {}: {} new, {} updated, {} deleted",
            self.repository.url,
            new_jobs.len(),
            updated_jobs.len(),
            deleted_jobs.len()
        );
        Ok(PublishResult {
            new_jobs,
            updated_jobs,
            deleted_jobs,
        })
    }

    /// Write each compiled job's document to `dir/{job name}`.
    pub fn publish_to_directory(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        for job in &self.jobs {
            std::fs::write(dir.join(&job.name), &job.xml)?;
        }
        Ok(())
    }

    /// Names of every remote job owned by this publisher's repository.
    fn owned_remote_jobs(&self, server: &mut dyn JenkinsApi) -> Result<BTreeSet<String>> {
        let mut owned = BTreeSet::new();
        for name in server.list_job_names()? {
            let config = match server.job_config(&name) {
                Ok(config) => config,
                // Listed but gone by the time we fetch it: somebody else's
                // problem, not part of our diff.
                Err(Error::JobNotFound { .. }) => continue,
                Err(error) => return Err(error),
            };
            let references = scm_references(&config);
            let matched = references
                .iter()
                .any(|reference| reference.url == self.repository.url);
            if matched {
                log::debug!(
                    "{} is owned by {} ({:?})",
                    name,
                    self.repository.url,
                    references
                );
                owned.insert(name);
            }
        }
        Ok(owned)
    }

    /// Run one remote call, retrying the transient status class with a fixed
    /// sleep until the attempt bound is hit.
    fn retrying<F>(&self, description: &str, mut call: F) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        let mut attempt = 1;
        loop {
            match call() {
                Err(Error::Transport { status, message })
                    if is_transient_status(status) && attempt < self.retries =>
                {
                    log::warn!(
                        "transient server error {} on {} (attempt {}/{}): {}",
                        status,
                        description,
                        attempt,
                        self.retries,
                        message
                    );
                    std::thread::sleep(self.retry_sleep);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
