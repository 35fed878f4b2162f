//! Integration tests for the reconciling publisher, against an in-memory mock
//! of the server API: ownership inference over both SCM document shapes, the
//! create/update/delete diff, and the bounded retry around transient
//! transport failures.

use jobforge::compiler::CompiledJob;
use jobforge::error::Error;
use jobforge::publisher::{JenkinsApi, JobPublisher, PublishResult};
use jobforge::repository::Repository;
use std::collections::BTreeMap;
use std::time::Duration;

const REPO_URL: &str = "http://server/space.git";

/// A single-SCM configuration owned by the space repository. The URL is
/// deliberately wrapped in whitespace: real servers pretty-print their
/// documents and ownership matching must trim.
const MERCURY_CONFIG: &str = r#"
<project>
  <scm>
    <userRemoteConfigs>
      <hudson.plugins.git.UserRemoteConfig>
        <url>
          http://server/space.git
        </url>
      </hudson.plugins.git.UserRemoteConfig>
    </userRemoteConfigs>
    <branches>
      <hudson.plugins.git.BranchSpec>
        <name>milky_way</name>
      </hudson.plugins.git.BranchSpec>
    </branches>
  </scm>
</project>
"#;

/// A multi-SCM configuration that references the space repository among
/// others; any one matching entry makes the job owned.
const SATURN_CONFIG: &str = r#"
<project>
  <scm>
    <scms>
      <hudson.plugins.git.GitSCM>
        <userRemoteConfigs>
          <hudson.plugins.git.UserRemoteConfig>
            <url>
              http://server/space.git
            </url>
          </hudson.plugins.git.UserRemoteConfig>
        </userRemoteConfigs>
        <branches>
          <hudson.plugins.git.BranchSpec>
            <name>milky_way</name>
          </hudson.plugins.git.BranchSpec>
        </branches>
      </hudson.plugins.git.GitSCM>
      <hudson.plugins.git.GitSCM>
        <userRemoteConfigs>
          <hudson.plugins.git.UserRemoteConfig>
            <url>
              http://server/space_dependency.git
            </url>
          </hudson.plugins.git.UserRemoteConfig>
        </userRemoteConfigs>
        <branches>
          <hudson.plugins.git.BranchSpec>
            <name>other_branch</name>
          </hudson.plugins.git.BranchSpec>
        </branches>
      </hudson.plugins.git.GitSCM>
    </scms>
  </scm>
</project>
"#;

const FOREIGN_CONFIG: &str = r#"
<project>
  <scm>
    <userRemoteConfigs>
      <hudson.plugins.git.UserRemoteConfig>
        <url>http://server/elsewhere.git</url>
      </hudson.plugins.git.UserRemoteConfig>
    </userRemoteConfigs>
  </scm>
</project>
"#;

#[derive(Default)]
struct MockJenkins {
    configs: BTreeMap<String, String>,
    created: Vec<String>,
    updated: Vec<String>,
    deleted: Vec<String>,
    /// Number of times delete_job should fail with the given status before
    /// succeeding.
    delete_failures: u32,
    delete_failure_status: u16,
    delete_calls: u32,
}

impl MockJenkins {
    fn with_remote_jobs() -> Self {
        let mut mock = MockJenkins::default();
        mock.configs
            .insert("space-milky_way-mercury".to_string(), MERCURY_CONFIG.to_string());
        mock.configs
            .insert("space-milky_way-saturn".to_string(), SATURN_CONFIG.to_string());
        mock.configs
            .insert("elsewhere-main".to_string(), FOREIGN_CONFIG.to_string());
        mock
    }

    fn failing_deletes(failures: u32, status: u16) -> Self {
        let mut mock = Self::with_remote_jobs();
        mock.delete_failures = failures;
        mock.delete_failure_status = status;
        mock
    }
}

impl JenkinsApi for MockJenkins {
    fn list_job_names(&mut self) -> jobforge::error::Result<Vec<String>> {
        Ok(self.configs.keys().cloned().collect())
    }

    fn job_config(&mut self, name: &str) -> jobforge::error::Result<String> {
        self.configs
            .get(name)
            .cloned()
            .ok_or_else(|| Error::JobNotFound {
                name: name.to_string(),
            })
    }

    fn create_job(&mut self, name: &str, _xml: &str) -> jobforge::error::Result<()> {
        self.created.push(name.to_string());
        Ok(())
    }

    fn reconfigure_job(&mut self, name: &str, _xml: &str) -> jobforge::error::Result<()> {
        self.updated.push(name.to_string());
        Ok(())
    }

    fn delete_job(&mut self, name: &str) -> jobforge::error::Result<()> {
        self.delete_calls += 1;
        if self.delete_failures > 0 {
            self.delete_failures -= 1;
            return Err(Error::Transport {
                status: self.delete_failure_status,
                message: "intermediary rejected the request".to_string(),
            });
        }
        self.deleted.push(name.to_string());
        Ok(())
    }
}

fn job(name: &str, xml: &str) -> CompiledJob {
    CompiledJob {
        name: name.to_string(),
        xml: xml.to_string(),
        repository: Repository::new(REPO_URL, "milky_way"),
    }
}

fn publisher() -> JobPublisher {
    JobPublisher::new(
        Repository::new(REPO_URL, "milky_way"),
        vec![
            job("space-milky_way-jupiter", "jupiter"),
            job("space-milky_way-mercury", "mercury"),
            job("space-milky_way-venus", "venus"),
        ],
    )
    .with_retry_policy(3, Duration::ZERO)
}

#[test]
fn publish_applies_the_minimal_diff() {
    let mut server = MockJenkins::with_remote_jobs();
    let result = publisher().publish(&mut server).unwrap();

    assert_eq!(
        result,
        PublishResult {
            new_jobs: vec![
                "space-milky_way-jupiter".to_string(),
                "space-milky_way-venus".to_string(),
            ],
            updated_jobs: vec!["space-milky_way-mercury".to_string()],
            deleted_jobs: vec!["space-milky_way-saturn".to_string()],
        }
    );

    assert_eq!(server.created, result.new_jobs);
    assert_eq!(server.updated, result.updated_jobs);
    assert_eq!(server.deleted, result.deleted_jobs);
}

#[test]
fn foreign_jobs_are_never_touched() {
    let mut server = MockJenkins::with_remote_jobs();
    let result = publisher().publish(&mut server).unwrap();

    let all: Vec<&String> = result
        .new_jobs
        .iter()
        .chain(&result.updated_jobs)
        .chain(&result.deleted_jobs)
        .collect();
    assert!(!all.iter().any(|name| name.as_str() == "elsewhere-main"));
    assert!(!server.deleted.iter().any(|name| name == "elsewhere-main"));
}

#[test]
fn diff_sets_partition_local_and_owned() {
    let mut server = MockJenkins::with_remote_jobs();
    let result = publisher().publish(&mut server).unwrap();

    for name in &result.new_jobs {
        assert!(!result.updated_jobs.contains(name));
        assert!(!result.deleted_jobs.contains(name));
    }
    for name in &result.updated_jobs {
        assert!(!result.deleted_jobs.contains(name));
    }
}

#[test]
fn empty_local_set_deletes_every_owned_job() {
    let mut server = MockJenkins::with_remote_jobs();
    let publisher = JobPublisher::new(Repository::new(REPO_URL, "milky_way"), Vec::new())
        .with_retry_policy(3, Duration::ZERO);
    let result = publisher.publish(&mut server).unwrap();

    assert!(result.new_jobs.is_empty());
    assert!(result.updated_jobs.is_empty());
    assert_eq!(
        result.deleted_jobs,
        vec![
            "space-milky_way-mercury".to_string(),
            "space-milky_way-saturn".to_string(),
        ]
    );
}

#[test]
fn unparsable_remote_config_is_not_owned() {
    let mut server = MockJenkins::with_remote_jobs();
    server
        .configs
        .insert("space-milky_way-ruins".to_string(), "<not-even".to_string());

    let result = publisher().publish(&mut server).unwrap();
    assert!(!result.deleted_jobs.contains(&"space-milky_way-ruins".to_string()));
}

#[test]
fn transient_proxy_error_is_retried_and_recovers() {
    let mut server = MockJenkins::failing_deletes(1, 403);
    let result = publisher().publish(&mut server).unwrap();

    assert_eq!(result.deleted_jobs, vec!["space-milky_way-saturn".to_string()]);
    // exactly one retry consumed: the failed attempt plus the success
    assert_eq!(server.delete_calls, 2);
}

#[test]
fn transient_errors_beyond_the_bound_abort_the_reconciliation() {
    let mut server = MockJenkins::failing_deletes(5, 403);
    let error = publisher().publish(&mut server).unwrap_err();

    match error {
        Error::Transport { status, .. } => assert_eq!(status, 403),
        other => panic!("expected a transport error, got {:?}", other),
    }
    // the bound is total attempts on the same call
    assert_eq!(server.delete_calls, 3);
    // deletes run first and the failure aborts everything after it
    assert!(server.created.is_empty());
    assert!(server.updated.is_empty());
}

#[test]
fn non_transient_statuses_are_not_retried() {
    let mut server = MockJenkins::failing_deletes(1, 500);
    let error = publisher().publish(&mut server).unwrap_err();

    match error {
        Error::Transport { status, .. } => assert_eq!(status, 500),
        other => panic!("expected a transport error, got {:?}", other),
    }
    assert_eq!(server.delete_calls, 1);
}

#[test]
fn rerunning_after_a_partial_publish_converges() {
    // first run dies in the delete phase
    let mut server = MockJenkins::failing_deletes(5, 403);
    assert!(publisher().publish(&mut server).is_err());

    // the failed delete never mutated server state, so a clean re-run
    // recomputes the same diff and applies it fully
    server.delete_failures = 0;
    let result = publisher().publish(&mut server).unwrap();
    assert_eq!(result.deleted_jobs, vec!["space-milky_way-saturn".to_string()]);
    assert_eq!(result.new_jobs.len(), 2);
}

#[test]
fn publish_to_directory_writes_one_file_per_job() {
    let temp = tempfile::TempDir::new().unwrap();
    publisher().publish_to_directory(temp.path()).unwrap();

    let mut names: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "space-milky_way-jupiter",
            "space-milky_way-mercury",
            "space-milky_way-venus",
        ]
    );
    assert_eq!(
        std::fs::read_to_string(temp.path().join("space-milky_way-jupiter")).unwrap(),
        "jupiter"
    );
}
