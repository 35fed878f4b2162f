//! # Job Compiler
//!
//! Turns one [`JobDefinition`] into a [`CompiledJob`]: a job name plus a
//! serialized Jenkins `config.xml` document.
//!
//! The compiler starts from a fixed baseline document (disabled concurrent
//! build, 7-day log rotation, the job assigned to a node named after the
//! repository) and then dispatches every recognized option to its registered
//! handler. Handlers are grouped, and the groups run in one fixed global
//! sequence regardless of the order options appear in the source file; within
//! a group, options apply in their declared order.
//!
//! The group sequence is a correctness requirement, not cosmetics: Jenkins
//! evaluates publishers in document order, and a notification publisher must
//! only fire after the test-report publisher has finalized the build result.
//! Serializing a notifier first would report a failing test run as a success.
//!
//! The handler registry is a process-wide static table: configuration data,
//! not mutable state. An option key with no registered handler is skipped, so
//! older deployments tolerate newer configuration files.

mod handlers;

use crate::error::Result;
use crate::markup::{Document, Node};
use crate::matrix::JobDefinition;
use crate::repository::Repository;
use serde_yaml::Value;

/// Description planted in every generated job so humans browsing the server
/// know not to edit it by hand.
const MANAGED_DESCRIPTION: &str = "<!-- Managed by jobforge -->";

/// The ordering groups option handlers are assigned to.
///
/// Groups run in the order they are declared here (see [`GROUP_ORDER`]);
/// handler effects are order-independent within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerGroup {
    /// Node assignment, display name, workspace and token tweaks.
    Early,
    /// Source-control configuration (primary git plus additional repositories).
    Scm,
    /// Build steps, in declared order.
    Build,
    /// Test-report publishers and their workspace-cleanup wrapper.
    TestPublish,
    /// Notification publishers; must serialize after the test publishers.
    NotifyPublish,
    /// Triggers and miscellaneous properties.
    Late,
}

/// The fixed global sequence the groups are applied in.
pub const GROUP_ORDER: [HandlerGroup; 6] = [
    HandlerGroup::Early,
    HandlerGroup::Scm,
    HandlerGroup::Build,
    HandlerGroup::TestPublish,
    HandlerGroup::NotifyPublish,
    HandlerGroup::Late,
];

/// A registered option handler.
pub struct OptionHandler {
    /// The top-level option key this handler consumes.
    pub key: &'static str,
    /// The ordering group the handler belongs to.
    pub group: HandlerGroup,
    /// Applies the option's value to the compilation in progress.
    pub apply: fn(&mut Compilation<'_>, &Value) -> Result<()>,
}

/// The static handler registry. Built once, never mutated.
pub static HANDLERS: &[OptionHandler] = &[
    OptionHandler { key: "display_name", group: HandlerGroup::Early, apply: handlers::display_name },
    OptionHandler { key: "label_expression", group: HandlerGroup::Early, apply: handlers::label_expression },
    OptionHandler { key: "custom_workspace", group: HandlerGroup::Early, apply: handlers::custom_workspace },
    OptionHandler { key: "auth_token", group: HandlerGroup::Early, apply: handlers::auth_token },
    OptionHandler { key: "git", group: HandlerGroup::Scm, apply: handlers::git },
    OptionHandler { key: "additional_repositories", group: HandlerGroup::Scm, apply: handlers::additional_repositories },
    OptionHandler { key: "build_batch_commands", group: HandlerGroup::Build, apply: handlers::build_batch_commands },
    OptionHandler { key: "build_shell_commands", group: HandlerGroup::Build, apply: handlers::build_shell_commands },
    OptionHandler { key: "build_python_commands", group: HandlerGroup::Build, apply: handlers::build_python_commands },
    OptionHandler { key: "junit_patterns", group: HandlerGroup::TestPublish, apply: handlers::junit_patterns },
    OptionHandler { key: "boosttest_patterns", group: HandlerGroup::TestPublish, apply: handlers::boosttest_patterns },
    OptionHandler { key: "jsunit_patterns", group: HandlerGroup::TestPublish, apply: handlers::jsunit_patterns },
    OptionHandler { key: "description_regex", group: HandlerGroup::NotifyPublish, apply: handlers::description_regex },
    OptionHandler { key: "email_notification", group: HandlerGroup::NotifyPublish, apply: handlers::email_notification },
    OptionHandler { key: "notify_stash", group: HandlerGroup::NotifyPublish, apply: handlers::notify_stash },
    OptionHandler { key: "notification", group: HandlerGroup::NotifyPublish, apply: handlers::notification },
    OptionHandler { key: "slack", group: HandlerGroup::NotifyPublish, apply: handlers::slack },
    OptionHandler { key: "parameters", group: HandlerGroup::Late, apply: handlers::parameters },
    OptionHandler { key: "cron", group: HandlerGroup::Late, apply: handlers::cron },
    OptionHandler { key: "scm_poll", group: HandlerGroup::Late, apply: handlers::scm_poll },
    OptionHandler { key: "timeout", group: HandlerGroup::Late, apply: handlers::timeout },
    OptionHandler { key: "timeout_no_activity", group: HandlerGroup::Late, apply: handlers::timeout_no_activity },
];

/// Whether a top-level key means anything to the compiler.
///
/// Used by the matrix expander to reject documents that contain nothing it
/// could ever turn into a job.
pub fn is_recognized_option(key: &str) -> bool {
    key == "matrix" || HANDLERS.iter().any(|handler| handler.key == key)
}

/// One fully compiled job: its computed name, serialized document, and the
/// repository that owns it.
#[derive(Debug, Clone)]
pub struct CompiledJob {
    pub name: String,
    pub xml: String,
    pub repository: Repository,
}

/// One git source feeding a job's SCM section.
#[derive(Debug, Clone)]
pub struct ScmSpec {
    pub url: String,
    pub branch: String,
    pub target_dir: String,
    pub recursive_submodules: bool,
    pub reference: Option<String>,
    pub clone_timeout: Option<String>,
}

/// Patterns collected for one test-report type, feeding the shared
/// test-report aggregator.
#[derive(Debug, Clone)]
pub struct TestReport {
    pub type_element: &'static str,
    pub patterns: Vec<String>,
}

/// Working state threaded through the handlers while one job compiles.
pub struct Compilation<'a> {
    pub doc: Document,
    pub definition: &'a JobDefinition,
    pub repo_name: String,
    /// The `<assignedNode>` element; `label_expression` rewrites it in place.
    pub assigned_node: Node,
    /// SCM sources in declaration order; materialized after the Scm group.
    pub scm_sources: Vec<ScmSpec>,
    /// Whether an explicit `git:` option supplied the primary source.
    pub saw_primary_git: bool,
    /// Test reports in declaration order; materialized after the TestPublish
    /// group into one shared aggregator.
    pub test_reports: Vec<TestReport>,
}

impl<'a> Compilation<'a> {
    /// Build the fixed baseline document for a definition.
    fn baseline(definition: &'a JobDefinition, repo_name: String) -> Result<Self> {
        let mut doc = Document::new("project")?;
        let root = doc.root();

        doc.add_text_element(root, "description", MANAGED_DESCRIPTION)?;
        doc.add_text_element(root, "keepDependencies", "false")?;

        let log_rotator = doc.add_element(root, "logRotator")?;
        doc.add_text_element(log_rotator, "daysToKeep", "7")?;
        doc.add_text_element(log_rotator, "numToKeep", "-1")?;
        doc.add_text_element(log_rotator, "artifactDaysToKeep", "-1")?;
        doc.add_text_element(log_rotator, "artifactNumToKeep", "-1")?;

        doc.add_text_element(root, "blockBuildWhenDownstreamBuilding", "false")?;
        doc.add_text_element(root, "blockBuildWhenUpstreamBuilding", "false")?;
        doc.add_text_element(root, "concurrentBuild", "false")?;
        doc.add_text_element(root, "canRoam", "false")?;

        let assigned_node = doc.add_text_element(
            root,
            "assignedNode",
            &dashed(&repo_name, definition.matrix_row.iter().map(|(_, v)| v.as_str())),
        )?;

        Ok(Compilation {
            doc,
            definition,
            repo_name,
            assigned_node,
            scm_sources: Vec::new(),
            saw_primary_git: false,
            test_reports: Vec::new(),
        })
    }
}

/// Compile one job definition into a named, serialized job document.
///
/// Pure function of the definition, the baseline and the handler registry:
/// no network or disk I/O happens here.
pub fn compile(definition: &JobDefinition) -> Result<CompiledJob> {
    let repo_name = definition.repository.name()?;
    let mut compilation = Compilation::baseline(definition, repo_name)?;

    for group in GROUP_ORDER {
        for (key, value) in &definition.options {
            match HANDLERS.iter().find(|handler| handler.key == key) {
                Some(handler) if handler.group == group => {
                    (handler.apply)(&mut compilation, value)?;
                }
                Some(_) => {}
                None => {
                    // Unregistered keys are forward compatibility: skip them.
                    if group == HandlerGroup::Early {
                        log::debug!("ignoring unrecognized option '{}'", key);
                    }
                }
            }
        }
        match group {
            HandlerGroup::Scm => handlers::assemble_scm(&mut compilation)?,
            HandlerGroup::TestPublish => handlers::assemble_test_reports(&mut compilation)?,
            _ => {}
        }
    }

    let name = job_name(definition, &compilation.repo_name);
    let xml = compilation.doc.to_pretty_xml()?;
    Ok(CompiledJob {
        name,
        xml,
        repository: definition.repository.clone(),
    })
}

/// The job's name: `{repo}-{branch}` plus one `-{value}` per retained matrix
/// axis, in matrix declaration order.
pub fn job_name(definition: &JobDefinition, repo_name: &str) -> String {
    let mut name = format!("{}-{}", repo_name, definition.repository.branch);
    for (_, value) in &definition.matrix_row {
        name.push('-');
        name.push_str(value);
    }
    name
}

fn dashed<'v>(first: &str, rest: impl Iterator<Item = &'v str>) -> String {
    let mut out = first.to_string();
    for part in rest {
        out.push('-');
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::expand;

    fn repo() -> Repository {
        Repository::new("http://fake.git", "not_master")
    }

    #[test]
    fn test_registry_keys_are_unique() {
        for (i, handler) in HANDLERS.iter().enumerate() {
            assert!(
                !HANDLERS[i + 1..].iter().any(|other| other.key == handler.key),
                "duplicate handler key {}",
                handler.key
            );
        }
    }

    #[test]
    fn test_is_recognized_option() {
        assert!(is_recognized_option("git"));
        assert!(is_recognized_option("matrix"));
        assert!(!is_recognized_option("grit"));
    }

    #[test]
    fn test_job_name_without_matrix() {
        let definitions = expand("auth_token: t\n", &repo()).unwrap();
        let job = compile(&definitions[0]).unwrap();
        assert_eq!(job.name, "fake-not_master");
    }

    #[test]
    fn test_job_names_follow_matrix_declaration_order() {
        let yaml = "matrix:\n  planet:\n  - earth\n  - mars\n  moon:\n  - io\n  - europa\n";
        let definitions = expand(yaml, &repo()).unwrap();
        let names: Vec<String> = definitions
            .iter()
            .map(|d| compile(d).unwrap().name)
            .collect();
        assert_eq!(
            names,
            vec![
                "fake-not_master-earth-io",
                "fake-not_master-earth-europa",
                "fake-not_master-mars-io",
                "fake-not_master-mars-europa",
            ]
        );
    }

    #[test]
    fn test_single_value_axes_never_reach_the_name() {
        let yaml = "matrix:\n  planet:\n  - earth\n  moon:\n  - europa\n";
        let definitions = expand(yaml, &repo()).unwrap();
        assert_eq!(definitions.len(), 1);
        let job = compile(&definitions[0]).unwrap();
        assert_eq!(job.name, "fake-not_master");
        assert!(job.xml.contains("<assignedNode>fake</assignedNode>"));
    }

    #[test]
    fn test_matrix_value_reaches_assigned_node() {
        let yaml = "matrix:\n  planet:\n  - earth\n  - mars\n";
        let definitions = expand(yaml, &repo()).unwrap();
        let job = compile(&definitions[0]).unwrap();
        assert!(job.xml.contains("<assignedNode>fake-earth</assignedNode>"));
    }

    #[test]
    fn test_unrecognized_option_is_skipped() {
        let yaml = "auth_token: t\nsome_future_option: whatever\n";
        let definitions = expand(yaml, &repo()).unwrap();
        let job = compile(&definitions[0]).unwrap();
        assert!(job.xml.contains("<authToken>t</authToken>"));
        assert!(!job.xml.contains("some_future_option"));
    }
}
