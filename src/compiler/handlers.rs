//! Option handler implementations.
//!
//! One function per recognized option key, each translating its value into
//! nodes of the job document. Handlers only see the [`Compilation`] they
//! mutate and the raw YAML value; shape validation happens here, and every
//! error names the offending option and value.
//!
//! Two option families cannot emit their nodes independently: git sources
//! (single vs multi SCM representation depends on how many there are) and
//! test-report patterns (all types share one aggregator publisher). Their
//! handlers collect into the compilation, and [`assemble_scm`] /
//! [`assemble_test_reports`] materialize the nodes once the group finishes.

use super::{Compilation, ScmSpec, TestReport};
use crate::config::scalar_string;
use crate::error::{Error, Result};
use crate::markup::{Document, Node};
use crate::repository::Repository;
use serde_yaml::Value;

fn invalid(option: &str, message: impl Into<String>) -> Error {
    Error::InvalidOption {
        option: option.to_string(),
        message: message.into(),
    }
}

fn expect_string(option: &str, value: &Value) -> Result<String> {
    scalar_string(value).ok_or_else(|| invalid(option, format!("expected a string, got {:?}", value)))
}

fn expect_string_list(option: &str, value: &Value) -> Result<Vec<String>> {
    let sequence = value
        .as_sequence()
        .ok_or_else(|| invalid(option, format!("expected a list, got {:?}", value)))?;
    sequence.iter().map(|item| expect_string(option, item)).collect()
}

fn expect_bool(option: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| invalid(option, format!("expected a boolean, got {:?}", value)))
}

fn expect_integer(option: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| invalid(option, format!("expected an integer, got {:?}", value)))
}

/// A mapping's entries as (string key, value) pairs, in declaration order.
fn mapping_entries(option: &str, value: &Value) -> Result<Vec<(String, Value)>> {
    let mapping = value
        .as_mapping()
        .ok_or_else(|| invalid(option, format!("expected a mapping, got {:?}", value)))?;
    mapping
        .iter()
        .map(|(key, value)| {
            let key = key
                .as_str()
                .ok_or_else(|| invalid(option, format!("expected string keys, got {:?}", key)))?;
            Ok((key.to_string(), value.clone()))
        })
        .collect()
}

fn find<'e>(entries: &'e [(String, Value)], key: &str) -> Option<&'e Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

////// EARLY //////

pub fn display_name(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    let template = expect_string("display_name", value)?;
    let rendered = template
        .replace("{name}", &comp.repo_name)
        .replace("{branch}", &comp.definition.repository.branch);
    let root = comp.doc.root();
    comp.doc.add_text_element(root, "displayName", &rendered)?;
    Ok(())
}

pub fn label_expression(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    let expression = expect_string("label_expression", value)?;
    comp.doc.set_text(comp.assigned_node, &expression)
}

pub fn custom_workspace(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    let workspace = expect_string("custom_workspace", value)?;
    let root = comp.doc.root();
    comp.doc.add_text_element(root, "customWorkspace", &workspace)?;
    Ok(())
}

pub fn auth_token(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    let token = expect_string("auth_token", value)?;
    let root = comp.doc.root();
    comp.doc.add_text_element(root, "authToken", &token)?;
    Ok(())
}

////// SCM //////

pub fn git(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    let repository = &comp.definition.repository;
    let spec = parse_git_spec("git", value, Some(&repository.url), &repository.branch)?;
    comp.scm_sources.push(spec);
    comp.saw_primary_git = true;
    Ok(())
}

pub fn additional_repositories(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    const OPTION: &str = "additional_repositories";
    let entries = value
        .as_sequence()
        .ok_or_else(|| invalid(OPTION, format!("expected a list of git entries, got {:?}", value)))?;
    for entry in entries {
        let entry = mapping_entries(OPTION, entry)?;
        let git_value = find(&entry, "git")
            .ok_or_else(|| invalid(OPTION, "each entry must contain a 'git' mapping"))?;
        let branch = comp.definition.repository.branch.clone();
        let spec = parse_git_spec(OPTION, git_value, None, &branch)?;
        comp.scm_sources.push(spec);
    }
    Ok(())
}

/// Parse one git mapping against the closed sub-key set.
///
/// Unknown sub-keys all fail together so a user fixes the whole block in one
/// round trip.
fn parse_git_spec(
    option: &str,
    value: &Value,
    default_url: Option<&str>,
    default_branch: &str,
) -> Result<ScmSpec> {
    let entries = mapping_entries(option, value)?;

    let mut url = default_url.map(str::to_string);
    let mut branch = default_branch.to_string();
    let mut target_dir = None;
    let mut recursive_submodules = false;
    let mut reference = None;
    let mut clone_timeout = None;
    let mut unknown = Vec::new();

    for (key, value) in &entries {
        match key.as_str() {
            "url" => url = Some(expect_string(option, value)?),
            "branch" => branch = expect_string(option, value)?,
            "target_dir" => target_dir = Some(expect_string(option, value)?),
            "recursive_submodules" => recursive_submodules = expect_bool(option, value)?,
            "reference" => reference = Some(expect_string(option, value)?),
            "timeout" => clone_timeout = Some(expect_integer(option, value)?.to_string()),
            other => unknown.push(other.to_string()),
        }
    }
    if !unknown.is_empty() {
        return Err(Error::UnknownGitOptions { keys: unknown });
    }

    let url = url.ok_or_else(|| invalid(option, "an explicit url is required"))?;
    let target_dir = match target_dir {
        Some(dir) => dir,
        None => Repository::new(url.clone(), "").name()?,
    };

    Ok(ScmSpec {
        url,
        branch,
        target_dir,
        recursive_submodules,
        reference,
        clone_timeout,
    })
}

/// Materialize the SCM section once all sources are known.
///
/// Exactly one source uses the plain GitSCM form; two or more wrap each
/// source in a multiple-SCMs composite. The primary source defaults from the
/// job's repository when no `git:` option supplied it, and then goes first.
pub fn assemble_scm(comp: &mut Compilation<'_>) -> Result<()> {
    let mut sources = std::mem::take(&mut comp.scm_sources);
    if !comp.saw_primary_git {
        let repository = &comp.definition.repository;
        sources.insert(
            0,
            ScmSpec {
                url: repository.url.clone(),
                branch: repository.branch.clone(),
                target_dir: comp.repo_name.clone(),
                recursive_submodules: false,
                reference: None,
                clone_timeout: None,
            },
        );
    }

    let root = comp.doc.root();
    let scm = comp.doc.add_element(root, "scm")?;
    if sources.len() == 1 {
        comp.doc.set_attribute(scm, "class", "hudson.plugins.git.GitSCM");
        write_git_source(&mut comp.doc, scm, &sources[0])?;
    } else {
        comp.doc
            .set_attribute(scm, "class", "org.jenkinsci.plugins.multiplescms.MultiSCM");
        let scms = comp.doc.add_element(scm, "scms")?;
        for source in &sources {
            let entry = comp.doc.add_element(scms, "hudson.plugins.git.GitSCM")?;
            write_git_source(&mut comp.doc, entry, source)?;
        }
    }
    Ok(())
}

fn write_git_source(doc: &mut Document, parent: Node, source: &ScmSpec) -> Result<()> {
    doc.add_text_element(parent, "configVersion", "2")?;
    doc.add_text_element(parent, "relativeTargetDir", &source.target_dir)?;

    let remotes = doc.add_element(parent, "userRemoteConfigs")?;
    let remote = doc.add_element(remotes, "hudson.plugins.git.UserRemoteConfig")?;
    doc.add_text_element(remote, "url", &source.url)?;

    let branches = doc.add_element(parent, "branches")?;
    let branch_spec = doc.add_element(branches, "hudson.plugins.git.BranchSpec")?;
    doc.add_text_element(branch_spec, "name", &source.branch)?;

    let extensions = doc.add_element(parent, "extensions")?;
    if source.recursive_submodules {
        let submodules =
            doc.add_element(extensions, "hudson.plugins.git.extensions.impl.SubmoduleOption")?;
        doc.add_text_element(submodules, "recursiveSubmodules", "true")?;
    }
    if source.reference.is_some() || source.clone_timeout.is_some() {
        let clone_option =
            doc.add_element(extensions, "hudson.plugins.git.extensions.impl.CloneOption")?;
        if let Some(reference) = &source.reference {
            doc.add_text_element(clone_option, "reference", reference)?;
        }
        if let Some(timeout) = &source.clone_timeout {
            doc.add_text_element(clone_option, "timeout", timeout)?;
        }
    }
    let local_branch =
        doc.add_element(extensions, "hudson.plugins.git.extensions.impl.LocalBranch")?;
    doc.add_text_element(local_branch, "localBranch", &source.branch)?;

    doc.add_text_element(parent, "localBranch", &source.branch)?;
    Ok(())
}

////// BUILD //////

pub fn build_batch_commands(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    build_steps(comp, value, "build_batch_commands", "hudson.tasks.BatchFile")
}

pub fn build_shell_commands(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    build_steps(comp, value, "build_shell_commands", "hudson.tasks.Shell")
}

pub fn build_python_commands(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    build_steps(comp, value, "build_python_commands", "hudson.plugins.python.Python")
}

fn build_steps(
    comp: &mut Compilation<'_>,
    value: &Value,
    option: &str,
    step_element: &str,
) -> Result<()> {
    let commands = expect_string_list(option, value)?;
    let root = comp.doc.root();
    let builders = comp.doc.ensure_child(root, "builders")?;
    for command in &commands {
        let step = comp.doc.add_element(builders, step_element)?;
        comp.doc.add_text_element(step, "command", command)?;
    }
    Ok(())
}

////// TEST PUBLISHERS //////

pub fn junit_patterns(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    collect_test_report(comp, value, "junit_patterns", "JUnitType")
}

pub fn boosttest_patterns(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    collect_test_report(comp, value, "boosttest_patterns", "BoostTestJunitHudsonTestType")
}

pub fn jsunit_patterns(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    collect_test_report(comp, value, "jsunit_patterns", "JSUnitPluginType")
}

fn collect_test_report(
    comp: &mut Compilation<'_>,
    value: &Value,
    option: &str,
    type_element: &'static str,
) -> Result<()> {
    let patterns = expect_string_list(option, value)?;
    comp.test_reports.push(TestReport {
        type_element,
        patterns,
    });
    Ok(())
}

/// Materialize the shared test-report aggregator and its cleanup wrapper.
///
/// Every test-report option contributes one typed entry to a single `xunit`
/// publisher, and every glob becomes a pre-build cleanup pattern so stale
/// report files from a previous run can never be picked up.
pub fn assemble_test_reports(comp: &mut Compilation<'_>) -> Result<()> {
    let reports = std::mem::take(&mut comp.test_reports);
    if reports.is_empty() {
        return Ok(());
    }

    let root = comp.doc.root();
    let publishers = comp.doc.ensure_child(root, "publishers")?;
    let xunit = comp.doc.add_element(publishers, "xunit")?;

    let thresholds = comp.doc.add_element(xunit, "thresholds")?;
    let failed = comp
        .doc
        .add_element(thresholds, "org.jenkinsci.plugins.xunit.threshold.FailedThreshold")?;
    comp.doc.add_text_element(failed, "unstableThreshold", "0")?;
    comp.doc.add_text_element(failed, "unstableNewThreshold", "0")?;
    comp.doc.add_text_element(xunit, "thresholdMode", "1")?;

    let types = comp.doc.add_element(xunit, "types")?;
    for report in &reports {
        let entry = comp.doc.add_element(types, report.type_element)?;
        comp.doc
            .add_text_element(entry, "pattern", &report.patterns.join(","))?;
        comp.doc.add_text_element(entry, "skipNoTestFiles", "true")?;
        comp.doc.add_text_element(entry, "failIfNotNew", "false")?;
        comp.doc.add_text_element(entry, "deleteOutputFiles", "true")?;
        comp.doc.add_text_element(entry, "stopProcessingIfError", "true")?;
    }

    let wrappers = comp.doc.ensure_child(root, "buildWrappers")?;
    let cleanup = comp
        .doc
        .add_element(wrappers, "hudson.plugins.ws__cleanup.PreBuildCleanup")?;
    let patterns = comp.doc.add_element(cleanup, "patterns")?;
    for report in &reports {
        for glob in &report.patterns {
            let pattern = comp
                .doc
                .add_element(patterns, "hudson.plugins.ws__cleanup.Pattern")?;
            comp.doc.add_text_element(pattern, "pattern", glob)?;
            comp.doc.add_text_element(pattern, "type", "INCLUDE")?;
        }
    }
    Ok(())
}

////// NOTIFICATION PUBLISHERS //////

pub fn description_regex(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    let regex = expect_string("description_regex", value)?;
    let root = comp.doc.root();
    let publishers = comp.doc.ensure_child(root, "publishers")?;
    let setter = comp
        .doc
        .add_element(publishers, "hudson.plugins.descriptionsetter.DescriptionSetterPublisher")?;
    comp.doc.add_text_element(setter, "regexp", &regex)?;
    comp.doc.add_text_element(setter, "regexpForFailed", &regex)?;
    comp.doc.add_text_element(setter, "setForMatrix", "false")?;
    Ok(())
}

pub fn email_notification(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    const OPTION: &str = "email_notification";
    // String shorthand carries just the recipient list.
    let (recipients, notify_every_build, notify_individuals) = if let Some(recipients) =
        scalar_string(value)
    {
        (recipients, false, false)
    } else {
        let entries = mapping_entries(OPTION, value)?;
        let recipients = find(&entries, "recipients")
            .ok_or_else(|| invalid(OPTION, "missing 'recipients'"))
            .and_then(|v| expect_string(OPTION, v))?;
        let notify_every_build = match find(&entries, "notify_every_build") {
            Some(v) => expect_bool(OPTION, v)?,
            None => false,
        };
        let notify_individuals = match find(&entries, "notify_individuals") {
            Some(v) => expect_bool(OPTION, v)?,
            None => false,
        };
        (recipients, notify_every_build, notify_individuals)
    };

    let root = comp.doc.root();
    let publishers = comp.doc.ensure_child(root, "publishers")?;
    let mailer = comp.doc.add_element(publishers, "hudson.tasks.Mailer")?;
    comp.doc.add_text_element(mailer, "recipients", &recipients)?;
    comp.doc.add_text_element(
        mailer,
        "dontNotifyEveryUnstableBuild",
        if notify_every_build { "false" } else { "true" },
    )?;
    comp.doc.add_text_element(
        mailer,
        "sendToIndividuals",
        if notify_individuals { "true" } else { "false" },
    )?;
    Ok(())
}

pub fn notify_stash(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    const OPTION: &str = "notify_stash";
    // String shorthand names the base URL; the server's default credentials
    // apply in that case.
    let (url, username, password) = if let Some(url) = scalar_string(value) {
        (url, None, None)
    } else {
        let entries = mapping_entries(OPTION, value)?;
        let url = find(&entries, "url")
            .ok_or_else(|| invalid(OPTION, "missing 'url'"))
            .and_then(|v| expect_string(OPTION, v))?;
        let username = match find(&entries, "username") {
            Some(v) => Some(expect_string(OPTION, v)?),
            None => None,
        };
        let password = match find(&entries, "password") {
            Some(v) => Some(expect_string(OPTION, v)?),
            None => None,
        };
        (url, username, password)
    };

    let root = comp.doc.root();
    let publishers = comp.doc.ensure_child(root, "publishers")?;
    let notifier = comp
        .doc
        .add_element(publishers, "org.jenkinsci.plugins.stashNotifier.StashNotifier")?;
    comp.doc.add_text_element(notifier, "stashServerBaseUrl", &url)?;
    if let Some(username) = username {
        comp.doc.add_text_element(notifier, "stashUserName", &username)?;
    }
    if let Some(password) = password {
        comp.doc.add_text_element(notifier, "stashUserPassword", &password)?;
    }
    Ok(())
}

pub fn notification(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    const OPTION: &str = "notification";
    let entries = mapping_entries(OPTION, value)?;
    let required = |key: &str| {
        find(&entries, key)
            .ok_or_else(|| invalid(OPTION, format!("missing '{}'", key)))
            .and_then(|v| expect_string(OPTION, v))
    };
    let protocol = required("protocol")?;
    let format = required("format")?;
    let url = required("url")?;

    let root = comp.doc.root();
    let properties = comp.doc.ensure_child(root, "properties")?;
    let property = comp.doc.add_element(
        properties,
        "com.tikal.hudson.plugins.notification.HudsonNotificationProperty",
    )?;
    comp.doc.set_attribute(property, "plugin", "notification@1.9");
    let endpoints = comp.doc.add_element(property, "endpoints")?;
    let endpoint = comp
        .doc
        .add_element(endpoints, "com.tikal.hudson.plugins.notification.Endpoint")?;
    comp.doc.add_text_element(endpoint, "protocol", &protocol)?;
    comp.doc.add_text_element(endpoint, "format", &format)?;
    comp.doc.add_text_element(endpoint, "url", &url)?;
    comp.doc.add_text_element(endpoint, "event", "all")?;
    comp.doc.add_text_element(endpoint, "timeout", "30000")?;
    comp.doc.add_text_element(endpoint, "loglines", "1")?;
    Ok(())
}

pub fn slack(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    const OPTION: &str = "slack";
    let entries = mapping_entries(OPTION, value)?;
    let required = |key: &str| {
        find(&entries, key)
            .ok_or_else(|| invalid(OPTION, format!("missing '{}'", key)))
            .and_then(|v| expect_string(OPTION, v))
    };
    let team = required("team")?;
    let room = format!("#{}", required("room")?);
    let token = required("token")?;
    let url = required("url")?;

    let root = comp.doc.root();
    let properties = comp.doc.ensure_child(root, "properties")?;
    let property = comp
        .doc
        .add_element(properties, "jenkins.plugins.slack.SlackNotifier_-SlackJobProperty")?;
    comp.doc.set_attribute(property, "plugin", "slack@1.2");
    comp.doc.add_text_element(property, "room", &room)?;
    for flag in [
        "startNotification",
        "notifySuccess",
        "notifyAborted",
        "notifyNotBuilt",
        "notifyUnstable",
        "notifyFailure",
        "notifyBackToNormal",
    ] {
        comp.doc.add_text_element(property, flag, "true")?;
    }

    let publishers = comp.doc.ensure_child(root, "publishers")?;
    let notifier = comp
        .doc
        .add_element(publishers, "jenkins.plugins.slack.SlackNotifier")?;
    comp.doc.set_attribute(notifier, "plugin", "slack@1.2");
    comp.doc.add_text_element(notifier, "teamDomain", &team)?;
    comp.doc.add_text_element(notifier, "authToken", &token)?;
    comp.doc.add_text_element(notifier, "buildServerUrl", &url)?;
    comp.doc.add_text_element(notifier, "room", &room)?;
    Ok(())
}

////// LATE //////

pub fn parameters(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    const OPTION: &str = "parameters";
    let items = value
        .as_sequence()
        .ok_or_else(|| invalid(OPTION, format!("expected a list of parameters, got {:?}", value)))?;

    let root = comp.doc.root();
    let properties = comp.doc.ensure_child(root, "properties")?;
    let property = comp
        .doc
        .add_element(properties, "hudson.model.ParametersDefinitionProperty")?;
    let definitions = comp.doc.add_element(property, "parameterDefinitions")?;

    for item in items {
        let entry = mapping_entries(OPTION, item)?;
        let (kind, body) = entry
            .first()
            .ok_or_else(|| invalid(OPTION, "empty parameter entry"))?;
        let fields = mapping_entries(OPTION, body)?;
        let name = find(&fields, "name")
            .ok_or_else(|| invalid(OPTION, "parameter missing 'name'"))
            .and_then(|v| expect_string(OPTION, v))?;
        let description = match find(&fields, "description") {
            Some(v) => Some(expect_string(OPTION, v)?),
            None => None,
        };

        match kind.as_str() {
            "choice" => {
                let choices = find(&fields, "choices")
                    .ok_or_else(|| invalid(OPTION, "choice parameter missing 'choices'"))
                    .and_then(|v| expect_string_list(OPTION, v))?;
                let definition = comp
                    .doc
                    .add_element(definitions, "hudson.model.ChoiceParameterDefinition")?;
                let choices_node = comp.doc.add_element(definition, "choices")?;
                comp.doc
                    .set_attribute(choices_node, "class", "java.util.Arrays$ArrayList");
                let array = comp.doc.add_element(choices_node, "a")?;
                comp.doc.set_attribute(array, "class", "string-array");
                for choice in &choices {
                    comp.doc.add_text_element(array, "string", choice)?;
                }
                comp.doc.add_text_element(definition, "name", &name)?;
                if let Some(description) = &description {
                    comp.doc.add_text_element(definition, "description", description)?;
                }
            }
            "string" => {
                let definition = comp
                    .doc
                    .add_element(definitions, "hudson.model.StringParameterDefinition")?;
                if let Some(default) = find(&fields, "default") {
                    let default = expect_string(OPTION, default)?;
                    comp.doc.add_text_element(definition, "defaultValue", &default)?;
                }
                comp.doc.add_text_element(definition, "name", &name)?;
                if let Some(description) = &description {
                    comp.doc.add_text_element(definition, "description", description)?;
                }
            }
            other => {
                return Err(invalid(OPTION, format!("unknown parameter type '{}'", other)));
            }
        }
    }
    Ok(())
}

pub fn cron(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    trigger(comp, value, "cron", "hudson.triggers.TimerTrigger")
}

pub fn scm_poll(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    trigger(comp, value, "scm_poll", "hudson.triggers.SCMTrigger")
}

fn trigger(
    comp: &mut Compilation<'_>,
    value: &Value,
    option: &str,
    trigger_element: &str,
) -> Result<()> {
    // Schedule specs pass through verbatim, comment lines included.
    let spec = expect_string(option, value)?;
    let root = comp.doc.root();
    let triggers = comp.doc.ensure_child(root, "triggers")?;
    let node = comp.doc.add_element(triggers, trigger_element)?;
    comp.doc.add_text_element(node, "spec", &spec)?;
    Ok(())
}

pub fn timeout(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    let minutes = expect_integer("timeout", value)?;
    let root = comp.doc.root();
    let wrappers = comp.doc.ensure_child(root, "buildWrappers")?;
    let wrapper = comp
        .doc
        .add_element(wrappers, "hudson.plugins.build__timeout.BuildTimeoutWrapper")?;
    comp.doc
        .add_text_element(wrapper, "timeoutMinutes", &minutes.to_string())?;
    comp.doc.add_text_element(wrapper, "failBuild", "true")?;
    Ok(())
}

pub fn timeout_no_activity(comp: &mut Compilation<'_>, value: &Value) -> Result<()> {
    let seconds = expect_integer("timeout_no_activity", value)?;
    let root = comp.doc.root();
    let wrappers = comp.doc.ensure_child(root, "buildWrappers")?;
    let wrapper = comp
        .doc
        .add_element(wrappers, "hudson.plugins.build__timeout.BuildTimeoutWrapper")?;
    let strategy = comp.doc.add_element(wrapper, "strategy")?;
    comp.doc.set_attribute(
        strategy,
        "class",
        "hudson.plugins.build_timeout.impl.NoActivityTimeOutStrategy",
    );
    comp.doc
        .add_text_element(strategy, "timeoutSecondsString", &seconds.to_string())?;
    let operations = comp.doc.add_element(wrapper, "operationList")?;
    comp.doc
        .add_element(operations, "hudson.plugins.build__timeout.operations.FailOperation")?;
    Ok(())
}
