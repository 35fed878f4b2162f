//! Upload command implementation
//!
//! Compiles the repository's jobs and reconciles a live server's job set with
//! them: create what is missing, update what exists, delete what the
//! repository no longer declares.

use anyhow::Result;
use clap::Args;
use jobforge::jenkins::JenkinsClient;
use jobforge::publisher::JobPublisher;
use std::path::PathBuf;

/// Arguments for the upload command
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Repository checkout to read (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Jenkins server base URL
    #[arg(long, value_name = "URL", env = "JOBFORGE_SERVER_URL")]
    pub server_url: String,

    /// Server username
    #[arg(long, value_name = "USER", env = "JOBFORGE_USERNAME")]
    pub username: String,

    /// Server password or API token
    #[arg(long, value_name = "PASS", env = "JOBFORGE_PASSWORD")]
    pub password: String,

    /// Repository URL override (skips git discovery; requires --branch)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Branch override (requires --url)
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Print the reconciliation result as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the upload command
pub fn execute(args: UploadArgs) -> Result<()> {
    let dir = super::working_dir(args.dir);
    let (repository, jobs) = super::resolve_jobs(&dir, args.url.as_deref(), args.branch.as_deref())?;

    let mut server = JenkinsClient::new(&args.server_url, &args.username, &args.password)?;
    let result = JobPublisher::new(repository, jobs).publish(&mut server)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !args.quiet {
        for name in &result.new_jobs {
            println!("created {}", name);
        }
        for name in &result.updated_jobs {
            println!("updated {}", name);
        }
        for name in &result.deleted_jobs {
            println!("deleted {}", name);
        }
        println!(
            "{} created, {} updated, {} deleted",
            result.new_jobs.len(),
            result.updated_jobs.len(),
            result.deleted_jobs.len()
        );
    }
    Ok(())
}
