//! Compile command implementation
//!
//! Writes the compiled job documents to a directory, one file per job named
//! after the job, for inspection or file-based provisioning.

use anyhow::Result;
use clap::Args;
use jobforge::publisher::JobPublisher;
use std::path::PathBuf;

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Repository checkout to read (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Directory to write the job documents into
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Repository URL override (skips git discovery; requires --branch)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Branch override (requires --url)
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the compile command
pub fn execute(args: CompileArgs) -> Result<()> {
    let dir = super::working_dir(args.dir);
    let (repository, jobs) = super::resolve_jobs(&dir, args.url.as_deref(), args.branch.as_deref())?;

    let count = jobs.len();
    JobPublisher::new(repository, jobs).publish_to_directory(&args.output)?;

    if !args.quiet {
        println!("{} job document(s) written to {}", count, args.output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compile_writes_one_file_per_job() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".jobforge.yaml"),
            "build_shell_commands:\n- make\n\nmatrix:\n  planet:\n  - earth\n  - mars\n",
        )
        .unwrap();
        let output = temp.path().join("jobs");

        let args = CompileArgs {
            dir: Some(temp.path().to_path_buf()),
            output: output.clone(),
            url: Some("http://server/space.git".to_string()),
            branch: Some("main".to_string()),
            quiet: true,
        };
        execute(args).unwrap();

        let mut names: Vec<String> = fs::read_dir(&output)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["space-main-earth", "space-main-mars"]);

        let xml = fs::read_to_string(output.join("space-main-earth")).unwrap();
        assert!(xml.contains("<command>make</command>"));
    }
}
