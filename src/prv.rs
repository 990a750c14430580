//! Pointer-file generation via the external `ml-prv-create` tool.
//!
//! The generator is an opaque collaborator: it is handed the source
//! recording directory (trailing-slash-qualified) and the destination
//! pointer-file path, and whatever it prints is logged when it exits.
//!
//! Invocations run on worker threads so the scan loop never waits on a
//! slow generator; the run joins the whole task set at the end and keeps
//! each task's exit status for the summary.

use std::path::Path;
use std::process::Command;
use std::thread::{self, JoinHandle};

/// Fixed filename of the pointer file inside a tetrode directory.
pub const PRV_FILENAME: &str = "raw.mda.prv";

/// Generator executable used when no override is configured.
pub const DEFAULT_PRV_EXE: &str = "ml-prv-create";

/// External pointer-file generator.
#[derive(Debug, Clone)]
pub struct PrvCreator {
    exe: String,
}

/// Handle on one dispatched generator invocation.
pub struct PrvTask {
    label: String,
    handle: JoinHandle<PrvOutcome>,
}

/// Result of one generator invocation, available after join.
#[derive(Debug)]
pub struct PrvOutcome {
    pub label: String,
    pub success: bool,
    pub detail: String,
}

impl PrvCreator {
    pub fn new(exe: &str) -> Self {
        Self {
            exe: exe.to_string(),
        }
    }

    pub fn exe(&self) -> &str {
        &self.exe
    }

    /// Spawn `exe <source_dir>/ <dest>` on a worker thread and return
    /// immediately. Captured stdout is logged when the process exits,
    /// in whatever order the generators finish.
    pub fn dispatch(&self, source_dir: &Path, dest: &Path) -> PrvTask {
        // The trailing slash on the source argument is part of the
        // generator's contract.
        let src_arg = format!("{}/", source_dir.display());
        let dest_arg = dest.to_path_buf();
        let exe = self.exe.clone();
        let label = source_dir
            .file_name()
            .and_then(|part| part.to_str())
            .unwrap_or("<unnamed>")
            .to_string();

        println!("RUNNING: {} {} {}", exe, src_arg, dest_arg.display());

        let task_label = label.clone();
        let handle = thread::spawn(move || run_generator(&exe, &src_arg, &dest_arg, &task_label));
        PrvTask { label, handle }
    }
}

impl PrvTask {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Wait for the generator to exit and report its outcome.
    pub fn join(self) -> PrvOutcome {
        match self.handle.join() {
            Ok(outcome) => outcome,
            Err(_) => PrvOutcome {
                label: self.label,
                success: false,
                detail: "generator worker thread panicked".to_string(),
            },
        }
    }
}

fn run_generator(exe: &str, src_arg: &str, dest: &Path, label: &str) -> PrvOutcome {
    let output = match Command::new(exe).arg(src_arg).arg(dest).output() {
        Ok(output) => output,
        Err(err) => {
            return PrvOutcome {
                label: label.to_string(),
                success: false,
                detail: format!("spawning '{}' failed: {}", exe, err),
            };
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    println!("[prv:{}] {}", label, stdout.trim_end());

    if output.status.success() {
        PrvOutcome {
            label: label.to_string(),
            success: true,
            detail: String::new(),
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut detail = output.status.to_string();
        let stderr_text = stderr.trim();
        if !stderr_text.is_empty() {
            detail.push_str(": ");
            detail.push_str(stderr_text);
        }
        PrvOutcome {
            label: label.to_string(),
            success: false,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn successful_generator_reports_success() {
        let temp = TempDir::new().unwrap();
        let creator = PrvCreator::new("echo");

        let task = creator.dispatch(temp.path(), &temp.path().join(PRV_FILENAME));
        let outcome = task.join();

        assert!(outcome.success, "echo should exit zero: {}", outcome.detail);
        assert_eq!(
            outcome.label,
            temp.path().file_name().unwrap().to_str().unwrap()
        );
    }

    #[test]
    fn nonzero_exit_is_tracked_not_fatal() {
        let temp = TempDir::new().unwrap();
        let creator = PrvCreator::new("false");

        let outcome = creator
            .dispatch(temp.path(), &temp.path().join(PRV_FILENAME))
            .join();

        assert!(!outcome.success);
        assert!(outcome.detail.contains("exit status"));
    }

    #[test]
    fn missing_executable_is_tracked_not_fatal() {
        let temp = TempDir::new().unwrap();
        let creator = PrvCreator::new("definitely_not_a_real_generator_12345");

        let outcome = creator
            .dispatch(temp.path(), &temp.path().join(PRV_FILENAME))
            .join();

        assert!(!outcome.success);
        assert!(outcome.detail.contains("spawning"));
    }
}
