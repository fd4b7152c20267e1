use crate::dedupe::DuplicateSets;
use crate::prompt;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Lazily-fetched file timestamps, falling back to `UNIX_EPOCH` when the
/// platform cannot supply one.
#[derive(Debug, Clone, Copy)]
pub struct FileTimes {
    pub created: SystemTime,
    pub modified: SystemTime,
}

pub fn file_times(path: &Path) -> FileTimes {
    let meta = fs::metadata(path).ok();
    FileTimes {
        created: meta
            .as_ref()
            .and_then(|m| m.created().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH),
        modified: meta
            .as_ref()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH),
    }
}

fn format_time(t: SystemTime) -> String {
    DateTime::<Local>::from(t)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

/// Walk every duplicate set, show representative and members with their
/// timestamps, and delete everything except the file the user picks.
pub fn manual_review(sets: &DuplicateSets) -> Result<()> {
    for (rep, members) in sets.iter() {
        let files: Vec<PathBuf> = std::iter::once(rep.to_path_buf())
            .chain(members.iter().cloned())
            .collect();

        println!();
        for (idx, file) in files.iter().enumerate() {
            let times = file_times(file);
            println!(
                "{}. File: {}, Date Created: {}, Date Modified: {}",
                idx + 1,
                file.display(),
                format_time(times.created),
                format_time(times.modified),
            );
        }

        let keep = prompt::prompt_choice("Select an image to keep", files.len())?;
        delete_files(&manual_deletions(&files, keep - 1));
    }

    println!("\nFinished. You should now check for empty folders.");
    Ok(())
}

/// Everything in `files` except the 0-based `keep` index, in display order.
pub fn manual_deletions(files: &[PathBuf], keep: usize) -> Vec<PathBuf> {
    files
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != keep)
        .map(|(_, file)| file.clone())
        .collect()
}

/// Deletion order and survivor for one duplicate set under the
/// automatic-by-creation-date policy.
#[derive(Debug, PartialEq)]
pub struct AutoPlan {
    pub delete: Vec<PathBuf>,
    pub keep: PathBuf,
}

/// Scan the members of a set, keeping a provisional oldest file. A member
/// with a strictly earlier creation time supersedes the current oldest
/// (which is then deleted); otherwise the member itself is deleted. Ties
/// keep the file already held.
pub fn auto_plan<F>(rep: &Path, members: &[PathBuf], created: F) -> AutoPlan
where
    F: Fn(&Path) -> SystemTime,
{
    let mut keep = rep.to_path_buf();
    let mut keep_time = created(rep);
    let mut delete = Vec::new();

    for member in members {
        let member_time = created(member);
        if member_time < keep_time {
            delete.push(std::mem::replace(&mut keep, member.clone()));
            keep_time = member_time;
        } else {
            delete.push(member.clone());
        }
    }

    AutoPlan { delete, keep }
}

/// Resolve every duplicate set without review, keeping the earliest-created
/// file in each.
pub fn auto_by_created(sets: &DuplicateSets) {
    for (rep, members) in sets.iter() {
        let plan = auto_plan(rep, members, |path| file_times(path).created);
        delete_files(&plan.delete);
    }
    println!("Finished. You should now check for empty folders.");
}

/// Delete each file in order. Failures are reported per file and never stop
/// the remaining deletions.
pub fn delete_files(files: &[PathBuf]) {
    for file in files {
        match fs::remove_file(file) {
            Ok(()) => println!("🗑️  Deleted {}", file.display()),
            Err(err) => eprintln!("⚠️  Error: {} - {}", file.display(), err),
        }
    }
}
