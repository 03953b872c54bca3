//! Plan and statistics types shared by the executors.

use anyhow::Result;

use super::operation::Operation;
use crate::issues::Issue;

/// Counts of what a migration did, or would do in dry-run mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStats {
    /// Images copied into the target directory.
    pub copied: usize,
    /// Images moved inside the target modules.
    pub moved: usize,
    /// Unused images deleted.
    pub deleted: usize,
    /// Source files whose references were rewritten.
    pub rewritten: usize,
    /// Property lines removed from the original locale files.
    pub lines_removed: usize,
    /// Property lines appended to the target locale files.
    pub lines_appended: usize,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.copied += other.copied;
        self.moved += other.moved;
        self.deleted += other.deleted;
        self.rewritten += other.rewritten;
        self.lines_removed += other.lines_removed;
        self.lines_appended += other.lines_appended;
    }
}

/// Planned file operations of one run.
#[derive(Debug, Default)]
pub struct MigrationPlan {
    pub operations: Vec<Operation>,
    pub stats: ActionStats,
    /// Non-fatal problems found while planning.
    pub issues: Vec<Issue>,
}

impl MigrationPlan {
    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Execute every operation in order (apply) or log them (dry-run).
    ///
    /// The first failing operation aborts the run; earlier operations are
    /// not rolled back.
    pub fn run(&self, apply: bool) -> Result<()> {
        for op in &self.operations {
            if apply {
                op.execute()?;
            } else {
                op.preview();
            }
        }
        Ok(())
    }
}

impl std::ops::AddAssign for MigrationPlan {
    fn add_assign(&mut self, other: Self) {
        self.operations.extend(other.operations);
        self.stats += other.stats;
        self.issues.extend(other.issues);
    }
}
