//! Submission wizard step machine.
//!
//! Defines the five wizard steps, the submission status enumeration, and
//! the access-gating rules used by the API layer: which step a request may
//! target, and where to send it when it may not.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Submission status
// ---------------------------------------------------------------------------

/// Lifecycle status of an article submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// The author is still working through the wizard.
    InProgress,
    /// Step 5 completed; awaiting editorial assignment.
    Queued,
    /// Expedited directly into editorial review.
    InReview,
}

impl SubmissionStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "queued" => Ok(Self::Queued),
            "in_review" => Ok(Self::InReview),
            _ => Err(CoreError::Validation(format!(
                "Invalid submission status '{s}'. Must be one of: in_progress, queued, in_review"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Queued => "queued",
            Self::InReview => "in_review",
        }
    }
}

// ---------------------------------------------------------------------------
// Wizard steps
// ---------------------------------------------------------------------------

/// The five steps of the article submission wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStep {
    Metadata,
    Upload,
    Authors,
    SupplementaryFiles,
    Confirmation,
}

/// Minimum step number (1-based).
pub const MIN_STEP: i32 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: i32 = 5;

impl SubmissionStep {
    /// Convert a 1-based step number to a `SubmissionStep`.
    pub fn from_number(n: i32) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Metadata),
            2 => Ok(Self::Upload),
            3 => Ok(Self::Authors),
            4 => Ok(Self::SupplementaryFiles),
            5 => Ok(Self::Confirmation),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> i32 {
        match self {
            Self::Metadata => 1,
            Self::Upload => 2,
            Self::Authors => 3,
            Self::SupplementaryFiles => 4,
            Self::Confirmation => 5,
        }
    }

    /// View identifier for the step's form template.
    pub fn view(self) -> &'static str {
        match self {
            Self::Metadata => "author/submit/step1",
            Self::Upload => "author/submit/step2",
            Self::Authors => "author/submit/step3",
            Self::SupplementaryFiles => "author/submit/step4",
            Self::Confirmation => "author/submit/step5",
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Metadata => "Submission Metadata",
            Self::Upload => "Upload Submission",
            Self::Authors => "Authors",
            Self::SupplementaryFiles => "Supplementary Files",
            Self::Confirmation => "Confirmation",
        }
    }
}

// ---------------------------------------------------------------------------
// Access gating
// ---------------------------------------------------------------------------

/// Where to send a submission request that may not proceed as addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAccess {
    /// The request may proceed against the addressed step.
    Granted,
    /// Malformed step request; send the client to step 1.
    RedirectToFirstStep,
    /// Article missing, foreign, or step beyond progress; send the client
    /// to the step-less submission entry point.
    RedirectToEntry,
}

/// Structural check on the addressed step, before any article is loaded.
///
/// A step outside `1..=5`, or a step other than 1 addressed without an
/// article id, is silently corrected to step 1.
pub fn check_step_request(step: i32, has_article_id: bool) -> StepAccess {
    if !(MIN_STEP..=MAX_STEP).contains(&step) || (!has_article_id && step != MIN_STEP) {
        StepAccess::RedirectToFirstStep
    } else {
        StepAccess::Granted
    }
}

/// Whether a step may be entered given the article's recorded progress.
///
/// `submission_progress` is the highest completed step (0 when nothing has
/// been saved yet); the author may resume any completed step or enter the
/// next one, but never skip ahead.
pub fn step_within_progress(step: i32, submission_progress: i32) -> bool {
    step <= submission_progress + 1
}

/// New progress value after a successful save of `step`.
///
/// Progress is a high-water mark: it never decreases when an earlier step
/// is re-saved.
pub fn progress_after_save(submission_progress: i32, step: i32) -> i32 {
    submission_progress.max(step)
}

/// Ownership/context check for an article resolved from a request.
///
/// Denies foreign articles, articles from another journal, and steps past
/// the recorded progress. The caller handles the not-found case.
pub fn check_article_access(
    owner_matches: bool,
    journal_matches: bool,
    step: Option<i32>,
    submission_progress: i32,
) -> StepAccess {
    if !owner_matches || !journal_matches {
        return StepAccess::RedirectToEntry;
    }
    if let Some(step) = step {
        if !step_within_progress(step, submission_progress) {
            return StepAccess::RedirectToEntry;
        }
    }
    StepAccess::Granted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- SubmissionStatus --

    #[test]
    fn status_from_str_valid() {
        assert_eq!(
            SubmissionStatus::from_str_db("in_progress").unwrap(),
            SubmissionStatus::InProgress
        );
        assert_eq!(
            SubmissionStatus::from_str_db("queued").unwrap(),
            SubmissionStatus::Queued
        );
        assert_eq!(
            SubmissionStatus::from_str_db("in_review").unwrap(),
            SubmissionStatus::InReview
        );
    }

    #[test]
    fn status_from_str_invalid() {
        assert_matches!(
            SubmissionStatus::from_str_db("published"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(SubmissionStatus::from_str_db(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn status_as_str_roundtrip() {
        for status in [
            SubmissionStatus::InProgress,
            SubmissionStatus::Queued,
            SubmissionStatus::InReview,
        ] {
            assert_eq!(SubmissionStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    // -- SubmissionStep --

    #[test]
    fn step_from_number_valid() {
        assert_eq!(
            SubmissionStep::from_number(1).unwrap(),
            SubmissionStep::Metadata
        );
        assert_eq!(
            SubmissionStep::from_number(5).unwrap(),
            SubmissionStep::Confirmation
        );
    }

    #[test]
    fn step_from_number_invalid() {
        assert_matches!(SubmissionStep::from_number(0), Err(CoreError::Validation(_)));
        assert_matches!(SubmissionStep::from_number(6), Err(CoreError::Validation(_)));
        assert_matches!(SubmissionStep::from_number(-1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn step_to_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            let step = SubmissionStep::from_number(n).unwrap();
            assert_eq!(step.to_number(), n);
        }
    }

    #[test]
    fn step_views_are_distinct() {
        let views: Vec<_> = (MIN_STEP..=MAX_STEP)
            .map(|n| SubmissionStep::from_number(n).unwrap().view())
            .collect();
        for (i, v) in views.iter().enumerate() {
            assert!(!views[i + 1..].contains(v));
        }
    }

    // -- check_step_request --

    #[test]
    fn out_of_range_steps_redirect_to_first_step() {
        for step in [-1, 0, 6, 99] {
            assert_eq!(
                check_step_request(step, true),
                StepAccess::RedirectToFirstStep
            );
            assert_eq!(
                check_step_request(step, false),
                StepAccess::RedirectToFirstStep
            );
        }
    }

    #[test]
    fn step_one_needs_no_article() {
        assert_eq!(check_step_request(1, false), StepAccess::Granted);
        assert_eq!(check_step_request(1, true), StepAccess::Granted);
    }

    #[test]
    fn later_steps_require_an_article() {
        for step in 2..=5 {
            assert_eq!(
                check_step_request(step, false),
                StepAccess::RedirectToFirstStep
            );
            assert_eq!(check_step_request(step, true), StepAccess::Granted);
        }
    }

    // -- step_within_progress --

    #[test]
    fn progress_gates_allow_up_to_next_step() {
        // Progress 2: steps 1-3 accessible, step 4 is not.
        assert!(step_within_progress(1, 2));
        assert!(step_within_progress(2, 2));
        assert!(step_within_progress(3, 2));
        assert!(!step_within_progress(4, 2));
        assert!(!step_within_progress(5, 2));
    }

    #[test]
    fn fresh_article_allows_only_step_one() {
        assert!(step_within_progress(1, 0));
        assert!(!step_within_progress(2, 0));
    }

    // -- progress_after_save --

    #[test]
    fn progress_is_a_high_water_mark() {
        assert_eq!(progress_after_save(0, 1), 1);
        assert_eq!(progress_after_save(3, 4), 4);
        // Re-saving an earlier step never loses progress.
        assert_eq!(progress_after_save(4, 2), 4);
        assert_eq!(progress_after_save(5, 5), 5);
    }

    // -- check_article_access --

    #[test]
    fn foreign_owner_is_denied() {
        assert_eq!(
            check_article_access(false, true, Some(1), 5),
            StepAccess::RedirectToEntry
        );
    }

    #[test]
    fn wrong_journal_is_denied() {
        assert_eq!(
            check_article_access(true, false, Some(1), 5),
            StepAccess::RedirectToEntry
        );
    }

    #[test]
    fn skipping_ahead_is_denied() {
        assert_eq!(
            check_article_access(true, true, Some(4), 2),
            StepAccess::RedirectToEntry
        );
    }

    #[test]
    fn resume_within_progress_is_granted() {
        assert_eq!(
            check_article_access(true, true, Some(3), 2),
            StepAccess::Granted
        );
        // Step-less validation (e.g. expedite) only checks ownership.
        assert_eq!(check_article_access(true, true, None, 0), StepAccess::Granted);
    }
}
