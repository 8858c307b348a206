//! Pre-save extension point for the submission wizard.
//!
//! A registered [`SaveStepHook`] runs after the submitted form input has
//! been read but before any step-specific branch or save logic. Returning
//! [`HookOutcome::Handled`] short-circuits the remainder of the save
//! entirely -- this is the workflow's sole interception seam, kept as a
//! narrow single-purpose trait rather than a general dispatch mechanism.

use folio_core::submission::SubmissionStep;
use folio_db::models::article::Article;

use crate::forms::SaveStepBody;

/// Whether a hook consumed the save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The hook handled the request; default save logic must not run.
    Handled,
    /// Proceed with the default save logic.
    NotHandled,
}

/// Interception hook invoked before the default step-save logic.
pub trait SaveStepHook: Send + Sync {
    fn on_save(
        &self,
        step: SubmissionStep,
        article: Option<&Article>,
        body: &SaveStepBody,
    ) -> HookOutcome;
}
