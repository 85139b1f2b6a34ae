//! The form session: the single owner of the mutable draft.
//!
//! The engine only ever sees immutable snapshots; the session holds the
//! mutable copy, debounces recalculation and autosave, and mediates
//! restore-from-store. Everything runs on one logical thread — the
//! caller drives time by calling [`FormSession::tick`] with its clock.

use std::time::Instant;

use tracing::{debug, warn};

use crate::core::{
    CalculationResult, DocumentTotals, FactureError, InvoiceDraft, LineInput, TaxRegime,
    compute_document_totals,
};
use crate::debounce::{AUTOSAVE_DEBOUNCE, Debounce, RECALC_DEBOUNCE};
use crate::store::{DraftStore, load_draft, save_draft};

/// What happened during one [`FormSession::tick`].
#[derive(Debug, Default)]
pub struct TickReport {
    /// A debounced recalculation fired.
    pub recalculated: bool,
    /// A debounced autosave fired and failed. Non-fatal: the in-memory
    /// draft and totals are unaffected.
    pub save_error: Option<FactureError>,
}

/// Owns the invoice draft and its derived calculation result.
#[derive(Debug)]
pub struct FormSession {
    draft: InvoiceDraft,
    result: CalculationResult,
    recalc: Debounce,
    autosave: Debounce,
}

impl FormSession {
    /// Start a session around a draft, computing totals eagerly so the
    /// preview is never stale at startup.
    pub fn new(draft: InvoiceDraft) -> Self {
        let result = recompute(&draft);
        Self {
            draft,
            result,
            recalc: Debounce::new(RECALC_DEBOUNCE),
            autosave: Debounce::new(AUTOSAVE_DEBOUNCE),
        }
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn result(&self) -> &CalculationResult {
        &self.result
    }

    pub fn totals(&self) -> &DocumentTotals {
        &self.result.totals
    }

    /// Apply an edit to the draft and arm the recalculation and autosave
    /// timers. Bursts of edits within the debounce windows collapse into
    /// a single recalculation and a single write.
    pub fn edit(&mut self, now: Instant, apply: impl FnOnce(&mut InvoiceDraft)) {
        apply(&mut self.draft);
        self.recalc.arm(now);
        self.autosave.arm(now);
    }

    /// Append a fresh default line.
    pub fn add_line(&mut self, now: Instant) {
        self.edit(now, |draft| draft.lines.push(LineInput::default()));
    }

    /// Remove a line by index. Like the form, an empty document is never
    /// left behind: removing the last line replaces it with a fresh one.
    pub fn remove_line(&mut self, now: Instant, index: usize) {
        self.edit(now, |draft| {
            if index < draft.lines.len() {
                draft.lines.remove(index);
            }
            if draft.lines.is_empty() {
                draft.lines.push(LineInput::default());
            }
        });
    }

    pub fn set_regime(&mut self, now: Instant, regime: TaxRegime) {
        self.edit(now, |draft| draft.regime = regime);
    }

    /// Advance the session clock: fire whichever debounced actions are
    /// due, recalculation first, then autosave.
    pub fn tick(&mut self, now: Instant, store: &mut dyn DraftStore) -> TickReport {
        let mut report = TickReport::default();

        if self.recalc.poll(now) {
            self.result = recompute(&self.draft);
            report.recalculated = true;
            debug!(net_to_pay = %self.result.totals.net_to_pay, "recalculated document totals");
        }

        if self.autosave.poll(now) {
            if let Err(err) = save_draft(store, &self.draft) {
                warn!(%err, "draft autosave failed");
                report.save_error = Some(err);
            }
        }

        report
    }

    /// Recalculate immediately, cancelling any pending debounced run.
    /// Used at finalization, where the preview must reflect the draft
    /// exactly.
    pub fn recalculate_now(&mut self) -> &CalculationResult {
        self.recalc.cancel();
        self.result = recompute(&self.draft);
        &self.result
    }

    /// Replace the draft with a stored snapshot, if the user confirmed.
    ///
    /// Returns `Ok(true)` when a draft was restored. Without confirmation
    /// (or with nothing stored) the session is left untouched.
    pub fn try_restore(
        &mut self,
        store: &dyn DraftStore,
        confirmed: bool,
    ) -> Result<bool, FactureError> {
        if !confirmed {
            return Ok(false);
        }
        match load_draft(store)? {
            Some(draft) => {
                self.draft = draft;
                self.result = recompute(&self.draft);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn recompute(draft: &InvoiceDraft) -> CalculationResult {
    compute_document_totals(
        &draft.lines,
        draft.regime,
        draft.global_discount_percent,
        draft.deposit,
        draft.currency,
    )
}
