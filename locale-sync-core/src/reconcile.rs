//! Merge an existing translation with the canonical skeleton.
//!
//! The skeleton's keys are authoritative: the output has exactly its shape.
//! String leaves already present in the existing translation are reused
//! verbatim, everything else is machine translated, and keys the skeleton no
//! longer has are dropped.

use serde_json::Value;

use crate::translator::{InterpolationSafeTranslator, Translator};
use crate::tree::LocaleTree;

/// What happened to a single skeleton leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafOutcome {
    Reused,
    Translated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub reused: usize,
    pub translated: usize,
    /// Obsolete keys dropped, plus existing values thrown away because the
    /// key switched between leaf and subtree; a dropped subtree counts once.
    pub pruned: usize,
}

impl ReconcileStats {
    #[must_use]
    pub const fn leaves(&self) -> usize {
        self.reused + self.translated
    }

    fn record(&mut self, outcome: LeafOutcome) {
        match outcome {
            LeafOutcome::Reused => self.reused += 1,
            LeafOutcome::Translated => self.translated += 1,
        }
    }
}

/// Reconciles trees for one target language.
pub struct Reconciler<'r, 'a, T> {
    translator: &'r InterpolationSafeTranslator<'a, T>,
    target: &'r str,
}

impl<'r, 'a, T: Translator> Reconciler<'r, 'a, T> {
    pub const fn new(translator: &'r InterpolationSafeTranslator<'a, T>, target: &'r str) -> Self {
        Self { translator, target }
    }

    /// Build the reconciled tree for `existing` against `skeleton`.
    ///
    /// `on_leaf` is called once per skeleton leaf, in skeleton order.
    ///
    /// # Errors
    ///
    /// The first backend failure aborts the whole tree and is returned as is.
    pub fn reconcile<F>(
        &self,
        existing: &LocaleTree,
        skeleton: &LocaleTree,
        mut on_leaf: F,
    ) -> Result<(LocaleTree, ReconcileStats), T::Error>
    where
        F: FnMut(LeafOutcome),
    {
        let mut stats = ReconcileStats::default();
        let tree = self.reconcile_level(existing, skeleton, &mut stats, &mut on_leaf)?;
        Ok((tree, stats))
    }

    fn reconcile_level<F>(
        &self,
        existing: &LocaleTree,
        skeleton: &LocaleTree,
        stats: &mut ReconcileStats,
        on_leaf: &mut F,
    ) -> Result<LocaleTree, T::Error>
    where
        F: FnMut(LeafOutcome),
    {
        let empty = LocaleTree::new();
        let mut out = LocaleTree::new();

        for (key, skeleton_value) in skeleton {
            let existing_value = existing.get(key);
            let value = match skeleton_value {
                Value::Object(skeleton_sub) => {
                    let existing_sub = match existing_value {
                        Some(Value::Object(sub)) => sub,
                        Some(_) => {
                            stats.pruned += 1;
                            &empty
                        }
                        None => &empty,
                    };
                    Value::Object(self.reconcile_level(existing_sub, skeleton_sub, stats, on_leaf)?)
                }
                Value::String(source_text) => {
                    let (text, outcome) = match existing_value {
                        Some(Value::String(done)) => (done.clone(), LeafOutcome::Reused),
                        other => {
                            if other.is_some() {
                                stats.pruned += 1;
                            }
                            log::debug!("translating '{key}' into {}", self.target);
                            let translated = self.translator.translate(source_text, self.target)?;
                            (translated, LeafOutcome::Translated)
                        }
                    };
                    stats.record(outcome);
                    on_leaf(outcome);
                    Value::String(text)
                }
                other => other.clone(),
            };
            out.insert(key.clone(), value);
        }

        stats.pruned += existing.keys().filter(|k| !skeleton.contains_key(*k)).count();
        Ok(out)
    }
}
