//! Variant selection for openers, calls to action and PS lines.

use database::Stage;
use rand::Rng;

/// Which list a variant is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantSlot {
    Opener,
    CallToAction,
    Postscript,
}

/// Picks one of `len` variants. Must return an index below `len` whenever
/// `len > 0`.
pub trait VariantSelector: Send + Sync {
    fn select(&self, stage: Stage, slot: VariantSlot, len: usize) -> usize;
}

/// Uniform random choice. Production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl VariantSelector for RandomSelector {
    fn select(&self, _stage: Stage, _slot: VariantSlot, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic choice by stage index.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotatingSelector;

impl VariantSelector for RotatingSelector {
    fn select(&self, stage: Stage, _slot: VariantSlot, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        usize::from(stage.ordinal()) % len
    }
}

/// Pick a variant from a list, if the list is non-empty.
pub fn pick<'a>(
    selector: &dyn VariantSelector,
    stage: Stage,
    slot: VariantSlot,
    variants: &[&'a str],
) -> Option<&'a str> {
    if variants.is_empty() {
        return None;
    }
    let index = selector.select(stage, slot, variants.len()).min(variants.len() - 1);
    Some(variants[index])
}
