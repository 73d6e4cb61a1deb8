//! Level-indexed hook registry
//!
//! Hooks are side-effecting observers fired synchronously during delivery,
//! before formatting, so any field they inject is visible in the output.

use super::error::Result;
use super::event::Event;
use super::level::Level;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered observer invoked during delivery for the levels it
/// subscribes to.
pub trait Hook: Send + Sync {
    /// Levels this hook fires for.
    fn levels(&self) -> Vec<Level>;

    /// Observe (and possibly mutate) an event ahead of formatting.
    fn fire(&self, event: &mut Event) -> Result<()>;
}

/// Mapping from level to an ordered hook list. Insertion order is fire
/// order. Lives inside the delivery configuration lock, so registration
/// and firing never race.
#[derive(Default)]
pub struct LevelHooks {
    hooks: HashMap<Level, Vec<Arc<dyn Hook>>>,
}

impl LevelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the hook to every level it declares interest in.
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        for level in hook.levels() {
            self.hooks.entry(level).or_default().push(Arc::clone(&hook));
        }
    }

    /// Fire all hooks subscribed to `level`, in registration order,
    /// returning the first error encountered. Remaining hooks for this
    /// delivery are skipped on failure.
    pub fn fire(&self, level: Level, event: &mut Event) -> Result<()> {
        if let Some(hooks) = self.hooks.get(&level) {
            for hook in hooks {
                hook.fire(event)?;
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
