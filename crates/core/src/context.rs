// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ambient run context.
//!
//! The engine installs run-scoped values (`flow_run_id`, ...) before handing
//! control to an environment; the environment reads them without threading
//! them through every call. The context is thread-local and scoped: dropping
//! the guard restores whatever was installed before it.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static CONTEXT: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
}

/// Read a value from the current context.
pub fn get(key: &str) -> Option<String> {
    CONTEXT.with(|ctx| ctx.borrow().get(key).cloned())
}

/// Install entries for the lifetime of the returned guard.
///
/// Entries layer over the current context; on drop the previous context is
/// restored in full.
pub fn scope<I, K, V>(entries: I) -> ContextGuard
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let previous = CONTEXT.with(|ctx| {
        let mut map = ctx.borrow_mut();
        let previous = map.clone();
        map.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        previous
    });
    ContextGuard { previous }
}

/// Restores the previous context on drop. Returned by [`scope`].
#[must_use = "dropping the guard immediately restores the previous context"]
pub struct ContextGuard {
    previous: HashMap<String, String>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
