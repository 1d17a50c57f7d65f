use alloc::collections::BTreeMap;
use alloc::sync::Arc;

use ibc_app_hooks::context::HooksStoreContext;
use ibc_core::primitives::prelude::*;
use ibc_core::router::types::event::ModuleEvent;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct MockHooksState {
    pub kv: BTreeMap<Vec<u8>, Vec<u8>>,
    pub events: Vec<ModuleEvent>,
    pub logs: Vec<String>,
}

/// A module store whose clones share the same state, so tests can inspect
/// what the middleware wrote after handing it a copy.
#[derive(Clone, Debug, Default)]
pub struct MockHooksStore {
    pub state: Arc<Mutex<MockHooksState>>,
}

impl MockHooksStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ModuleEvent> {
        self.state.lock().events.clone()
    }

    /// Kinds of the emitted events, in emission order.
    pub fn event_kinds(&self) -> Vec<String> {
        self.state
            .lock()
            .events
            .iter()
            .map(|event| event.kind.clone())
            .collect()
    }

    pub fn logs(&self) -> Vec<String> {
        self.state.lock().logs.clone()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.state.lock().kv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HooksStoreContext for MockHooksStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.state.lock().kv.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.state.lock().kv.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.state.lock().kv.remove(key);
    }

    fn emit_event(&mut self, event: ModuleEvent) {
        self.state.lock().events.push(event);
    }

    fn log_message(&mut self, message: String) {
        self.state.lock().logs.push(message);
    }
}
