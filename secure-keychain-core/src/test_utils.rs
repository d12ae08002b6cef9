//! Test helper module
//!
//! Provides a scriptable secure store and convenient factory methods.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::adapter::SecureStoreAdapter;
use crate::config::KeychainConfig;
use crate::services::ServiceContext;
use crate::traits::{InMemorySecureStore, SecureStore, StoreOutcome, StoreStatus};
use crate::types::{ItemAttributes, RawItem, Selector};

/// Secure store primitive, used to script failures and count calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Insert,
    Query,
    Update,
    Delete,
}

// ===== ScriptedSecureStore =====

/// In-memory store that counts calls and can fail the next call of a primitive
pub struct ScriptedSecureStore {
    inner: InMemorySecureStore,
    calls: Mutex<HashMap<Primitive, usize>>,
    /// 如果 Some，下一次对应调用返回此状态
    failures: Mutex<HashMap<Primitive, StoreStatus>>,
}

impl ScriptedSecureStore {
    pub fn new() -> Self {
        Self {
            inner: InMemorySecureStore::new(),
            calls: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Make the next call of `primitive` return `status` without touching the data
    pub fn fail_next(&self, primitive: Primitive, status: StoreStatus) {
        self.failures.lock().unwrap().insert(primitive, status);
    }

    /// Stage a raw item, possibly one that does not decode
    pub fn seed(&self, selector: Selector, item: RawItem) {
        self.inner.seed_raw(selector, item).unwrap();
    }

    /// Raw view of an item, bypassing call accounting
    pub fn peek(&self, selector: &Selector) -> Option<RawItem> {
        self.inner.query_one(selector, true).ok()
    }

    pub fn calls(&self, primitive: Primitive) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&primitive)
            .copied()
            .unwrap_or(0)
    }

    pub fn item_count(&self) -> usize {
        self.inner.len().unwrap()
    }

    fn enter(&self, primitive: Primitive) -> StoreOutcome<()> {
        *self.calls.lock().unwrap().entry(primitive).or_insert(0) += 1;
        match self.failures.lock().unwrap().remove(&primitive) {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }
}

impl SecureStore for ScriptedSecureStore {
    fn insert(&self, selector: &Selector, attributes: &ItemAttributes) -> StoreOutcome<()> {
        self.enter(Primitive::Insert)?;
        self.inner.insert(selector, attributes)
    }

    fn query_one(&self, selector: &Selector, return_data: bool) -> StoreOutcome<RawItem> {
        self.enter(Primitive::Query)?;
        self.inner.query_one(selector, return_data)
    }

    fn update_matching(
        &self,
        selector: &Selector,
        attributes: &ItemAttributes,
    ) -> StoreOutcome<()> {
        self.enter(Primitive::Update)?;
        self.inner.update_matching(selector, attributes)
    }

    fn delete_matching(&self, selector: &Selector) -> StoreOutcome<()> {
        self.enter(Primitive::Delete)?;
        self.inner.delete_matching(selector)
    }
}

// ===== 工厂方法 =====

pub const TEST_SCOPE: &str = "com.example.keychain-tests";

/// 创建测试用 `SecureStoreAdapter`
pub fn create_test_adapter() -> (SecureStoreAdapter, Arc<ScriptedSecureStore>) {
    let store = Arc::new(ScriptedSecureStore::new());
    let adapter = SecureStoreAdapter::new(store.clone());
    (adapter, store)
}

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> (ServiceContext, Arc<ScriptedSecureStore>) {
    create_test_context_with(test_config())
}

/// 创建测试用 `ServiceContext`，使用自定义配置
pub fn create_test_context_with(
    config: KeychainConfig,
) -> (ServiceContext, Arc<ScriptedSecureStore>) {
    let store = Arc::new(ScriptedSecureStore::new());
    let ctx = ServiceContext::new(store.clone(), config).unwrap();
    (ctx, store)
}

/// Default configuration pointed at the test scope
pub fn test_config() -> KeychainConfig {
    KeychainConfig {
        service: TEST_SCOPE.to_string(),
        ..KeychainConfig::default()
    }
}
