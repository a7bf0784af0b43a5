//! Process-wide user session shared by the workflows.
//!
//! The portal keeps one `UserInfo` record plus an authenticated flag in
//! client-side persistent storage. Workflows never reach for storage
//! directly; they receive a [`SessionHandle`] at construction time and read
//! role-gated identity through it.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Which side of the portal the signed-in account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Staff,
    Supplier,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::Staff => "staff",
            UserRole::Supplier => "supplier",
        }
    }
}

/// Identity record persisted after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub account_email: String,
    pub display_name: String,
    pub role: UserRole,
    /// Present for supplier accounts; used to stamp applications.
    pub supplier_id: Option<String>,
    /// Present for staff accounts; used to stamp procurement posts.
    pub staff_id: Option<String>,
}

/// Storage abstraction so workflows can be exercised without a browser.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<UserInfo>;
    fn save(&self, info: UserInfo);
    fn is_authenticated(&self) -> bool;
    fn clear(&self);
}

pub type SessionHandle = Arc<dyn SessionStore>;

/// In-memory store backing tests and the default engine wiring.
#[derive(Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
}

#[derive(Default)]
struct SessionState {
    user: Option<UserInfo>,
    authenticated: bool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(info: UserInfo) -> Self {
        let store = Self::new();
        store.save(info);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<UserInfo> {
        self.state.lock().expect("session mutex poisoned").user.clone()
    }

    fn save(&self, info: UserInfo) {
        let mut state = self.state.lock().expect("session mutex poisoned");
        state.user = Some(info);
        state.authenticated = true;
    }

    fn is_authenticated(&self) -> bool {
        self.state
            .lock()
            .expect("session mutex poisoned")
            .authenticated
    }

    fn clear(&self) {
        let mut state = self.state.lock().expect("session mutex poisoned");
        state.user = None;
        state.authenticated = false;
    }
}
