//! Contact and meeting store.
//!
//! Coordinates list/detail loads and mutations against the API client and
//! exposes the resulting state to the consumer layer. Two policies shape
//! every operation:
//!
//! - **Reload on mutation, never local patch.** Cached data is stale the
//!   moment a mutating call for that resource completes; the store re-fetches
//!   instead of patching.
//! - **Issue-order application.** Each list/detail load takes a sequence
//!   ticket at issue time; a completion is discarded when a response from a
//!   newer request has already been applied, so a slow early request cannot
//!   overwrite fresher state.
//!
//! Failures surface as one notification per operation and are re-raised to
//! the caller, except export, whose failures are terminal after the
//! notification.

use crate::client::ApiClient;
use crate::error::Result;
use crate::export::{export_file_name, ExportSink};
use crate::notify::{Notifier, ToastKind};
use crate::types::{ContactListItem, ContactWithTimeline, NewContact, NewMeeting, UpdateContact};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Operation kinds tracked independently while in flight.
///
/// Concurrent distinct operations cannot corrupt each other's reported
/// status; consumers query the kind they care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    LoadContacts,
    LoadDetail,
    CreateContact,
    CreateMeeting,
    UpdateContact,
    DeleteContact,
    Export,
}

#[derive(Default)]
struct StoreState {
    contacts: Vec<ContactListItem>,
    current: Option<ContactWithTimeline>,
    search_keyword: String,
    in_flight: HashMap<OpKind, usize>,
    list_seq: u64,
    list_applied: u64,
    detail_seq: u64,
    detail_applied: u64,
}

/// Transient client-side cache of contacts and the currently-viewed
/// aggregate.
pub struct ContactStore {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn ExportSink>,
    state: RwLock<StoreState>,
}

/// Marks an operation kind in flight for its lifetime.
struct InFlight<'a> {
    store: &'a ContactStore,
    op: OpKind,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.store.state.write();
        if let Some(count) = state.in_flight.get_mut(&self.op) {
            *count -= 1;
            if *count == 0 {
                state.in_flight.remove(&self.op);
            }
        }
    }
}

impl ContactStore {
    pub fn new(
        client: Arc<ApiClient>,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn ExportSink>,
    ) -> Self {
        Self {
            client,
            notifier,
            sink,
            state: RwLock::new(StoreState::default()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn contacts(&self) -> Vec<ContactListItem> {
        self.state.read().contacts.clone()
    }

    pub fn current_contact(&self) -> Option<ContactWithTimeline> {
        self.state.read().current.clone()
    }

    /// The remembered search keyword used by list loads that omit one.
    pub fn search_keyword(&self) -> String {
        self.state.read().search_keyword.clone()
    }

    /// Whether an operation of this kind is currently in flight.
    pub fn is_loading(&self, op: OpKind) -> bool {
        self.state.read().in_flight.contains_key(&op)
    }

    /// Whether any operation is in flight.
    pub fn is_busy(&self) -> bool {
        !self.state.read().in_flight.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Load the contact list, replacing it wholesale.
    ///
    /// A provided search term becomes the remembered keyword; later calls
    /// that omit it reuse the remembered one.
    pub async fn load_contacts(&self, search: Option<&str>) -> Result<()> {
        let _guard = self.begin(OpKind::LoadContacts);

        let (keyword, ticket) = {
            let mut state = self.state.write();
            if let Some(q) = search {
                state.search_keyword = q.to_string();
            }
            state.list_seq += 1;
            (state.search_keyword.clone(), state.list_seq)
        };

        let query = (!keyword.is_empty()).then_some(keyword.as_str());
        match self.client.list_contacts(query).await {
            Ok(list) => {
                let mut state = self.state.write();
                if ticket > state.list_applied {
                    state.list_applied = ticket;
                    state.contacts = list;
                } else {
                    debug!("discarding stale contact list response (ticket {})", ticket);
                }
                Ok(())
            }
            Err(e) => {
                self.notifier.toast(ToastKind::Error, "加载失败");
                Err(e)
            }
        }
    }

    /// Load one contact's aggregate, replacing the current detail wholesale.
    pub async fn load_contact_detail(&self, id: i64) -> Result<()> {
        let _guard = self.begin(OpKind::LoadDetail);

        let ticket = {
            let mut state = self.state.write();
            state.detail_seq += 1;
            state.detail_seq
        };

        match self.client.contact_timeline(id).await {
            Ok(aggregate) => {
                let mut state = self.state.write();
                if ticket > state.detail_applied {
                    state.detail_applied = ticket;
                    state.current = Some(aggregate);
                } else {
                    debug!("discarding stale detail response for contact {}", id);
                }
                Ok(())
            }
            Err(e) => {
                self.notifier.toast(ToastKind::Error, "加载失败");
                Err(e)
            }
        }
    }

    /// Drop the cached aggregate when leaving a detail view.
    pub fn clear_current_contact(&self) {
        self.state.write().current = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a contact, then re-run the list load to resynchronize. No
    /// optimistic insert.
    pub async fn create_contact(&self, data: &NewContact) -> Result<()> {
        let _guard = self.begin(OpKind::CreateContact);

        let result = async {
            self.client.create_contact(data).await?;
            self.load_contacts(None).await
        }
        .await;

        match result {
            Ok(()) => {
                self.notifier.toast(ToastKind::Success, "创建成功");
                Ok(())
            }
            Err(e) => {
                self.notifier.toast(ToastKind::Error, "创建失败");
                Err(e)
            }
        }
    }

    /// Create a meeting from raw text, then re-run the list load (the
    /// backend may have resolved or created a contact, and list projections
    /// shift once extraction lands).
    pub async fn create_meeting(&self, data: &NewMeeting) -> Result<()> {
        let _guard = self.begin(OpKind::CreateMeeting);

        let result = async {
            self.client.create_meeting(data).await?;
            self.load_contacts(None).await
        }
        .await;

        match result {
            Ok(()) => {
                self.notifier.toast(ToastKind::Success, "记录已添加");
                Ok(())
            }
            Err(e) => {
                self.notifier.toast(ToastKind::Error, "添加失败");
                Err(e)
            }
        }
    }

    /// Record a meeting under a known contact, then reload that contact's
    /// aggregate.
    pub async fn add_meeting(&self, contact_id: i64, data: &NewMeeting) -> Result<()> {
        let _guard = self.begin(OpKind::CreateMeeting);

        let result = async {
            self.client.add_meeting(contact_id, data).await?;
            self.load_contact_detail(contact_id).await
        }
        .await;

        match result {
            Ok(()) => {
                self.notifier.toast(ToastKind::Success, "记录已添加");
                Ok(())
            }
            Err(e) => {
                self.notifier.toast(ToastKind::Error, "添加失败");
                Err(e)
            }
        }
    }

    /// Partially update a contact, then reload the list and, when the
    /// updated contact is the one on screen, its aggregate.
    pub async fn update_contact(&self, id: i64, data: &UpdateContact) -> Result<()> {
        let _guard = self.begin(OpKind::UpdateContact);

        let result = async {
            self.client.update_contact(id, data).await?;
            self.load_contacts(None).await?;
            let viewing = {
                let state = self.state.read();
                state
                    .current
                    .as_ref()
                    .is_some_and(|current| current.contact.id == id)
            };
            if viewing {
                self.load_contact_detail(id).await?;
            }
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                self.notifier.toast(ToastKind::Success, "已保存");
                Ok(())
            }
            Err(e) => {
                self.notifier.toast(ToastKind::Error, "保存失败");
                Err(e)
            }
        }
    }

    /// Delete a contact, drop the cached aggregate when it was this one,
    /// then reload the list.
    pub async fn delete_contact(&self, id: i64) -> Result<()> {
        let _guard = self.begin(OpKind::DeleteContact);

        let result = async {
            self.client.delete_contact(id).await?;
            {
                let mut state = self.state.write();
                if state
                    .current
                    .as_ref()
                    .is_some_and(|current| current.contact.id == id)
                {
                    state.current = None;
                }
            }
            self.load_contacts(None).await
        }
        .await;

        match result {
            Ok(()) => {
                self.notifier.toast(ToastKind::Success, "已删除");
                Ok(())
            }
            Err(e) => {
                self.notifier.toast(ToastKind::Error, "删除失败");
                Err(e)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the markdown export of a contact and deliver it through the
    /// configured sink. Failures are terminal: notified, never re-raised.
    pub async fn export_contact(&self, id: i64, name: &str) {
        let _guard = self.begin(OpKind::Export);

        let outcome = match self.client.export_markdown(id).await {
            Ok(text) => self.sink.deliver(&export_file_name(id, name), &text),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => self.notifier.toast(ToastKind::Success, "导出成功"),
            Err(e) => {
                warn!("export of contact {} failed: {}", id, e);
                self.notifier.toast(ToastKind::Error, "导出失败");
            }
        }
    }

    fn begin(&self, op: OpKind) -> InFlight<'_> {
        *self.state.write().in_flight.entry(op).or_insert(0) += 1;
        InFlight { store: self, op }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LogNavigator;
    use crate::config::ApiConfig;
    use crate::notify::LogNotifier;
    use crate::session::SessionStore;
    use tempfile::tempdir;

    struct NullSink;

    impl ExportSink for NullSink {
        fn deliver(&self, _file_name: &str, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn offline_store(dir: &tempfile::TempDir) -> ContactStore {
        let session = Arc::new(SessionStore::new(dir.path().join("token")));
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        };
        let client =
            Arc::new(ApiClient::new(&config, session, Arc::new(LogNavigator)).unwrap());
        ContactStore::new(client, Arc::new(LogNotifier), Arc::new(NullSink))
    }

    #[test]
    fn test_starts_empty_and_idle() {
        let dir = tempdir().unwrap();
        let store = offline_store(&dir);
        assert!(store.contacts().is_empty());
        assert!(store.current_contact().is_none());
        assert_eq!(store.search_keyword(), "");
        assert!(!store.is_busy());
    }

    #[test]
    fn test_in_flight_guard_tracks_per_operation() {
        let dir = tempdir().unwrap();
        let store = offline_store(&dir);

        let guard = store.begin(OpKind::LoadContacts);
        assert!(store.is_loading(OpKind::LoadContacts));
        assert!(!store.is_loading(OpKind::LoadDetail));
        assert!(store.is_busy());

        let nested = store.begin(OpKind::LoadContacts);
        drop(guard);
        // Still in flight while the nested operation runs
        assert!(store.is_loading(OpKind::LoadContacts));

        drop(nested);
        assert!(!store.is_loading(OpKind::LoadContacts));
        assert!(!store.is_busy());
    }

    #[test]
    fn test_clear_current_contact_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = offline_store(&dir);
        store.clear_current_contact();
        assert!(store.current_contact().is_none());
    }
}
