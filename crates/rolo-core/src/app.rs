//! Application context.
//!
//! The state containers are constructed once at startup and handed out as
//! handles; nothing in the crate relies on ambient globals.

use crate::client::{ApiClient, Navigator};
use crate::config::{Config, ExportMode};
use crate::error::Result;
use crate::export::{ClipboardExporter, ExportSink, FileDownloader};
use crate::notify::Notifier;
use crate::session::SessionStore;
use crate::store::ContactStore;
use std::sync::Arc;

/// Shared application state: session, API client, and contact store wired
/// together from configuration.
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub client: Arc<ApiClient>,
    pub store: Arc<ContactStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    /// Build the full context. Restores any persisted session before the
    /// first request is issued, and selects the export sink once from
    /// configuration.
    pub fn new(
        config: &Config,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let session = Arc::new(SessionStore::new(config.paths.token_file.clone()));
        session.restore();

        let client = Arc::new(ApiClient::new(
            &config.api,
            Arc::clone(&session),
            navigator,
        )?);

        let sink: Arc<dyn ExportSink> = match config.export.mode {
            ExportMode::File => Arc::new(FileDownloader::new(config.export.download_dir.clone())),
            ExportMode::Clipboard => Arc::new(ClipboardExporter::new(Arc::clone(&notifier))),
        };

        let store = Arc::new(ContactStore::new(
            Arc::clone(&client),
            Arc::clone(&notifier),
            sink,
        ));

        Ok(Self {
            session,
            client,
            store,
            notifier,
        })
    }
}
