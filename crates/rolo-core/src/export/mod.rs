//! Contact export delivery.
//!
//! The backend renders the markdown; the client only delivers it. Delivery
//! is a capability selected once at startup: browser-class environments save
//! a named file, constrained environments copy the text to the clipboard and
//! confirm with a dialog. Business logic never branches on the platform.

use crate::error::{Error, Result};
use crate::notify::Notifier;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Delivery mechanism for an exported record.
pub trait ExportSink: Send + Sync {
    fn deliver(&self, file_name: &str, text: &str) -> Result<()>;
}

/// File name for an exported contact: `{name or "contact"}_{id}.md`.
pub fn export_file_name(id: i64, name: &str) -> String {
    let base = if name.is_empty() { "contact" } else { name };
    format!("{}_{}.md", base, id)
}

/// Writes the export as a named file into a download directory.
pub struct FileDownloader {
    dir: PathBuf,
}

impl FileDownloader {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ExportSink for FileDownloader {
    fn deliver(&self, file_name: &str, text: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, text)?;
        debug!("export written to {}", path.display());
        Ok(())
    }
}

/// Copies the export text to the system clipboard and raises a confirmation
/// dialog telling the user to paste it elsewhere. Never touches the
/// filesystem.
pub struct ClipboardExporter {
    notifier: Arc<dyn Notifier>,
}

impl ClipboardExporter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl ExportSink for ClipboardExporter {
    fn deliver(&self, _file_name: &str, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        self.notifier
            .modal("导出成功", "内容已复制到剪贴板，请保存到笔记应用");
        Ok(())
    }
}
