use std::path::PathBuf;
use std::sync::Arc;

use signbook_shared::SignatureEntry;
use tokio::sync::RwLock;

/// Oldest entries are dropped once the guestbook grows past this.
pub const MAX_ENTRIES: usize = 500;

#[derive(Clone)]
pub struct AppState {
    pub entries: Arc<RwLock<Vec<SignatureEntry>>>,
    pub entries_file: PathBuf,
}
