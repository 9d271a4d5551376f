use std::path::Path;

use signbook_shared::entries_format::{decode_entries_file, encode_entries_file, EntriesFileData};
use signbook_shared::SignatureEntry;

/// A missing file is a fresh guestbook; a corrupt one is reported and
/// treated the same rather than taking the server down.
pub async fn load_entries(path: &Path) -> Vec<SignatureEntry> {
    match tokio::fs::read(path).await {
        Ok(payload) => match decode_entries_file(&payload) {
            Ok(data) => data.entries,
            Err(error) => {
                eprintln!("Failed to decode entries file {}: {error:?}", path.display());
                Vec::new()
            }
        },
        Err(_) => Vec::new(),
    }
}

pub async fn save_entries(path: &Path, entries: &[SignatureEntry]) {
    let payload = encode_entries_file(&EntriesFileData {
        entries: entries.to_vec(),
    });
    if let Err(error) = tokio::fs::write(path, payload).await {
        eprintln!("Failed to save entries file {}: {error}", path.display());
    }
}
