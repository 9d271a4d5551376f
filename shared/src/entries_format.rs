use bincode::{Decode, Encode};

use crate::payload::SignatureEntry;

pub const ENTRIES_FILE_MAGIC: [u8; 4] = *b"SBGB";
pub const ENTRIES_FILE_VERSION: u32 = 1;
const ENTRIES_HEADER_LEN: usize = ENTRIES_FILE_MAGIC.len() + std::mem::size_of::<u32>();

#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct EntriesFileData {
    pub entries: Vec<SignatureEntry>,
}

#[derive(Debug, PartialEq)]
pub enum EntriesFileDecodeError {
    UnsupportedVersion(u32),
    InvalidData,
}

pub fn encode_entries_file(data: &EntriesFileData) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&ENTRIES_FILE_MAGIC);
    payload.extend_from_slice(&ENTRIES_FILE_VERSION.to_le_bytes());
    let body = bincode::encode_to_vec(data, bincode::config::standard()).unwrap_or_default();
    payload.extend_from_slice(&body);
    payload
}

pub fn decode_entries_file(payload: &[u8]) -> Result<EntriesFileData, EntriesFileDecodeError> {
    if !(payload.len() >= ENTRIES_HEADER_LEN && payload.starts_with(&ENTRIES_FILE_MAGIC)) {
        return Err(EntriesFileDecodeError::InvalidData);
    }
    let version = u32::from_le_bytes(
        payload[ENTRIES_FILE_MAGIC.len()..ENTRIES_HEADER_LEN]
            .try_into()
            .map_err(|_| EntriesFileDecodeError::InvalidData)?,
    );
    let body = &payload[ENTRIES_HEADER_LEN..];
    match version {
        1 => bincode::decode_from_slice(body, bincode::config::standard())
            .map(|(data, _)| data)
            .map_err(|_| EntriesFileDecodeError::InvalidData),
        _ => Err(EntriesFileDecodeError::UnsupportedVersion(version)),
    }
}
