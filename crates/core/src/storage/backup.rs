//! Password-protected backups of the whole tracker state.
//!
//! Layout:
//! ```text
//! [SBDG: 4B] [version: 2B LE] [memory_cost: 4B LE] [time_cost: 4B LE]
//! [parallelism: 4B LE] [salt: 16B] [nonce: 12B] [ciphertext + tag: rest]
//! ```
//! The plaintext is the JSON encoding of a `BudgetSnapshot`.

use tracing::debug;

use crate::errors::CoreError;
use crate::models::snapshot::BudgetSnapshot;

use super::encryption::{random_bytes, BackupKey, KdfParams, NONCE_LEN, SALT_LEN};

/// Magic bytes identifying a Saiel budget backup.
pub const MAGIC: &[u8; 4] = b"SBDG";

pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12)
pub const HEADER_LEN: usize = 46;

/// AES-GCM authentication tag length; the smallest possible ciphertext.
const TAG_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

impl BackupHeader {
    fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.kdf_params.memory_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf_params.time_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf_params.parallelism.to_le_bytes());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
    }
}

/// Sequential reader over the header bytes.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take<const N: usize>(&mut self, what: &str) -> Result<[u8; N], CoreError> {
        let end = self.pos + N;
        let bytes: [u8; N] = self
            .data
            .get(self.pos..end)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| CoreError::InvalidBackupFormat(format!("Truncated while reading {what}")))?;
        self.pos = end;
        Ok(bytes)
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

/// Assemble a backup from its header and ciphertext.
pub fn encode(header: &BackupHeader, ciphertext: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    header.write_to(&mut buf);
    buf.extend_from_slice(ciphertext);
    buf
}

/// Split raw backup bytes into a validated header and the ciphertext.
pub fn decode(data: &[u8]) -> Result<(BackupHeader, &[u8]), CoreError> {
    if data.len() < HEADER_LEN + TAG_LEN {
        return Err(CoreError::InvalidBackupFormat(
            "Data too small to be a valid backup".into(),
        ));
    }

    let mut reader = Reader { data, pos: 0 };
    if &reader.take::<4>("magic")? != MAGIC {
        return Err(CoreError::InvalidBackupFormat(
            "Invalid magic bytes — not a budget backup".into(),
        ));
    }

    let version = u16::from_le_bytes(reader.take("version")?);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: u32::from_le_bytes(reader.take("memory_cost")?),
        time_cost: u32::from_le_bytes(reader.take("time_cost")?),
        parallelism: u32::from_le_bytes(reader.take("parallelism")?),
    };
    kdf_params.validate()?;

    let header = BackupHeader {
        version,
        kdf_params,
        salt: reader.take("salt")?,
        nonce: reader.take("nonce")?,
    };
    Ok((header, reader.rest()))
}

/// Encrypt a snapshot with default KDF parameters.
pub fn export_backup(snapshot: &BudgetSnapshot, password: &str) -> Result<Vec<u8>, CoreError> {
    export_backup_with(snapshot, password, KdfParams::default())
}

/// Flow: snapshot → JSON → AES-256-GCM(Argon2id(password, salt)) → backup bytes
pub fn export_backup_with(
    snapshot: &BudgetSnapshot,
    password: &str,
    kdf_params: KdfParams,
) -> Result<Vec<u8>, CoreError> {
    if password.is_empty() {
        return Err(CoreError::MissingField("password".into()));
    }
    kdf_params.validate()?;

    let plaintext = serde_json::to_vec(snapshot)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))?;
    let salt = random_bytes::<SALT_LEN>()?;
    let key = BackupKey::derive(password, &salt, &kdf_params)?;
    let (nonce, ciphertext) = key.seal(&plaintext)?;

    let header = BackupHeader {
        version: CURRENT_VERSION,
        kdf_params,
        salt,
        nonce,
    };
    debug!(bytes = HEADER_LEN + ciphertext.len(), "backup exported");
    Ok(encode(&header, &ciphertext))
}

/// Decrypt backup bytes back into a snapshot.
pub fn import_backup(data: &[u8], password: &str) -> Result<BudgetSnapshot, CoreError> {
    let (header, ciphertext) = decode(data)?;
    let key = BackupKey::derive(password, &header.salt, &header.kdf_params)?;
    let plaintext = key.open(&header.nonce, ciphertext)?;
    serde_json::from_slice(&plaintext)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize snapshot: {e}")))
}
