use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::error;
use rand::RngCore;
use rand::rngs::OsRng;
use uuid::{Builder, Uuid};

/// Source of fresh task ids.
///
/// Any `FnMut() -> String` closure is a generator, which lets tests hand the
/// store a deterministic sequence.
pub trait IdGenerator {
    fn generate_id(&mut self) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn generate_id(&mut self) -> String {
        self()
    }
}

/// Random version-4 UUIDs rendered upper-case, e.g.
/// `3F2504E0-4F89-41D3-9A0C-0305E82C3301`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => uuid_from_bytes(bytes),
            Err(err) => {
                let id = fallback_id();
                error!(
                    "event=id_generate status=error fallback={} error={}",
                    id, err
                );
                id
            }
        }
    }
}

/// Format 16 random bytes as a v4 UUID string.
pub fn uuid_from_bytes(bytes: [u8; 16]) -> String {
    let uuid = Builder::from_random_bytes(bytes).into_uuid();
    let mut buf = Uuid::encode_buffer();
    uuid.hyphenated().encode_upper(&mut buf).to_string()
}

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Id used when the OS random source is unavailable: clock plus a
/// per-process counter, so two calls never collide within one run.
pub fn fallback_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let seq = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("fallback-{:x}-{}", nanos, seq)
}
