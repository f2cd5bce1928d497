pub mod clientes;
pub mod connection;
pub mod obras;

pub use connection::{init_db, Database};

use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// Random URL-safe document id, in the spirit of the hosted store the
/// collections came from.
pub(crate) fn nuevo_documento_id() -> String {
    let mut bytes = [0u8; 15];
    OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
