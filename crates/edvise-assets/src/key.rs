//! Object key generation.
//!
//! Keys look like `{category}/{token}_{millis}.{ext}` where the token is 13
//! base-36 characters. The token is low entropy; combined with a millisecond
//! timestamp it is adequate for this application's write volume, but it is
//! not cryptographically collision-resistant.

use chrono::Utc;
use edvise_core::AssetCategory;

const TOKEN_LEN: usize = 13;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a storage key for `original_filename` under `category`.
///
/// The original filename contributes only its extension; a name without an
/// extension yields a key without one.
pub fn object_key(original_filename: &str, category: AssetCategory) -> String {
    let token = base36_token(uuid::Uuid::new_v4().as_u128());
    let millis = Utc::now().timestamp_millis();
    let stem = format!("{}/{token}_{millis}", category.path_prefix());
    match extension(original_filename) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

fn extension(filename: &str) -> Option<&str> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext) }
}

fn base36_token(mut n: u128) -> String {
    let mut out = String::with_capacity(TOKEN_LEN);
    for _ in 0..TOKEN_LEN {
        let digit = (n % 36) as usize;
        out.push(BASE36[digit] as char);
        n /= 36;
    }
    out
}
