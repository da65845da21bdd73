//! Remote audio byte fetching
//!
//! Catalog tracks reference their audio by URL. The worker fetches the whole
//! object before decoding; there is no sample-streaming pipeline here, the
//! engine's contract is load/play/pause/seek on one resource.

use tracing::debug;

/// Fetch the audio bytes behind `url`.
///
/// Runs on the engine worker thread; failures are reported as network
/// errors through the engine event stream by the caller.
pub(crate) fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    debug!(url, "fetching audio bytes");

    let response =
        reqwest::blocking::get(url).map_err(|err| format!("request failed: {}", err))?;
    let response = response
        .error_for_status()
        .map_err(|err| format!("server rejected request: {}", err))?;
    let bytes = response
        .bytes()
        .map_err(|err| format!("failed to read response body: {}", err))?;

    debug!(url, len = bytes.len(), "fetched audio bytes");
    Ok(bytes.to_vec())
}
