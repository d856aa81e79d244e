/// Current Unix time in milliseconds.
pub(crate) fn unix_millis() -> u64 {
    #[cfg(target_family = "wasm")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_family = "wasm"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}
