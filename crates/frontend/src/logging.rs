//! Console logging for failures the view degrades over instead of rendering.

use crate::api::ApiError;

/// Log an API failure to the browser console.
///
/// Deferred through a zero-delay timeout so logging from inside a render
/// effect never re-enters the component.
pub fn log_error(context: &str, err: &ApiError) {
    let message = format!("{context}: {err}");
    gloo_timers::callback::Timeout::new(0, move || {
        web_sys::console::error_1(&message.into());
    })
    .forget();
}
