use crate::api::ApiError;
use crate::state::AppContext;
use leptos::prelude::*;

/// Returns a handler for failed authenticated calls: on 401 it ends the
/// session and reports `true`. The route guard then sends the viewer to the
/// login page. Any other error is left to the caller.
pub(crate) fn use_session_expiry() -> impl Fn(&ApiError) -> bool + Copy + 'static {
    let app_state = expect_context::<AppContext>();

    move |e: &ApiError| app_state.0.handle_api_error(e)
}
