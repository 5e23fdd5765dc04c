//! Error banner rendered near the top of a view after a failed request.

use yew::prelude::*;

/// Properties for ErrorBanner component.
#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: Option<String>,
}

/// Renders the captured error string, or nothing when there is none.
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    match &props.message {
        Some(message) => html! { <p class="error-banner">{ message }</p> },
        None => Html::default(),
    }
}
