//! Login page component.

use lead_core::LoginPayload;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::app::Route;
use crate::components::ErrorBanner;
use crate::session::{use_session, Session};

/// Login page component.
///
/// Posts credentials and installs the returned session; token issuance and
/// validation are entirely server-side.
#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("login rendered outside a router");
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);

    if session.current().is_some() {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let onsubmit = {
        let session = session.clone();
        let navigator = navigator.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let payload = LoginPayload {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match api::login(&payload).await {
                    Ok(response) => {
                        session.login(Session {
                            token: response.token,
                            user: response.user,
                        });
                        navigator.push(&Route::Dashboard);
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    html! {
        <div class="login-screen">
            <form class="card login-card" {onsubmit}>
                <h1>{"Lead Management"}</h1>
                <ErrorBanner message={(*error).clone()} />
                <div class="form-field">
                    <label>{"Email"}</label>
                    <input type="email" value={(*email).clone()} oninput={on_email} required=true />
                </div>
                <div class="form-field">
                    <label>{"Password"}</label>
                    <input
                        type="password"
                        value={(*password).clone()}
                        oninput={on_password}
                        required=true
                    />
                </div>
                <button type="submit" class="btn btn-primary">{"Sign In"}</button>
            </form>
        </div>
    }
}
