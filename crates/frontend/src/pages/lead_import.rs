//! Lead import page component.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::app::Route;
use crate::components::ErrorBanner;
use crate::session::use_session;

/// Lead import page component.
///
/// Wraps a single spreadsheet file in a multipart upload; the server does all
/// parsing and validation of the file contents.
#[function_component(LeadImportPage)]
pub fn lead_import_page() -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("lead import rendered outside a router");
    let file = use_state(|| None::<web_sys::File>);
    let error = use_state(|| None::<String>);

    let on_file_change = {
        let file = file.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            file.set(input.files().and_then(|list| list.get(0)));
            error.set(None);
        })
    };

    let onsubmit = {
        let file = file.clone();
        let error = error.clone();
        let navigator = navigator.clone();
        let token = session.token();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(selected) = (*file).clone() else {
                error.set(Some("Please select a file".to_string()));
                return;
            };
            let error = error.clone();
            let navigator = navigator.clone();
            let token = token.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match api::import_leads(&token, &selected).await {
                    Ok(()) => navigator.push(&Route::Leads),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_cancel = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Leads))
    };

    html! {
        <div>
            <h1>{"Import Leads"}</h1>
            <form class="card" {onsubmit}>
                <ErrorBanner message={(*error).clone()} />
                <div class="form-field">
                    <label>{"Upload Excel File"}</label>
                    <input type="file" accept=".xlsx,.xls" onchange={on_file_change} />
                    <p class="hint">
                        {"File should contain columns: name, email, phone, source, status"}
                    </p>
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                        {"Cancel"}
                    </button>
                    <button type="submit" class="btn btn-primary">
                        {"Import"}
                    </button>
                </div>
            </form>
        </div>
    }
}
