//! Lead list page component.

use futures::join;
use lead_core::{Capability, Lead, LeadFilters, LeadStatus, Tag};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::app::Route;
use crate::components::Loading;
use crate::download;
use crate::logging::log_error;
use crate::session::use_session;

/// Lead list page component.
///
/// Leads and the tag catalog are fetched concurrently on mount; filtering is
/// recomputed from the unfiltered in-memory collection on every render. A
/// failed mount fetch is logged and the table renders empty.
#[function_component(LeadListPage)]
pub fn lead_list_page() -> Html {
    let session = use_session();
    let leads = use_state(Vec::<Lead>::new);
    let tags = use_state(Vec::<Tag>::new);
    let filters = use_state(LeadFilters::default);
    let loading = use_state(|| true);

    {
        let leads = leads.clone();
        let tags = tags.clone();
        let loading = loading.clone();
        let token = session.token();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let (leads_res, tags_res) = join!(api::fetch_leads(&token), api::fetch_tags(&token));
                match leads_res {
                    Ok(data) => leads.set(data),
                    Err(err) => log_error("Failed to fetch leads", &err),
                }
                match tags_res {
                    Ok(data) => tags.set(data),
                    Err(err) => log_error("Failed to fetch tags", &err),
                }
                loading.set(false);
            });
        });
    }

    let on_status_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*filters).clone();
            next.status = select.value();
            filters.set(next);
        })
    };

    let on_tag_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*filters).clone();
            next.tag = select.value();
            filters.set(next);
        })
    };

    let on_search_input = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filters).clone();
            next.search = input.value();
            filters.set(next);
        })
    };

    let on_start_date = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filters).clone();
            next.start_date = input.value();
            filters.set(next);
        })
    };

    let on_end_date = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filters).clone();
            next.end_date = input.value();
            filters.set(next);
        })
    };

    let on_export = {
        let token = session.token();
        Callback::from(move |_| {
            let token = token.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::export_leads(&token).await {
                    Ok(bytes) => {
                        if let Err(err) = download::save_spreadsheet("leads.xlsx", &bytes) {
                            gloo_timers::callback::Timeout::new(0, move || {
                                web_sys::console::error_1(&err);
                            })
                            .forget();
                        }
                    }
                    Err(err) => log_error("Failed to export leads", &err),
                }
            });
        })
    };

    let on_delete = {
        let leads = leads.clone();
        let token = session.token();
        Callback::from(move |id: String| {
            if !gloo_dialogs::confirm("Are you sure you want to delete this lead?") {
                return;
            }
            let leads = leads.clone();
            let token = token.clone();
            let remaining: Vec<Lead> = leads.iter().filter(|l| l.id != id).cloned().collect();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_lead(&token, &id).await {
                    Ok(()) => leads.set(remaining),
                    Err(err) => log_error("Failed to delete lead", &err),
                }
            });
        })
    };

    if *loading {
        return html! { <Loading /> };
    }

    let can_delete = session.can(Capability::DeleteLead);
    let filtered: Vec<&Lead> = leads.iter().filter(|l| filters.matches(l)).collect();

    html! {
        <div>
            <div class="page-header">
                <h1>{"Leads"}</h1>
                <div class="page-actions">
                    <Link<Route> to={Route::LeadNew} classes="btn btn-primary">
                        {"Add Lead"}
                    </Link<Route>>
                    <Link<Route> to={Route::LeadImport} classes="btn btn-secondary">
                        {"Import Leads"}
                    </Link<Route>>
                    <button class="btn btn-secondary" onclick={on_export}>
                        {"Export to Excel"}
                    </button>
                </div>
            </div>

            <div class="card filter-bar">
                <div class="form-field">
                    <label>{"Status"}</label>
                    <select class="filter-select" onchange={on_status_change}>
                        <option value="" selected={filters.status.is_empty()}>{"All"}</option>
                        { for LeadStatus::ALL.iter().map(|status| {
                            html! {
                                <option
                                    value={status.as_str()}
                                    selected={filters.status == status.as_str()}
                                >
                                    { status.as_str() }
                                </option>
                            }
                        })}
                    </select>
                </div>
                <div class="form-field">
                    <label>{"Tag"}</label>
                    <select class="filter-select" onchange={on_tag_change}>
                        <option value="" selected={filters.tag.is_empty()}>{"All"}</option>
                        { for tags.iter().map(|tag| {
                            html! {
                                <option value={tag.id.clone()} selected={filters.tag == tag.id}>
                                    { &tag.name }
                                </option>
                            }
                        })}
                    </select>
                </div>
                <div class="form-field">
                    <label>{"Search"}</label>
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Name, Email, Phone"
                        value={filters.search.clone()}
                        oninput={on_search_input}
                    />
                </div>
                <div class="form-field">
                    <label>{"Start Date"}</label>
                    <input type="date" value={filters.start_date.clone()} oninput={on_start_date} />
                </div>
                <div class="form-field">
                    <label>{"End Date"}</label>
                    <input type="date" value={filters.end_date.clone()} oninput={on_end_date} />
                </div>
            </div>

            <div class="card">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Email"}</th>
                            <th>{"Phone"}</th>
                            <th>{"Status"}</th>
                            <th>{"Tags"}</th>
                            <th>{"Assigned To"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for filtered.iter().map(|lead| {
                            let tag_names = lead.tag_names().join(", ");
                            let on_delete = on_delete.clone();
                            let id = lead.id.clone();
                            html! {
                                <tr key={lead.id.clone()}>
                                    <td>{ &lead.name }</td>
                                    <td>{ &lead.email }</td>
                                    <td>{ lead.phone.as_deref().unwrap_or("-") }</td>
                                    <td>{ lead.status.as_str() }</td>
                                    <td>{ if tag_names.is_empty() { "-".to_string() } else { tag_names } }</td>
                                    <td>{ lead.assignee_name().unwrap_or("Unassigned") }</td>
                                    <td>
                                        <Link<Route>
                                            to={Route::LeadEdit { id: lead.id.clone() }}
                                            classes="link-action"
                                        >
                                            {"Edit"}
                                        </Link<Route>>
                                        if can_delete {
                                            <button
                                                class="link-action danger"
                                                onclick={move |_| on_delete.emit(id.clone())}
                                            >
                                                {"Delete"}
                                            </button>
                                        }
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
