//! Lead form page component (create and edit modes).

use futures::join;
use lead_core::{toggle_tag, Capability, Lead, LeadPayload, LeadStatus, Note, Role, Tag, User};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::app::Route;
use crate::components::ErrorBanner;
use crate::session::use_session;

/// Properties for LeadFormPage.
#[derive(Properties, PartialEq)]
pub struct LeadFormPageProps {
    /// Id of the lead being edited; `None` means create mode.
    pub id: Option<String>,
}

/// Local form model, decoupled from the wire shape.
#[derive(Clone, PartialEq, Default)]
struct LeadDraft {
    name: String,
    email: String,
    phone: String,
    source: String,
    status: LeadStatus,
    tags: Vec<String>,
    notes: Vec<Note>,
    assigned_to: String,
}

impl LeadDraft {
    fn from_lead(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone().unwrap_or_default(),
            source: lead.source.clone(),
            status: lead.status,
            tags: lead.tag_ids(),
            notes: lead.notes.clone(),
            assigned_to: lead
                .assigned_to
                .as_ref()
                .map(|a| a.id().to_string())
                .unwrap_or_default(),
        }
    }

    fn to_payload(&self) -> LeadPayload {
        LeadPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: (!self.phone.is_empty()).then(|| self.phone.clone()),
            source: self.source.clone(),
            status: self.status,
            tags: self.tags.clone(),
            assigned_to: (!self.assigned_to.is_empty()).then(|| self.assigned_to.clone()),
        }
    }
}

/// Lead form page component.
///
/// Dual-mode on the route id. The tag catalog and eligible assignees load
/// concurrently on mount; edit mode additionally loads the lead itself.
/// Failures here render as an error banner, unlike the dashboard and list.
#[function_component(LeadFormPage)]
pub fn lead_form_page(props: &LeadFormPageProps) -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("lead form rendered outside a router");
    let draft = use_state(LeadDraft::default);
    let tags = use_state(Vec::<Tag>::new);
    let agents = use_state(Vec::<User>::new);
    let new_note = use_state(String::new);
    let new_tag = use_state(String::new);
    let error = use_state(|| None::<String>);
    let editing = props.id.clone();

    {
        let draft = draft.clone();
        let tags = tags.clone();
        let agents = agents.clone();
        let error = error.clone();
        let token = session.token();

        use_effect_with(editing.clone(), move |id| {
            let id = id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let (tags_res, users_res) =
                    join!(api::fetch_tags(&token), api::fetch_users(&token));
                match (tags_res, users_res) {
                    (Ok(catalog), Ok(users)) => {
                        tags.set(catalog);
                        agents.set(
                            users
                                .into_iter()
                                .filter(|u| u.role == Role::SupportAgent)
                                .collect(),
                        );
                    }
                    (Err(err), _) | (_, Err(err)) => {
                        error.set(Some(err.to_string()));
                    }
                }

                if let Some(id) = id {
                    match api::fetch_lead(&token, &id).await {
                        Ok(lead) => draft.set(LeadDraft::from_lead(&lead)),
                        Err(err) => error.set(Some(err.to_string())),
                    }
                }
            });
        });
    }

    let set_field = |apply: fn(&mut LeadDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
        })
    };

    let on_name = set_field(|d, v| d.name = v);
    let on_email = set_field(|d, v| d.email = v);
    let on_phone = set_field(|d, v| d.phone = v);
    let on_source = set_field(|d, v| d.source = v);

    let on_status_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Some(status) = LeadStatus::parse(&select.value()) {
                let mut next = (*draft).clone();
                next.status = status;
                draft.set(next);
            }
        })
    };

    let on_assignee_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.assigned_to = select.value();
            draft.set(next);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let error = error.clone();
        let navigator = navigator.clone();
        let editing = editing.clone();
        let token = session.token();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let payload = draft.to_payload();
            let error = error.clone();
            let navigator = navigator.clone();
            let editing = editing.clone();
            let token = token.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let result = match editing {
                    Some(id) => api::update_lead(&token, &id, &payload).await,
                    None => api::create_lead(&token, &payload).await,
                };
                match result {
                    Ok(()) => navigator.push(&Route::Leads),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_new_note = {
        let new_note = new_note.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            new_note.set(input.value());
        })
    };

    let on_add_note = {
        let draft = draft.clone();
        let new_note = new_note.clone();
        let error = error.clone();
        let editing = editing.clone();
        let token = session.token();

        Callback::from(move |_| {
            let content = new_note.trim().to_string();
            if content.is_empty() {
                return;
            }
            let Some(id) = editing.clone() else {
                return;
            };
            let draft = draft.clone();
            let new_note = new_note.clone();
            let error = error.clone();
            let token = token.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match api::add_note(&token, &id, &content).await {
                    Ok(lead) => {
                        // The server owns note ordering; replace the whole draft.
                        draft.set(LeadDraft::from_lead(&lead));
                        new_note.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_new_tag = {
        let new_tag = new_tag.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            new_tag.set(input.value());
        })
    };

    let on_add_tag = {
        let tags = tags.clone();
        let new_tag = new_tag.clone();
        let error = error.clone();
        let token = session.token();

        Callback::from(move |_| {
            let name = new_tag.trim().to_string();
            if name.is_empty() {
                return;
            }
            let tags = tags.clone();
            let new_tag = new_tag.clone();
            let error = error.clone();
            let token = token.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match api::create_tag(&token, &name).await {
                    Ok(tag) => {
                        let mut catalog = (*tags).clone();
                        catalog.push(tag);
                        tags.set(catalog);
                        new_tag.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_toggle_tag = {
        let draft = draft.clone();
        let error = error.clone();
        let editing = editing.clone();
        let token = session.token();

        Callback::from(move |tag_id: String| {
            let mut next = (*draft).clone();
            match editing.clone() {
                // Create mode: toggle the draft set locally; the tags go out
                // with the create payload.
                None => {
                    toggle_tag(&mut next.tags, &tag_id);
                    draft.set(next);
                }
                // Edit mode: mutate the local set only after the server
                // acknowledges the add/remove.
                Some(id) => {
                    let attached = next.tags.iter().any(|t| *t == tag_id);
                    let draft = draft.clone();
                    let error = error.clone();
                    let token = token.clone();

                    wasm_bindgen_futures::spawn_local(async move {
                        let result = if attached {
                            api::remove_lead_tag(&token, &id, &tag_id).await
                        } else {
                            api::add_lead_tag(&token, &id, &tag_id).await
                        };
                        match result {
                            Ok(()) => {
                                toggle_tag(&mut next.tags, &tag_id);
                                draft.set(next);
                            }
                            Err(err) => error.set(Some(err.to_string())),
                        }
                    });
                }
            }
        })
    };

    let on_cancel = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Leads))
    };

    let is_edit = editing.is_some();
    let can_assign = session.can(Capability::AssignLead);

    html! {
        <div>
            <h1>{ if is_edit { "Edit Lead" } else { "Add Lead" } }</h1>
            <ErrorBanner message={(*error).clone()} />

            <form class="card" {onsubmit}>
                <div class="form-grid">
                    <div class="form-field">
                        <label>{"Name"}</label>
                        <input type="text" value={draft.name.clone()} oninput={on_name} required=true />
                    </div>
                    <div class="form-field">
                        <label>{"Email"}</label>
                        <input type="email" value={draft.email.clone()} oninput={on_email} required=true />
                    </div>
                    <div class="form-field">
                        <label>{"Phone"}</label>
                        <input type="text" value={draft.phone.clone()} oninput={on_phone} />
                    </div>
                    <div class="form-field">
                        <label>{"Source"}</label>
                        <input type="text" value={draft.source.clone()} oninput={on_source} />
                    </div>
                    <div class="form-field">
                        <label>{"Status"}</label>
                        <select onchange={on_status_change}>
                            { for LeadStatus::ALL.iter().map(|status| {
                                html! {
                                    <option
                                        value={status.as_str()}
                                        selected={draft.status == *status}
                                    >
                                        { status.as_str() }
                                    </option>
                                }
                            })}
                        </select>
                    </div>
                    if can_assign {
                        <div class="form-field">
                            <label>{"Assign To"}</label>
                            <select onchange={on_assignee_change}>
                                <option value="" selected={draft.assigned_to.is_empty()}>
                                    {"Unassigned"}
                                </option>
                                { for agents.iter().map(|agent| {
                                    html! {
                                        <option
                                            value={agent.id.clone()}
                                            selected={draft.assigned_to == agent.id}
                                        >
                                            { &agent.name }
                                        </option>
                                    }
                                })}
                            </select>
                        </div>
                    }
                </div>

                <div class="form-field">
                    <label>{"Tags"}</label>
                    <div class="tag-row">
                        { for tags.iter().map(|tag| {
                            let on_toggle_tag = on_toggle_tag.clone();
                            let id = tag.id.clone();
                            let attached = draft.tags.iter().any(|t| *t == tag.id);
                            html! {
                                <button
                                    type="button"
                                    class={if attached { "tag-chip active" } else { "tag-chip" }}
                                    onclick={move |_| on_toggle_tag.emit(id.clone())}
                                >
                                    { &tag.name }
                                </button>
                            }
                        })}
                    </div>
                    <div class="inline-row">
                        <input
                            type="text"
                            placeholder="New tag"
                            value={(*new_tag).clone()}
                            oninput={on_new_tag}
                        />
                        <button type="button" class="btn btn-primary" onclick={on_add_tag}>
                            {"Add Tag"}
                        </button>
                    </div>
                </div>

                if is_edit {
                    <div class="form-field">
                        <label>{"Add Note"}</label>
                        <div class="inline-row">
                            <input
                                type="text"
                                placeholder="Add a note"
                                value={(*new_note).clone()}
                                oninput={on_new_note}
                            />
                            <button type="button" class="btn btn-primary" onclick={on_add_note}>
                                {"Add Note"}
                            </button>
                        </div>
                        <ul class="note-list">
                            { for draft.notes.iter().map(|note| {
                                html! {
                                    <li>
                                        { &note.content }
                                        <span class="note-date">
                                            { format!(" ({})", note.created_at.format("%Y-%m-%d")) }
                                        </span>
                                    </li>
                                }
                            })}
                        </ul>
                    </div>
                }

                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                        {"Cancel"}
                    </button>
                    <button type="submit" class="btn btn-primary">
                        { if is_edit { "Update Lead" } else { "Create Lead" } }
                    </button>
                </div>
            </form>
        </div>
    }
}
