//! User management page component.

use lead_core::{ActivityLogEntry, Role, User, UserPayload};
use yew::prelude::*;

use crate::api;
use crate::components::{ErrorBanner, Loading};
use crate::session::use_session;

/// Local form state shared by create and edit modes.
#[derive(Clone, PartialEq)]
struct UserForm {
    name: String,
    email: String,
    password: String,
    role: Role,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::SupportAgent,
        }
    }
}

impl UserForm {
    /// Build the request body; a blank password on edit means "unchanged".
    fn to_payload(&self) -> UserPayload {
        UserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            role: self.role,
        }
    }
}

fn format_logs(entries: &[ActivityLogEntry]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "{} at {}",
                entry.action,
                entry.timestamp.format("%Y-%m-%d %H:%M:%S")
            )
        })
        .collect();
    format!("Activity Logs:\n{}", lines.join("\n"))
}

/// User management page component.
///
/// One form serves create (register endpoint) and edit (per-user endpoint),
/// switched by the tracked editing id. Unlike the dashboard and lead list,
/// every failure here surfaces as an error banner.
#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let session = use_session();
    let users = use_state(Vec::<User>::new);
    let form = use_state(UserForm::default);
    let editing_id = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| true);

    {
        let users = users.clone();
        let error = error.clone();
        let loading = loading.clone();
        let token = session.token();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_users(&token).await {
                    Ok(data) => users.set(data),
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        });
    }

    let set_field = |apply: fn(&mut UserForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            form.set(next);
        })
    };

    let on_name = set_field(|f, v| f.name = v);
    let on_email = set_field(|f, v| f.email = v);
    let on_password = set_field(|f, v| f.password = v);

    let on_role_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.role = match select.value().as_str() {
                "sub_admin" => Role::SubAdmin,
                _ => Role::SupportAgent,
            };
            form.set(next);
        })
    };

    let onsubmit = {
        let users = users.clone();
        let form = form.clone();
        let editing_id = editing_id.clone();
        let error = error.clone();
        let token = session.token();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let users = users.clone();
            let form = form.clone();
            let editing_id = editing_id.clone();
            let error = error.clone();
            let token = token.clone();
            let payload = form.to_payload();

            wasm_bindgen_futures::spawn_local(async move {
                let result = match (*editing_id).clone() {
                    Some(id) => {
                        match api::update_user(&token, &id, &payload).await {
                            Ok(()) => {
                                // Merge the acknowledged edit into the local row.
                                let updated: Vec<User> = users
                                    .iter()
                                    .map(|user| {
                                        if user.id == id {
                                            User {
                                                id: user.id.clone(),
                                                name: payload.name.clone(),
                                                email: payload.email.clone(),
                                                role: payload.role,
                                            }
                                        } else {
                                            user.clone()
                                        }
                                    })
                                    .collect();
                                users.set(updated);
                                Ok(())
                            }
                            Err(err) => Err(err),
                        }
                    }
                    None => {
                        // Refetch after acknowledgment; the register endpoint
                        // owns the new user's id.
                        match api::register_user(&token, &payload).await {
                            Ok(()) => match api::fetch_users(&token).await {
                                Ok(data) => {
                                    users.set(data);
                                    Ok(())
                                }
                                Err(err) => Err(err),
                            },
                            Err(err) => Err(err),
                        }
                    }
                };
                match result {
                    Ok(()) => {
                        form.set(UserForm::default());
                        editing_id.set(None);
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        let editing_id = editing_id.clone();
        Callback::from(move |user: User| {
            form.set(UserForm {
                name: user.name.clone(),
                email: user.email.clone(),
                password: String::new(),
                role: user.role,
            });
            editing_id.set(Some(user.id));
        })
    };

    let on_cancel_edit = {
        let form = form.clone();
        let editing_id = editing_id.clone();
        Callback::from(move |_| {
            form.set(UserForm::default());
            editing_id.set(None);
        })
    };

    let on_delete = {
        let users = users.clone();
        let error = error.clone();
        let token = session.token();
        Callback::from(move |id: String| {
            if !gloo_dialogs::confirm("Are you sure you want to delete this user?") {
                return;
            }
            let users = users.clone();
            let error = error.clone();
            let token = token.clone();
            let remaining: Vec<User> = users.iter().filter(|u| u.id != id).cloned().collect();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_user(&token, &id).await {
                    Ok(()) => users.set(remaining),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_view_logs = {
        let error = error.clone();
        let token = session.token();
        Callback::from(move |id: String| {
            let error = error.clone();
            let token = token.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_user_logs(&token, &id).await {
                    Ok(entries) => gloo_dialogs::alert(&format_logs(&entries)),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    if *loading {
        return html! { <Loading /> };
    }

    let is_edit = editing_id.is_some();

    html! {
        <div>
            <h1>{"User Management"}</h1>
            <ErrorBanner message={(*error).clone()} />

            <form class="card" {onsubmit}>
                <div class="form-grid">
                    <div class="form-field">
                        <label>{"Name"}</label>
                        <input type="text" value={form.name.clone()} oninput={on_name} required=true />
                    </div>
                    <div class="form-field">
                        <label>{"Email"}</label>
                        <input type="email" value={form.email.clone()} oninput={on_email} required=true />
                    </div>
                    <div class="form-field">
                        <label>{"Password"}</label>
                        <input
                            type="password"
                            value={form.password.clone()}
                            oninput={on_password}
                            placeholder={if is_edit { "Leave blank to keep unchanged" } else { "" }}
                            required={!is_edit}
                        />
                    </div>
                    <div class="form-field">
                        <label>{"Role"}</label>
                        <select onchange={on_role_change}>
                            <option value="sub_admin" selected={form.role == Role::SubAdmin}>
                                {"Sub-Admin"}
                            </option>
                            <option
                                value="support_agent"
                                selected={form.role == Role::SupportAgent}
                            >
                                {"Support Agent"}
                            </option>
                        </select>
                    </div>
                </div>
                <div class="form-actions">
                    if is_edit {
                        <button type="button" class="btn btn-secondary" onclick={on_cancel_edit}>
                            {"Cancel"}
                        </button>
                    }
                    <button type="submit" class="btn btn-primary">
                        { if is_edit { "Update User" } else { "Create User" } }
                    </button>
                </div>
            </form>

            <div class="card">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Email"}</th>
                            <th>{"Role"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for users.iter().map(|user| {
                            let on_edit = on_edit.clone();
                            let on_delete = on_delete.clone();
                            let on_view_logs = on_view_logs.clone();
                            let edit_target = user.clone();
                            let delete_id = user.id.clone();
                            let logs_id = user.id.clone();
                            html! {
                                <tr key={user.id.clone()}>
                                    <td>{ &user.name }</td>
                                    <td>{ &user.email }</td>
                                    <td>{ user.role.label() }</td>
                                    <td>
                                        <button
                                            class="link-action"
                                            onclick={move |_| on_edit.emit(edit_target.clone())}
                                        >
                                            {"Edit"}
                                        </button>
                                        <button
                                            class="link-action danger"
                                            onclick={move |_| on_delete.emit(delete_id.clone())}
                                        >
                                            {"Delete"}
                                        </button>
                                        <button
                                            class="link-action"
                                            onclick={move |_| on_view_logs.emit(logs_id.clone())}
                                        >
                                            {"View Logs"}
                                        </button>
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_logs_joins_entries_with_newlines() {
        let entries = vec![
            ActivityLogEntry {
                action: "login".to_string(),
                timestamp: Utc.timestamp_opt(1_609_459_200, 0).unwrap(),
            },
            ActivityLogEntry {
                action: "created lead".to_string(),
                timestamp: Utc.timestamp_opt(1_609_462_800, 0).unwrap(),
            },
        ];

        let dump = format_logs(&entries);

        assert_eq!(
            dump,
            "Activity Logs:\nlogin at 2021-01-01 00:00:00\ncreated lead at 2021-01-01 01:00:00"
        );
    }

    #[test]
    fn test_blank_password_means_unchanged() {
        let form = UserForm {
            name: "A".to_string(),
            email: "a@example.com".to_string(),
            password: String::new(),
            role: Role::SubAdmin,
        };

        assert!(form.to_payload().password.is_none());
    }
}
