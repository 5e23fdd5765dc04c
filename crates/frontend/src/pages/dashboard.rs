//! Dashboard page component.

use lead_core::{recent_activity, status_counts, Lead};
use yew::prelude::*;

use crate::api;
use crate::components::{Loading, StatCard};
use crate::logging::log_error;
use crate::session::use_session;

/// Dashboard page component.
///
/// Aggregates the full lead collection into per-status counts and the five
/// most recently updated leads. A failed fetch is logged and the view keeps
/// its empty aggregation instead of rendering an error.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let session = use_session();
    let leads = use_state(Vec::<Lead>::new);
    let loading = use_state(|| true);

    {
        let leads = leads.clone();
        let loading = loading.clone();
        let token = session.token();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_leads(&token).await {
                    Ok(data) => leads.set(data),
                    Err(err) => log_error("Failed to fetch leads", &err),
                }
                loading.set(false);
            });
        });
    }

    if *loading {
        return html! { <Loading /> };
    }

    let counts = status_counts(&leads);
    let recent = recent_activity(&leads);

    html! {
        <div>
            <h1>{"Dashboard"}</h1>

            <div class="stats-grid">
                { for counts.iter().map(|&(status, count)| {
                    html! {
                        <StatCard
                            value={count.to_string()}
                            label={status.as_str()}
                        />
                    }
                })}
            </div>

            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">{"Recent Activity"}</h2>
                </div>
                if recent.is_empty() {
                    <p>{"No leads yet."}</p>
                } else {
                    <ul class="activity-list">
                        { for recent.iter().map(|lead| {
                            html! {
                                <li key={lead.id.clone()}>
                                    { format!(
                                        "{} - {} (Updated: {})",
                                        lead.name,
                                        lead.status.as_str(),
                                        lead.updated_at.format("%Y-%m-%d"),
                                    )}
                                </li>
                            }
                        })}
                    </ul>
                }
            </div>
        </div>
    }
}
