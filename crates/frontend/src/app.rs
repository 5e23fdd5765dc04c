//! Main application component: routing, the route guard, and the shell.

use lead_core::Capability;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    DashboardPage, LeadFormPage, LeadImportPage, LeadListPage, LoginPage, UsersPage,
};
use crate::session::{use_session, SessionProvider};

/// Application routes.
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/")]
    Dashboard,
    #[at("/leads")]
    Leads,
    #[at("/leads/new")]
    LeadNew,
    #[at("/leads/edit/:id")]
    LeadEdit { id: String },
    #[at("/leads/import")]
    LeadImport,
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Route switch function.
///
/// Everything except the login screen renders inside the guard and shell;
/// unknown paths fall back to the dashboard.
fn switch(route: Route) -> Html {
    let page = match route {
        Route::Login => return html! { <LoginPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Leads => html! { <LeadListPage /> },
        Route::LeadNew => html! { <LeadFormPage id={None::<String>} /> },
        Route::LeadEdit { id } => html! { <LeadFormPage id={Some(id)} /> },
        Route::LeadImport => html! { <LeadImportPage /> },
        Route::Users => html! { <UsersPage /> },
        Route::NotFound => return html! { <Redirect<Route> to={Route::Dashboard} /> },
    };

    html! {
        <RequireAuth>
            <Layout>{ page }</Layout>
        </RequireAuth>
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <SessionProvider>
                <Switch<Route> render={switch} />
            </SessionProvider>
        </BrowserRouter>
    }
}

/// Properties for components that wrap a protected subtree.
#[derive(Properties, PartialEq)]
pub struct ChildrenProps {
    pub children: Children,
}

/// Route guard: renders its children only when a session is present.
///
/// No token validation happens client-side; an expired token shows up as
/// failed requests on whatever view loads next.
#[function_component(RequireAuth)]
fn require_auth(props: &ChildrenProps) -> Html {
    let session = use_session();

    if session.current().is_none() {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    html! { <>{ props.children.clone() }</> }
}

/// Shared shell: collapsible sidebar plus the routed content region.
#[function_component(Layout)]
fn layout(props: &ChildrenProps) -> Html {
    let open = use_state(|| false);
    let session = use_session();
    let navigator = use_navigator().expect("layout rendered outside a router");

    let on_toggle = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };

    let on_logout = {
        let session = session.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            session.logout();
            navigator.push(&Route::Login);
        })
    };

    let sidebar_class = if *open { "sidebar open" } else { "sidebar collapsed" };
    let label = |full: &'static str, short: &'static str| if *open { full } else { short };

    html! {
        <div class="app-container">
            <aside class={sidebar_class}>
                <div class="sidebar-header">
                    if *open {
                        <span class="nav-brand">{"Lead Management"}</span>
                    }
                    <button class="sidebar-toggle" onclick={on_toggle}>
                        { if *open { "◄" } else { "►" } }
                    </button>
                </div>
                <nav>
                    <ul class="nav-links">
                        <li>
                            <Link<Route> to={Route::Dashboard}>
                                { label("Dashboard", "D") }
                            </Link<Route>>
                        </li>
                        <li>
                            <Link<Route> to={Route::Leads}>
                                { label("Leads", "L") }
                            </Link<Route>>
                        </li>
                        if session.can(Capability::ManageUsers) {
                            <li>
                                <Link<Route> to={Route::Users}>
                                    { label("Users", "U") }
                                </Link<Route>>
                            </li>
                        }
                    </ul>
                </nav>
                <button class="logout-button" onclick={on_logout}>
                    { label("Logout", "⏻") }
                </button>
            </aside>
            <main class="main-content">
                { props.children.clone() }
            </main>
        </div>
    }
}
