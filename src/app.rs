use crate::admin::{AdminDashboard, AdminLogin};
use crate::api::Api;
use crate::config::{configured_base, resolve_base, DEV_BASE};
use crate::dashboard::Dashboard;
use crate::login::Login;
use crate::route::{screen, Screen, Surface};
use crate::state::{Session, Student};
use leptos::logging::{error, log};
use leptos::*;
use url::Url;

fn api_base() -> Url {
    let origin = window().location().origin().unwrap_or_default();
    resolve_base(&origin, configured_base()).unwrap_or_else(|err| {
        error!("Invalid api base {}: {err}", configured_base());
        Url::parse(DEV_BASE).expect("Development base")
    })
}

#[component]
pub fn App() -> impl IntoView {
    let base = api_base();
    log!("Using api at {base}");
    provide_context(Api::new(base));

    let path = window().location().pathname().unwrap_or_default();
    let surface = Surface::from_path(&path);

    let session = create_rw_signal(Session::Anonymous);
    let (admin, set_admin) = create_signal(false);

    let on_login = Callback::new(move |student: Student| session.update(|s| s.login(student)));
    let on_logout = Callback::new(move |()| {
        log!("Logged out");
        session.update(|s| s.logout());
    });

    let current =
        create_memo(move |_| session.with(|session| screen(surface, session, admin.get())));

    move || match current.get() {
        Screen::AdminLogin => {
            view! { <AdminLogin on_authorized=move |()| set_admin.set(true) /> }.into_view()
        }
        Screen::AdminDashboard => {
            view! { <AdminDashboard on_sign_out=move |()| set_admin.set(false) /> }.into_view()
        }
        Screen::StudentLogin => view! { <Login on_login /> }.into_view(),
        Screen::Dashboard(student) => view! { <Dashboard student on_logout /> }.into_view(),
    }
}
