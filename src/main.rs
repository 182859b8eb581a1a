mod admin;
mod api;
mod app;
mod complaint;
mod config;
mod conversation;
mod dashboard;
mod history;
mod loading;
mod login;
mod message;
mod nav;
mod route;
mod state;
mod transcript;

use app::*;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! { <App /> }
    })
}
