use crate::api::Api;
use crate::complaint::ComplaintForm;
use crate::conversation::Conversation;
use crate::history::{or_empty, History};
use crate::nav::{Nav, Tab};
use crate::state::{Student, Turn};
use crate::transcript::Transcript;
use leptos::logging::log;
use leptos::*;

/// Shows `selected`. Reselecting the tab already showing is ignored so its
/// component keeps its unsent input. Opening the complaint tab directly drops
/// any earlier handoff.
pub fn switch_tab(tab: RwSignal<Tab>, handoff: RwSignal<Vec<Turn>>, selected: Tab) {
    if tab.get_untracked() == selected {
        return;
    }
    if selected == Tab::Complaint {
        handoff.set(vec![]);
    }
    tab.set(selected);
}

#[component]
pub fn Dashboard(student: Student, #[prop(into)] on_logout: Callback<()>) -> impl IntoView {
    let api = expect_context::<Api>();
    let tab = create_rw_signal(Tab::Chat);
    // Outlives tab switches, dropped with the dashboard on logout.
    let transcript = create_rw_signal(Transcript::default());
    let handoff = create_rw_signal(Vec::<Turn>::new());

    let (version, set_version) = create_signal(0u32);
    let complaints = {
        let student_id = student.id.clone();
        create_local_resource(
            move || version.get(),
            move |_| {
                let api = api.clone();
                let student_id = student_id.clone();
                async move { or_empty(api.student_complaints(&student_id).await) }
            },
        )
    };
    let refresh = Callback::new(move |()| set_version.update(|v| *v += 1));

    let on_handoff = Callback::new(move |()| {
        let turns = transcript.with(|t| t.turns().to_vec());
        log!("Handing {} turns to the complaint form", turns.len());
        handoff.set(turns);
        tab.set(Tab::Complaint);
    });
    let on_select = Callback::new(move |selected: Tab| switch_tab(tab, handoff, selected));
    let on_submitted = Callback::new(move |()| {
        refresh.call(());
        tab.set(Tab::History);
    });

    let Student { id, name, email } = student;
    let header = format!("ID: {id} | {email}");
    let welcome = format!("Welcome, {name}! 👋");

    view! {
        <div class="max-w-5xl mx-auto my-5 p-5 dark:text-white">
            <div class="flex justify-between items-center mb-8 p-5 bg-gray-50 rounded-lg dark:bg-gray-800">
                <div>
                    <h1 class="text-2xl font-bold">{welcome}</h1>
                    <p class="mt-1 text-gray-500 dark:text-gray-400">{header}</p>
                </div>
                <button
                    type="button"
                    class="px-5 py-2.5 text-white bg-red-600 rounded"
                    on:click=move |_| on_logout.call(())
                >
                    "🚪 Logout"
                </button>
            </div>
            <Nav active=tab on_select />
            {move || match tab.get() {
                Tab::Chat => {
                    view! { <Conversation name=name.clone() transcript on_handoff /> }.into_view()
                }
                Tab::Complaint => {
                    view! {
                        <ComplaintForm
                            student_id=id.clone()
                            initial_name=name.clone()
                            transcript=handoff
                            on_back=move |()| tab.set(Tab::Chat)
                            on_submitted
                        />
                    }
                        .into_view()
                }
                Tab::History => view! { <History complaints on_refresh=refresh /> }.into_view(),
            }}
        </div>
    }
}
