use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chat,
    Complaint,
    History,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Chat, Tab::Complaint, Tab::History];

    fn label(&self) -> &'static str {
        match self {
            Tab::Chat => "💬 🤖 Smart Assistant",
            Tab::Complaint => "📋 📝 Submit Complaint",
            Tab::History => "📈 📊 My Complaints",
        }
    }
}

#[component]
pub fn Nav(
    #[prop(into)] active: Signal<Tab>,
    #[prop(into)] on_select: Callback<Tab>,
) -> impl IntoView {
    view! {
        <div class="flex gap-2.5 mb-8 border-b-2 border-gray-200 dark:border-gray-700">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if active.get() == tab {
                                    "px-6 py-3 rounded-t-md text-base text-white bg-blue-600 font-bold"
                                } else {
                                    "px-6 py-3 rounded-t-md text-base text-gray-500"
                                }
                            }
                            on:click=move |_| on_select.call(tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
