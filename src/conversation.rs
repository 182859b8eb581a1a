use crate::api::{Api, ApiError};
use crate::message::Message;
use crate::transcript::{ChatOutcome, Transcript};
use leptos::ev::KeyboardEvent;
use leptos::logging::{log, warn};
use leptos::*;
use std::time::Duration;

const OFFER_DELAY: Duration = Duration::from_millis(1500);

impl From<Result<String, ApiError>> for ChatOutcome {
    fn from(result: Result<String, ApiError>) -> Self {
        match result {
            Ok(reply) => ChatOutcome::Reply(reply),
            Err(ApiError::Service { status, message }) => {
                warn!("Reply service answered {status}: {message}");
                ChatOutcome::ServiceFailure
            }
            Err(err) => {
                warn!("Reply service unreachable: {err}");
                ChatOutcome::TransportFailure
            }
        }
    }
}

#[component]
pub fn Conversation(
    #[prop(into)] name: String,
    transcript: RwSignal<Transcript>,
    #[prop(into)] on_handoff: Callback<()>,
) -> impl IntoView {
    let api = expect_context::<Api>();
    let (input, set_input) = create_signal(String::new());
    let pending = create_memo(move |_| transcript.with(|t| t.is_pending()));

    let send = move || {
        let message = input.get();
        let Some(request) = transcript.try_update(|t| t.begin(&message)).flatten() else {
            return;
        };
        set_input.set(String::new());
        let api = api.clone();
        spawn_local(async move {
            let outcome = ChatOutcome::from(api.chat(&request).await);
            let offer = transcript
                .try_update(|t| t.finish(outcome))
                .unwrap_or(false);
            if offer {
                log!("Reply suggests a complaint, offering handoff");
                set_timeout(
                    move || {
                        transcript.try_update(|t| t.offer_complaint());
                    },
                    OFFER_DELAY,
                );
            }
        });
    };
    let send_click = send.clone();
    let on_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="max-w-4xl mx-auto p-5">
            <div class="text-center mb-5 dark:text-white">
                <h1 class="text-2xl font-bold">"🛠️ Smart Troubleshooting Assistant"</h1>
                <p class="text-gray-500 dark:text-gray-400">
                    "I'll help diagnose and solve your college issues step-by-step!"
                </p>
            </div>
            <div class="mb-4 p-2.5 text-center font-bold text-green-800 bg-green-50 border border-green-200 rounded">
                "✅ Hi " {name} "! Let's solve your issues together!"
            </div>
            <main class="h-[450px] flex flex-col-reverse overflow-auto border rounded-lg bg-gray-50 dark:bg-gray-800 mb-4">
                <Show when=move || pending.get()>
                    <div class="flex justify-start m-4">
                        <div class="px-4 py-3 rounded-2xl text-blue-700 bg-blue-50 border border-blue-200">
                            "🔍 Analyzing your issue and finding solutions..."
                        </div>
                    </div>
                </Show>
                {move || {
                    transcript
                        .with(|t| t.turns().to_vec())
                        .into_iter()
                        .rev()
                        .map(|turn| view! { <Message turn on_offer=on_handoff /> })
                        .collect_view()
                }}
            </main>
            <div class="flex gap-2.5">
                <textarea
                    rows="2"
                    class="flex-1 p-2.5 text-gray-900 bg-white rounded-lg border-2 border-gray-300 resize-none"
                    placeholder="Describe your problem in detail (e.g., 'WiFi keeps disconnecting in my dorm room')..."
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                    prop:value=input
                ></textarea>
                <button
                    type="button"
                    class="px-5 py-2.5 text-white bg-blue-600 rounded-lg disabled:bg-gray-500 disabled:cursor-not-allowed"
                    disabled=move || pending.get() || input.with(|i| i.trim().is_empty())
                    on:click=move |_| send_click()
                >
                    "Send"
                </button>
            </div>
            <div class="text-center mt-4">
                <button
                    type="button"
                    class="px-5 py-2.5 text-sm text-white bg-green-600 hover:bg-green-700 rounded"
                    on:click=move |_| on_handoff.call(())
                >
                    "📝 Skip Chat & Submit Complaint"
                </button>
            </div>
        </div>
    }
}
