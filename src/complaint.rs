use crate::api::{Api, ClassifyRequest};
use crate::history::category_icon;
use crate::state::{Category, Filed, Turn};
use crate::transcript::prefill_body;
use leptos::ev::SubmitEvent;
use leptos::logging::{log, warn};
use leptos::*;
use std::time::Duration;

const COMPLETION_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter both your name and complaint")]
    Missing,
}

/// Builds the classification request, or refuses when the name or the body
/// is blank.
pub fn classify_request(
    student_id: &str,
    student_name: &str,
    complaint_text: &str,
    category: Option<Category>,
) -> Result<ClassifyRequest, FormError> {
    if student_name.trim().is_empty() || complaint_text.trim().is_empty() {
        return Err(FormError::Missing);
    }
    Ok(ClassifyRequest {
        student_id: student_id.to_string(),
        student_name: student_name.to_string(),
        complaint_text: complaint_text.to_string(),
        complaint_type: category.map(|c| c.as_str().to_string()).unwrap_or_default(),
    })
}

/// A form opened with a handed-over transcript counts as coming from chat,
/// even when the student never typed a message.
pub fn from_chat(turns: &[Turn]) -> bool {
    !turns.is_empty()
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Filed(Filed),
    Failed(String),
}

#[component]
pub fn ComplaintForm(
    #[prop(into)] student_id: String,
    #[prop(into)] initial_name: String,
    #[prop(into)] transcript: Signal<Vec<Turn>>,
    #[prop(optional, into)] on_back: Option<Callback<()>>,
    #[prop(optional, into)] on_submitted: Option<Callback<()>>,
) -> impl IntoView {
    let api = expect_context::<Api>();
    let (name, set_name) = create_signal(initial_name);
    let (body, set_body) = create_signal(String::new());
    let (category, set_category) = create_signal(None::<Category>);
    let (outcome, set_outcome) = create_signal(None::<Outcome>);
    let (loading, set_loading) = create_signal(false);

    create_effect(move |_| {
        let prefill = transcript.with(|turns| prefill_body(turns));
        if !prefill.is_empty() {
            set_body.set(prefill);
        }
    });

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = match classify_request(&student_id, &name.get(), &body.get(), category.get())
        {
            Ok(request) => request,
            Err(err) => {
                if let Err(err) = window().alert_with_message(&err.to_string()) {
                    warn!("Could not show alert: {err:?}");
                }
                return;
            }
        };
        set_loading.set(true);
        set_outcome.set(None);
        let api = api.clone();
        spawn_local(async move {
            match api.classify_complaint(&request).await {
                Ok(filed) => {
                    log!("Filed complaint {} as {}", filed.id, filed.category);
                    set_outcome.set(Some(Outcome::Filed(filed)));
                    set_body.set(String::new());
                    if let Some(on_submitted) = on_submitted {
                        set_timeout(move || on_submitted.call(()), COMPLETION_DELAY);
                    }
                }
                Err(err) => {
                    warn!("Filing failed: {err}");
                    set_outcome.set(Some(Outcome::Failed(err.to_string())));
                }
            }
            set_loading.set(false);
        });
    };

    let chat_origin = move || transcript.with(|turns| from_chat(turns));

    view! {
        <div class="max-w-2xl mx-auto my-12 p-8 dark:text-white">
            <div class="flex justify-between items-center mb-8">
                <h1 class="text-2xl font-bold">"📝 Submit Complaint"</h1>
                {on_back
                    .map(|on_back| {
                        view! {
                            <button
                                type="button"
                                class="px-4 py-2 text-white bg-gray-500 rounded"
                                on:click=move |_| on_back.call(())
                            >
                                "← Back to Chat"
                            </button>
                        }
                    })}
            </div>
            <form
                class="p-8 bg-gray-50 rounded-lg shadow dark:bg-gray-700"
                on:submit=submit
            >
                <label for="student-name" class="block mb-2 font-semibold">
                    "Your Name:"
                </label>
                <input
                    id="student-name"
                    type="text"
                    placeholder="Enter your full name"
                    class="block w-full mb-5 p-3 text-gray-900 bg-white border-2 border-gray-300 rounded"
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    prop:value=name
                />
                <label for="complaint-type" class="block mb-2 font-semibold">
                    "Complaint Type:"
                </label>
                <select
                    id="complaint-type"
                    class="block w-full mb-5 p-3 text-gray-900 bg-white border-2 border-gray-300 rounded"
                    on:change=move |ev| {
                        set_category.set(event_target_value(&ev).parse::<Category>().ok())
                    }
                    prop:value=move || category.get().map(|c| c.as_str()).unwrap_or_default()
                >
                    <option value="">
                        "Select complaint type (optional - AI will classify if not selected)"
                    </option>
                    {Category::ALL
                        .into_iter()
                        .map(|category| {
                            view! {
                                <option value=category.as_str()>
                                    {category_icon(category.as_str())} " "
                                    {category.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <label for="complaint" class="block mb-2 font-semibold">
                    "Your Complaint:"
                </label>
                <textarea
                    id="complaint"
                    rows="5"
                    placeholder="e.g., The WiFi is not working in the library, or The food in mess hall is cold"
                    class="block w-full mb-6 p-3 text-gray-900 bg-white border-2 border-gray-300 rounded resize-y"
                    on:input=move |ev| set_body.set(event_target_value(&ev))
                    prop:value=body
                ></textarea>
                <button
                    type="submit"
                    disabled=loading
                    class="w-full px-8 py-3 text-lg font-bold text-white bg-blue-600 rounded disabled:bg-gray-500 disabled:cursor-not-allowed"
                >
                    {move || if loading.get() { "🔄 Analyzing..." } else { "📝 Submit Complaint" }}
                </button>
            </form>
            {move || {
                outcome
                    .get()
                    .map(|outcome| match outcome {
                        Outcome::Failed(error) => {
                            view! {
                                <div class="mt-6 p-5 text-red-900 bg-red-100 border-2 border-red-200 rounded-lg">
                                    <strong>"❌ Error: " {error}</strong>
                                </div>
                            }
                        }
                        Outcome::Filed(filed) => {
                            view! {
                                <div class="mt-6 p-5 text-cyan-900 bg-cyan-50 border-2 border-cyan-200 rounded-lg">
                                    <h3 class="mb-4 text-lg font-bold">
                                        "✅ Complaint Submitted Successfully!"
                                    </h3>
                                    <p>
                                        <strong>"Complaint ID: "</strong>
                                        {filed.reference()}
                                    </p>
                                    <p>
                                        <strong>"Category: "</strong>
                                        {filed.category.clone()}
                                    </p>
                                    <p>
                                        <strong>"Priority: "</strong>
                                        {filed.priority()}
                                    </p>
                                    <p>
                                        <strong>"Status: "</strong>
                                        "Pending Review"
                                    </p>
                                    <p class="mt-4 text-sm italic">
                                        "💡 Your complaint has been logged and will be reviewed by the admin team."
                                    </p>
                                    <Show when=chat_origin>
                                        <div class="mt-4 p-2.5 text-sm text-gray-500 bg-gray-50 rounded">
                                            "📋 Based on your chat conversation"
                                        </div>
                                    </Show>
                                </div>
                            }
                        }
                    })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_form_values() {
        let request = classify_request(
            "STU001",
            "John Doe",
            "wifi is down also slow",
            Some(Category::WifiNetwork),
        )
        .unwrap();
        assert_eq!(request.student_id, "STU001");
        assert_eq!(request.student_name, "John Doe");
        assert_eq!(request.complaint_text, "wifi is down also slow");
        assert_eq!(request.complaint_type, "WiFi/Network");
    }

    #[test]
    fn unset_category_is_empty() {
        let request = classify_request("STU001", "John", "cold food", None).unwrap();
        assert_eq!(request.complaint_type, "");
    }

    #[test]
    fn handoff_marks_chat_origin() {
        assert!(!from_chat(&[]));
        assert!(from_chat(&[Turn::assistant("Hello! How can I help?")]));
        assert!(from_chat(&[
            Turn::assistant("Hello! How can I help?"),
            Turn::user("wifi is down"),
        ]));
    }

    #[test]
    fn blank_name_or_body_blocks() {
        assert_eq!(
            classify_request("STU001", " ", "cold food", None),
            Err(FormError::Missing)
        );
        assert_eq!(
            classify_request("STU001", "John", "\n\t", Some(Category::Mess)),
            Err(FormError::Missing)
        );
    }
}
