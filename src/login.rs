use crate::api::{Api, ApiError, LoginRequest};
use crate::loading::Spinner;
use crate::state::Student;
use leptos::ev::SubmitEvent;
use leptos::logging::log;
use leptos::*;

pub const CONNECTION_ERROR: &str = "Connection error. Please try again.";

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error("Please enter both Student ID and password")]
    Missing,
}

pub fn credentials(student_id: &str, password: &str) -> Result<LoginRequest, LoginError> {
    if student_id.trim().is_empty() || password.trim().is_empty() {
        return Err(LoginError::Missing);
    }
    Ok(LoginRequest {
        student_id: student_id.to_string(),
        password: password.to_string(),
    })
}

/// Message shown after a failed sign-in attempt.
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Service { message, .. } => message.clone(),
        ApiError::Transport(_) | ApiError::Url(_) => CONNECTION_ERROR.to_string(),
    }
}

#[component]
pub fn Login(#[prop(into)] on_login: Callback<Student>) -> impl IntoView {
    let api = expect_context::<Api>();
    let (student_id, set_student_id) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = match credentials(&student_id.get(), &password.get()) {
            Ok(request) => request,
            Err(err) => {
                set_error.set(Some(err.to_string()));
                return;
            }
        };
        set_loading.set(true);
        set_error.set(None);
        let api = api.clone();
        spawn_local(async move {
            match api.student_login(&request).await {
                Ok(student) => {
                    log!("Logged in as {}", student.id);
                    on_login.call(student);
                }
                Err(err) => {
                    log!("Login failed: {err}");
                    set_error.set(Some(failure_message(&err)));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center w-full min-h-screen bg-gray-50 dark:bg-gray-800">
            <div class="w-full max-w-md p-10 bg-white rounded-xl shadow-lg dark:bg-gray-700 dark:text-white">
                <div class="text-center mb-8">
                    <h1 class="text-2xl font-bold mb-2">"🎓 Student Portal"</h1>
                    <p class="text-gray-500 dark:text-gray-400">"Login to access support services"</p>
                </div>
                <form on:submit=submit>
                    <label for="student-id" class="block mb-2 font-semibold">
                        "Student ID:"
                    </label>
                    <input
                        id="student-id"
                        type="text"
                        placeholder="e.g., STU001"
                        class="block w-full mb-5 p-2.5 text-sm text-gray-900 bg-white rounded-lg border border-gray-300 focus:ring-blue-500 focus:border-blue-500"
                        on:input=move |ev| set_student_id.set(event_target_value(&ev))
                        prop:value=student_id
                    />
                    <label for="password" class="block mb-2 font-semibold">
                        "Password:"
                    </label>
                    <input
                        id="password"
                        type="password"
                        placeholder="Enter your password"
                        class="block w-full mb-6 p-2.5 text-sm text-gray-900 bg-white rounded-lg border border-gray-300 focus:ring-blue-500 focus:border-blue-500"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                    />
                    {move || {
                        error
                            .get()
                            .map(|error| {
                                view! {
                                    <div class="mb-5 p-2.5 text-sm text-red-800 bg-red-100 rounded">
                                        "❌ " {error}
                                    </div>
                                }
                            })
                    }}
                    <button
                        type="submit"
                        disabled=loading
                        class="w-full inline-flex justify-center items-center text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:ring-blue-300 font-medium rounded-lg text-lg px-5 py-2.5 disabled:bg-gray-500 disabled:cursor-not-allowed"
                    >
                        {move || {
                            if loading.get() {
                                view! { <Spinner /> "Logging in..." }.into_view()
                            } else {
                                "🔑 Login".into_view()
                            }
                        }}
                    </button>
                </form>
                <div class="mt-8 p-4 text-sm bg-blue-50 rounded dark:bg-gray-800">
                    <strong>"📋 Demo Accounts:"</strong>
                    <div class="mt-2">
                        <div>"👤 STU001 / student123"</div>
                        <div>"👤 STU002 / student123"</div>
                        <div>"👤 STU003 / student123"</div>
                    </div>
                </div>
                <div class="text-center mt-5">
                    <a href="/admin" class="text-sm text-gray-500 hover:underline">
                        "🔧 Admin Login"
                    </a>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_block_locally() {
        assert_eq!(credentials("STU001", ""), Err(LoginError::Missing));
        assert_eq!(credentials("  ", "student123"), Err(LoginError::Missing));
        assert_eq!(credentials("STU001", " \t"), Err(LoginError::Missing));
    }

    #[test]
    fn credentials_are_sent_as_typed() {
        let request = credentials("STU001神", "x").unwrap();
        assert_eq!(request.student_id, "STU001神");
        assert_eq!(request.password, "x");
    }

    #[test]
    fn service_message_shown_verbatim() {
        let err = ApiError::Service {
            status: 401,
            message: "Invalid credentials".into(),
        };
        assert_eq!(failure_message(&err), "Invalid credentials");
        let err = ApiError::Url(url::ParseError::EmptyHost);
        assert_eq!(failure_message(&err), CONNECTION_ERROR);
    }
}
