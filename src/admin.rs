use crate::api::{AdminLoginRequest, Api, ApiError};
use crate::history::{or_empty, ComplaintCard};
use crate::loading::{Loading, Spinner};
use crate::login::failure_message;
use crate::state::Complaint;
use leptos::ev::SubmitEvent;
use leptos::logging::{error, log};
use leptos::*;
use std::future::Future;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AdminLoginError {
    #[error("Please enter both username and password")]
    Missing,
}

pub fn admin_credentials(
    username: &str,
    password: &str,
) -> Result<AdminLoginRequest, AdminLoginError> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(AdminLoginError::Missing);
    }
    Ok(AdminLoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
}

impl Stats {
    pub fn of(complaints: &[Complaint]) -> Self {
        let resolved = complaints
            .iter()
            .filter(|complaint| complaint.status.is_resolved())
            .count();
        Self {
            total: complaints.len(),
            pending: complaints.len() - resolved,
            resolved,
        }
    }
}

#[component]
pub fn AdminLogin(#[prop(into)] on_authorized: Callback<()>) -> impl IntoView {
    let api = expect_context::<Api>();
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = match admin_credentials(&username.get(), &password.get()) {
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
            match api.admin_login(&request).await {
                Ok(()) => {
                    log!("Admin signed in");
                    on_authorized.call(());
                }
                Err(err) => set_error.set(Some(failure_message(&err))),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center w-full min-h-screen bg-gray-50 dark:bg-gray-800">
            <form
                class="w-full max-w-md p-10 bg-white rounded-xl shadow-lg dark:bg-gray-700 dark:text-white"
                on:submit=submit
            >
                <h1 class="mb-8 text-2xl font-bold text-center">"🔧 Admin Login"</h1>
                <input
                    type="text"
                    placeholder="Username"
                    class="block w-full mb-5 p-2.5 text-gray-900 bg-white border border-gray-300 rounded-lg"
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    prop:value=username
                />
                <input
                    type="password"
                    placeholder="Password"
                    class="block w-full mb-6 p-2.5 text-gray-900 bg-white border border-gray-300 rounded-lg"
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
                    class="w-full inline-flex justify-center items-center text-white bg-blue-700 rounded-lg text-lg px-5 py-2.5 disabled:bg-gray-500"
                >
                    {move || {
                        if loading.get() {
                            view! { <Spinner /> "Signing in..." }.into_view()
                        } else {
                            "Sign in".into_view()
                        }
                    }}
                </button>
                <div class="text-center mt-5">
                    <a href="/" class="text-sm text-blue-600 hover:underline">
                        "👨‍🎓 Student Portal"
                    </a>
                </div>
            </form>
        </div>
    }
}

/// Awaits the status update, then refetches whether it succeeded or not.
pub async fn resolve_and_refetch(
    id: i64,
    resolve: impl Future<Output = Result<(), ApiError>>,
    refetch: impl FnOnce(),
) {
    if let Err(err) = resolve.await {
        error!("Error resolving complaint {id}: {err}");
    }
    refetch();
}

#[component]
pub fn AdminDashboard(#[prop(into)] on_sign_out: Callback<()>) -> impl IntoView {
    let api = expect_context::<Api>();
    let (version, set_version) = create_signal(0u32);
    let complaints = {
        let api = api.clone();
        create_local_resource(
            move || version.get(),
            move |_| {
                let api = api.clone();
                async move { or_empty(api.all_complaints().await) }
            },
        )
    };

    let resolve = move |id: i64| {
        let api = api.clone();
        spawn_local(async move {
            resolve_and_refetch(id, api.resolve_complaint(id), || {
                set_version.update(|v| *v += 1)
            })
            .await;
        });
    };
    let on_resolve = Callback::new(resolve);

    view! {
        <div class="max-w-6xl mx-auto my-5 p-5 dark:text-white">
            <div class="flex justify-between items-center mb-8">
                <h1 class="text-2xl font-bold">"🛠️ Admin Dashboard"</h1>
                <div class="flex gap-2.5">
                    <a href="/" class="px-4 py-2 text-blue-600 border border-blue-600 rounded">
                        "👨‍🎓 Student Portal"
                    </a>
                    <button
                        type="button"
                        class="px-4 py-2 text-white bg-red-600 rounded"
                        on:click=move |_| on_sign_out.call(())
                    >
                        "🚪 Sign out"
                    </button>
                </div>
            </div>
            <Transition fallback=move || {
                view! { <Loading label="Loading complaints..." /> }
            }>
                {move || {
                    complaints
                        .get()
                        .map(|complaints| {
                            let stats = Stats::of(&complaints);
                            let list = if complaints.is_empty() {
                                view! {
                                    <div class="p-10 text-center text-gray-500">
                                        <h3 class="text-lg font-semibold">"No complaints found"</h3>
                                        <p>"No complaints have been submitted yet."</p>
                                    </div>
                                }
                                    .into_view()
                            } else {
                                complaints
                                    .into_iter()
                                    .map(|complaint| view! { <ComplaintCard complaint on_resolve /> })
                                    .collect_view()
                            };
                            view! {
                                <div class="grid grid-cols-3 gap-4 mb-8 text-center">
                                    <div class="p-5 rounded-lg bg-gray-50 dark:bg-gray-800">
                                        <h3 class="text-blue-600">"📊 Total"</h3>
                                        <p class="my-2.5 text-2xl font-bold">{stats.total}</p>
                                    </div>
                                    <div class="p-5 rounded-lg bg-yellow-50 dark:bg-gray-800">
                                        <h3 class="text-yellow-800">"⏳ Pending"</h3>
                                        <p class="my-2.5 text-2xl font-bold">{stats.pending}</p>
                                    </div>
                                    <div class="p-5 rounded-lg bg-cyan-50 dark:bg-gray-800">
                                        <h3 class="text-cyan-800">"✅ Resolved"</h3>
                                        <p class="my-2.5 text-2xl font-bold">{stats.resolved}</p>
                                    </div>
                                </div>
                                <div class="grid gap-4">{list}</div>
                            }
                        })
                }}
            </Transition>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ComplaintStatus;

    fn complaint(id: i64, status: ComplaintStatus) -> Complaint {
        Complaint {
            id,
            student_name: Some("John Doe".into()),
            category: "Mess".into(),
            sentiment: "normal".into(),
            status,
            complaint_text: "cold food".into(),
            timestamp: None,
        }
    }

    #[test]
    fn stats_count_by_status() {
        let complaints = [
            complaint(1, ComplaintStatus::Pending),
            complaint(2, ComplaintStatus::Resolved),
            complaint(3, ComplaintStatus::Pending),
        ];
        assert_eq!(
            Stats::of(&complaints),
            Stats {
                total: 3,
                pending: 2,
                resolved: 1
            }
        );
        assert_eq!(Stats::of(&[]), Stats::default());
    }

    #[test]
    fn admin_fields_required() {
        assert_eq!(admin_credentials("admin", ""), Err(AdminLoginError::Missing));
        assert_eq!(admin_credentials("admin", "admin123").unwrap().username, "admin");
    }

    #[test]
    fn refetches_after_failed_resolve() {
        let mut refetched = 0;
        futures::executor::block_on(resolve_and_refetch(
            5,
            async {
                Err(ApiError::Service {
                    status: 500,
                    message: "database is locked".into(),
                })
            },
            || refetched += 1,
        ));
        assert_eq!(refetched, 1);

        futures::executor::block_on(resolve_and_refetch(5, async { Ok(()) }, || refetched += 1));
        assert_eq!(refetched, 2);
    }
}
