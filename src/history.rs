use crate::api::ApiError;
use crate::loading::Loading;
use crate::state::{Complaint, ComplaintStatus};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use leptos::logging::error;
use leptos::*;
use std::fmt::Display;

pub fn sentiment_color(sentiment: &str) -> &'static str {
    match sentiment {
        "urgent" => "#dc3545",
        "angry" => "#fd7e14",
        "normal" => "#28a745",
        _ => "#6c757d",
    }
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Mess" => "🍽️",
        "WiFi/Network" => "📶",
        "Technical Issue" => "🔧",
        "Academic/Teacher" => "📚",
        "Safety/Security" => "🛡️",
        _ => "📝",
    }
}

pub fn status_badge(status: ComplaintStatus) -> (&'static str, &'static str) {
    match status {
        ComplaintStatus::Pending => ("⏳ PENDING", "#ffc107"),
        ComplaintStatus::Resolved => ("✅ RESOLVED", "#28a745"),
    }
}

/// List fetches never interrupt the view: failures are logged and read as
/// an empty list.
pub fn or_empty(result: Result<Vec<Complaint>, ApiError>) -> Vec<Complaint> {
    result.unwrap_or_else(|err| {
        error!("Error fetching complaints: {err}");
        vec![]
    })
}

/// Accepts RFC 3339 or the `YYYY-MM-DD HH:MM:SS` form SQLite stores (UTC).
/// Anything else is shown as received.
pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc())
        });
    match parsed {
        Ok(dt) => dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, &Local)
}

/// Whether the card offers a resolve button. Resolved records stay final.
pub fn can_resolve(complaint: &Complaint) -> bool {
    !complaint.status.is_resolved()
}

#[component]
pub fn ComplaintCard(
    complaint: Complaint,
    #[prop(optional, into)] on_resolve: Option<Callback<i64>>,
) -> impl IntoView {
    let id = complaint.id;
    let resolved = !can_resolve(&complaint);
    let (status_label, status_color) = status_badge(complaint.status);
    let when = complaint
        .timestamp
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_default();
    let student = complaint
        .student_name
        .map(|name| format!(" | Student: {name}"))
        .unwrap_or_default();
    let sentiment_style = format!("background-color: {}", sentiment_color(&complaint.sentiment));
    let status_style = format!("background-color: {status_color}");
    let card_class = if resolved {
        "p-5 border rounded-lg shadow bg-gray-50 dark:bg-gray-800"
    } else {
        "p-5 border rounded-lg shadow bg-white dark:bg-gray-700"
    };
    view! {
        <div class=card_class>
            <div class="flex justify-between items-start mb-4">
                <div>
                    <h3 class="mb-1 text-lg font-semibold">
                        {category_icon(&complaint.category)} " " {complaint.category.clone()}
                    </h3>
                    <p class="text-sm text-gray-500">
                        "Complaint #" {id} {student} " | " {when}
                    </p>
                </div>
                <div class="flex gap-2.5 items-center">
                    <span
                        class="px-2 py-1 text-xs font-bold text-white rounded-xl"
                        style=sentiment_style
                    >
                        {complaint.sentiment.to_uppercase()}
                    </span>
                    <span
                        class="px-2 py-1 text-xs font-bold text-white rounded-xl"
                        style=status_style
                    >
                        {status_label}
                    </span>
                </div>
            </div>
            <p class="leading-normal text-gray-600 dark:text-gray-300">
                "\"" {complaint.complaint_text} "\""
            </p>
            {on_resolve
                .map(|on_resolve| {
                    view! {
                        <button
                            type="button"
                            class="mt-4 px-4 py-2 text-sm text-white bg-green-600 rounded disabled:bg-gray-500"
                            disabled=resolved
                            on:click=move |_| on_resolve.call(id)
                        >
                            {if resolved { "✅ Resolved" } else { "✅ Mark as Resolved" }}
                        </button>
                    }
                })}
        </div>
    }
}

#[component]
pub fn History(
    complaints: Resource<u32, Vec<Complaint>>,
    #[prop(into)] on_refresh: Callback<()>,
) -> impl IntoView {
    view! {
        <div>
            <div class="flex justify-between items-center mb-5 dark:text-white">
                <h2 class="text-xl font-bold">"📊 Your Complaint History"</h2>
                <button
                    type="button"
                    class="px-4 py-2 text-white bg-green-600 rounded"
                    on:click=move |_| on_refresh.call(())
                >
                    "🔄 Refresh Status"
                </button>
            </div>
            <Transition fallback=move || {
                view! { <Loading label="Loading your complaints..." /> }
            }>
                {move || {
                    complaints
                        .get()
                        .map(|complaints| {
                            if complaints.is_empty() {
                                view! {
                                    <div class="p-16 text-center text-gray-500 bg-gray-50 rounded-lg">
                                        <h3 class="text-lg font-semibold">"📭 No complaints yet"</h3>
                                        <p>
                                            "You haven't submitted any complaints. Use the Smart Assistant or Submit Complaint tabs to get help!"
                                        </p>
                                    </div>
                                }
                                    .into_view()
                            } else {
                                view! {
                                    <div class="grid gap-4">
                                        {complaints
                                            .into_iter()
                                            .map(|complaint| view! { <ComplaintCard complaint /> })
                                            .collect_view()}
                                    </div>
                                }
                                    .into_view()
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

    #[test]
    fn unknown_values_fall_back() {
        assert_eq!(sentiment_color("urgent"), "#dc3545");
        assert_eq!(sentiment_color("furious"), "#6c757d");
        assert_eq!(sentiment_color(""), "#6c757d");
        assert_eq!(category_icon("WiFi/Network"), "📶");
        assert_eq!(category_icon("Parking"), "📝");
    }

    #[test]
    fn resolved_complaint_cannot_be_resolved_again() {
        let listed: Complaint = serde_json::from_str(
            r#"{"id": 9, "category": "Mess", "sentiment": "normal", "status": "pending"}"#,
        )
        .unwrap();
        assert!(can_resolve(&listed));

        // What the admin listing returns after a second resolve on the same id.
        let refetched: Complaint = serde_json::from_str(
            r#"{"id": 9, "category": "Mess", "sentiment": "normal", "status": "resolved"}"#,
        )
        .unwrap();
        assert!(refetched.status.is_resolved());
        assert!(!can_resolve(&refetched));
        assert_eq!(status_badge(refetched.status).0, "✅ RESOLVED");
    }

    #[test]
    fn failed_fetch_reads_as_empty() {
        let err = ApiError::Service {
            status: 500,
            message: "database is locked".into(),
        };
        assert!(or_empty(Err(err)).is_empty());
    }

    #[test]
    fn timestamps() {
        assert_eq!(
            format_timestamp_in("2024-03-01 10:15:00", &Utc),
            "2024-03-01 10:15"
        );
        assert_eq!(
            format_timestamp_in("2024-03-01T10:15:00+02:00", &Utc),
            "2024-03-01 08:15"
        );
        assert_eq!(format_timestamp_in("yesterday", &Utc), "yesterday");
    }

    #[test]
    fn status_badges() {
        assert_eq!(status_badge(ComplaintStatus::Pending).0, "⏳ PENDING");
        assert_eq!(status_badge(ComplaintStatus::Resolved).0, "✅ RESOLVED");
    }
}
