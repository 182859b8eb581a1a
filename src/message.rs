use crate::state::{Turn, TurnAction};
use leptos::*;
use pulldown_cmark::{Event, Parser};

/// Renders assistant markdown. Raw HTML from the reply service is shown as
/// text, never injected.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new(text).map(|event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        event => event,
    });
    let mut parsed = String::new();
    pulldown_cmark::html::push_html(&mut parsed, parser);
    parsed
}

#[component]
pub fn Message(turn: Turn, #[prop(into)] on_offer: Callback<()>) -> impl IntoView {
    let is_me = turn.is_user();
    let body = if turn.detailed && !is_me {
        let parsed = render_markdown(&turn.text);
        view! { <div class="text-[15px] leading-relaxed" inner_html=parsed /> }.into_view()
    } else {
        view! { <div class="text-sm whitespace-pre-line">{turn.text.clone()}</div> }.into_view()
    };
    let action = turn.action.map(|action| match action {
        TurnAction::OfferComplaint => view! {
            <div class="mt-2.5">
                <button
                    type="button"
                    class="text-white bg-green-600 hover:bg-green-700 rounded-full text-sm px-4 py-2"
                    on:click=move |_| on_offer.call(())
                >
                    "📝 Submit Complaint"
                </button>
            </div>
        },
    });
    let bubble = bubble_class(&turn);
    let row = if is_me { "flex m-4 justify-end" } else { "flex m-4 justify-start" };
    view! {
        <div class=row>
            <div class=bubble>{body} {action}</div>
        </div>
    }
}

fn bubble_class(turn: &Turn) -> &'static str {
    match (turn.is_user(), turn.detailed) {
        (true, _) => "max-w-[75%] break-words rounded-2xl px-4 py-2 text-white bg-blue-600",
        (false, true) => {
            "max-w-[75%] break-words rounded-xl px-5 py-4 border shadow bg-gray-50 dark:bg-gray-700 dark:text-white"
        }
        (false, false) => {
            "max-w-[75%] break-words rounded-2xl px-4 py-2 bg-gray-200 dark:bg-gray-700 dark:text-white"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown() {
        assert_eq!(render_markdown("hello world"), "<p>hello world</p>\n");

        let html = render_markdown("Steps:\n\n1. Forget the network\n2. Reconnect");
        assert!(html.contains("<ol>"));
        assert!(html.contains("<li>Reconnect</li>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let html = render_markdown("try <b>this</b>");
        assert!(html.contains("&lt;b&gt;this&lt;/b&gt;"));
    }
}
