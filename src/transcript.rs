use crate::state::{Turn, TurnAction};
use serde::Serialize;

pub const GREETING: &str = "Hi! 👋 I'm your Smart Troubleshooting Assistant!

I can help you with:
• 📶 WiFi and network issues
• 💻 Technical problems
• 🍽️ Mess and dining concerns
• 📚 Academic issues
• 🛡️ Safety and security

Describe your problem in detail and I'll provide step-by-step solutions!";

pub const OFFER: &str =
    "🎯 Ready to submit a formal complaint? I can help you create one based on our conversation!";
pub const SERVICE_FAILURE: &str = "❌ Sorry, I encountered an error. Please try again.";
pub const TRANSPORT_FAILURE: &str = "🔌 Sorry, I'm having trouble connecting. Please try again.";

const TRIGGERS: [&str; 2] = ["formal complaint", "submit a complaint"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<String>,
}

/// How a reply request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    Reply(String),
    ServiceFailure,
    TransportFailure,
}

/// Append-only conversation with at most one outstanding reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    turns: Vec<Turn>,
    pending: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            turns: vec![Turn::assistant(GREETING).detailed()],
            pending: false,
        }
    }
}

impl Transcript {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Appends the user turn and returns the request to send, or `None` when
    /// the input is blank or a reply is still outstanding.
    pub fn begin(&mut self, input: &str) -> Option<ChatRequest> {
        if input.trim().is_empty() || self.pending {
            return None;
        }
        let conversation_history = self.serialized();
        self.turns.push(Turn::user(input));
        self.pending = true;
        Some(ChatRequest {
            message: input.to_string(),
            conversation_history,
        })
    }

    /// Applies the outcome of the outstanding request. Returns true when the
    /// reply asks for a complaint offer to follow.
    pub fn finish(&mut self, outcome: ChatOutcome) -> bool {
        self.pending = false;
        match outcome {
            ChatOutcome::Reply(reply) => {
                let offer = suggests_complaint(&reply);
                self.turns.push(Turn::assistant(reply).detailed());
                offer
            }
            ChatOutcome::ServiceFailure => {
                self.turns.push(Turn::assistant(SERVICE_FAILURE));
                false
            }
            ChatOutcome::TransportFailure => {
                self.turns.push(Turn::assistant(TRANSPORT_FAILURE));
                false
            }
        }
    }

    pub fn offer_complaint(&mut self) {
        self.turns
            .push(Turn::assistant(OFFER).with_action(TurnAction::OfferComplaint));
    }

    fn serialized(&self) -> Vec<String> {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role.prefix(), turn.text))
            .collect()
    }
}

pub fn suggests_complaint(reply: &str) -> bool {
    let reply = reply.to_lowercase();
    TRIGGERS.iter().any(|trigger| reply.contains(trigger))
}

/// Complaint body derived from whatever the student typed, in order.
pub fn prefill_body(turns: &[Turn]) -> String {
    turns
        .iter()
        .filter(|turn| turn.is_user())
        .map(|turn| turn.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Role;

    #[test]
    fn blank_input_is_ignored() {
        let mut transcript = Transcript::default();
        assert!(transcript.begin("   \n").is_none());
        assert_eq!(transcript.turns().len(), 1);
        assert!(!transcript.is_pending());
    }

    #[test]
    fn user_turn_is_appended_before_reply() {
        let mut transcript = Transcript::default();
        let request = transcript.begin("wifi is down").unwrap();
        assert_eq!(request.message, "wifi is down");
        assert_eq!(request.conversation_history.len(), 1);
        assert!(request.conversation_history[0].starts_with("bot: Hi!"));
        assert_eq!(transcript.turns().last().unwrap().role, Role::User);
        assert!(transcript.is_pending());
    }

    #[test]
    fn second_send_refused_while_pending() {
        let mut transcript = Transcript::default();
        transcript.begin("first").unwrap();
        assert!(transcript.begin("second").is_none());
        transcript.finish(ChatOutcome::Reply("ok".into()));
        let request = transcript.begin("second").unwrap();
        assert_eq!(
            &request.conversation_history[1..],
            &["user: first".to_string(), "bot: ok".to_string()]
        );
    }

    #[test]
    fn trigger_phrases_any_case() {
        assert!(suggests_complaint("You may want to SUBMIT A COMPLAINT."));
        assert!(suggests_complaint("Consider a Formal Complaint"));
        assert!(!suggests_complaint("Try restarting your router."));
    }

    #[test]
    fn reply_with_trigger_requests_offer() {
        let mut transcript = Transcript::default();
        transcript.begin("still broken").unwrap();
        assert!(transcript.finish(ChatOutcome::Reply(
            "If that fails, submit a complaint.".into()
        )));
        transcript.offer_complaint();
        let last = transcript.turns().last().unwrap();
        assert_eq!(last.action, Some(TurnAction::OfferComplaint));
        assert!(!last.detailed);
    }

    #[test]
    fn failures_keep_the_user_turn() {
        let mut transcript = Transcript::default();
        transcript.begin("hello").unwrap();
        assert!(!transcript.finish(ChatOutcome::ServiceFailure));
        transcript.begin("again").unwrap();
        assert!(!transcript.finish(ChatOutcome::TransportFailure));

        let texts: Vec<_> = transcript.turns()[1..]
            .iter()
            .map(|turn| turn.text.as_str())
            .collect();
        assert_eq!(texts, ["hello", SERVICE_FAILURE, "again", TRANSPORT_FAILURE]);
    }

    #[test]
    fn prefill_joins_user_turns() {
        let turns = vec![
            Turn::assistant(GREETING).detailed(),
            Turn::user("wifi is down"),
            Turn::assistant("Try reconnecting."),
            Turn::user("also slow"),
        ];
        assert_eq!(prefill_body(&turns), "wifi is down also slow");
        assert_eq!(prefill_body(&turns[..1]), "");
    }
}
