use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Who is signed in on the student side.
///
/// `Anonymous -> Student` happens on a successful login, `Student -> Anonymous`
/// on logout. Nothing survives a reload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Student(Student),
}

impl Session {
    pub fn student(&self) -> Option<&Student> {
        match self {
            Session::Anonymous => None,
            Session::Student(student) => Some(student),
        }
    }

    pub fn login(&mut self, student: Student) {
        *self = Session::Student(student);
    }

    pub fn logout(&mut self) {
        *self = Session::Anonymous;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Prefix used when the transcript is serialized for the reply service.
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "bot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    OfferComplaint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub detailed: bool,
    pub action: Option<TurnAction>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            detailed: false,
            action: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            detailed: false,
            action: None,
        }
    }

    pub fn detailed(mut self) -> Self {
        self.detailed = true;
        self
    }

    pub fn with_action(mut self, action: TurnAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Categories a student may pick by hand. Records coming back from the
/// service keep their category as a plain string since the classifier is free
/// to answer anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Mess,
    WifiNetwork,
    TechnicalIssue,
    AcademicTeacher,
    SafetySecurity,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Mess,
        Category::WifiNetwork,
        Category::TechnicalIssue,
        Category::AcademicTeacher,
        Category::SafetySecurity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mess => "Mess",
            Category::WifiNetwork => "WiFi/Network",
            Category::TechnicalIssue => "Technical Issue",
            Category::AcademicTeacher => "Academic/Teacher",
            Category::SafetySecurity => "Safety/Security",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Mess => "Mess/Food Issues",
            Category::WifiNetwork => "WiFi/Network Problems",
            Category::TechnicalIssue => "Technical Issues",
            Category::AcademicTeacher => "Academic/Teacher Issues",
            Category::SafetySecurity => "Safety/Security Concerns",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown category {0}")]
pub struct UnknownCategory(String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Only the service moves a complaint from pending to resolved. Anything
/// other than `resolved` reads as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplaintStatus {
    #[default]
    Pending,
    Resolved,
}

impl ComplaintStatus {
    pub fn is_resolved(&self) -> bool {
        *self == ComplaintStatus::Resolved
    }
}

impl From<&str> for ComplaintStatus {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("resolved") {
            ComplaintStatus::Resolved
        } else {
            ComplaintStatus::Pending
        }
    }
}

impl<'de> Deserialize<'de> for ComplaintStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(ComplaintStatus::from).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Complaint {
    pub id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(default)]
    pub complaint_text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// What the classifier assigned to a freshly filed complaint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Filed {
    pub id: i64,
    pub category: String,
    pub sentiment: String,
}

impl Filed {
    pub fn reference(&self) -> String {
        format!("#{}", self.id)
    }

    pub fn priority(&self) -> String {
        self.sentiment.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_transitions() {
        let mut session = Session::default();
        assert!(session.student().is_none());
        session.login(Student {
            id: "STU001".into(),
            name: "John Doe".into(),
            email: "john@college.edu".into(),
        });
        assert_eq!(session.student().map(|s| s.id.as_str()), Some("STU001"));
        session.logout();
        assert_eq!(session, Session::Anonymous);
    }

    #[test]
    fn status_strings() {
        assert!(ComplaintStatus::from("resolved").is_resolved());
        assert!(ComplaintStatus::from(" Resolved ").is_resolved());
        assert_eq!(ComplaintStatus::from("pending"), ComplaintStatus::Pending);
        assert_eq!(ComplaintStatus::from("escalated"), ComplaintStatus::Pending);
    }

    #[test]
    fn complaint_from_admin_listing() {
        let complaint: Complaint = serde_json::from_str(
            r#"{"id": 3, "student_name": "Jane Smith", "complaint_text": "cold food",
                "category": "Mess", "sentiment": "angry", "status": "RESOLVED",
                "timestamp": "2024-03-01 10:15:00"}"#,
        )
        .unwrap();
        assert_eq!(complaint.status, ComplaintStatus::Resolved);
        assert_eq!(complaint.student_name.as_deref(), Some("Jane Smith"));
    }

    #[test]
    fn complaint_from_student_listing() {
        // The per-student listing omits the name and may carry a null status.
        let complaint: Complaint = serde_json::from_str(
            r#"{"id": 4, "complaint_text": "wifi", "category": "WiFi/Network",
                "sentiment": "urgent", "status": null, "timestamp": null}"#,
        )
        .unwrap();
        assert_eq!(complaint.status, ComplaintStatus::Pending);
        assert!(complaint.student_name.is_none());
    }

    #[test]
    fn filed_panel_values() {
        let filed: Filed = serde_json::from_str(
            r#"{"id": 7, "category": "WiFi/Network", "sentiment": "urgent", "status": "pending"}"#,
        )
        .unwrap();
        assert_eq!(filed.reference(), "#7");
        assert_eq!(filed.category, "WiFi/Network");
        assert_eq!(filed.priority(), "URGENT");
    }

    #[test]
    fn category_parses_wire_name_only() {
        assert_eq!(
            "WiFi/Network".parse::<Category>().unwrap(),
            Category::WifiNetwork
        );
        assert!("wifi".parse::<Category>().is_err());
        assert!("Parking".parse::<Category>().is_err());
    }
}
