use crate::state::{Complaint, Filed, Student};
use crate::transcript::ChatRequest;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("Url error {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifyRequest {
    pub student_id: String,
    pub student_name: String,
    pub complaint_text: String,
    /// Empty lets the classifier pick.
    pub complaint_type: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub student: Option<Student>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Debug, Default, Deserialize)]
struct ComplaintList {
    #[serde(default)]
    complaints: Vec<Complaint>,
}

/// Turns a non-success response body into an error, preferring the
/// service's own wording.
pub fn service_error(status: StatusCode, body: ErrorBody) -> ApiError {
    let message = body
        .error
        .or(body.message)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    ApiError::Service {
        status: status.as_u16(),
        message,
    }
}

/// A login only counts when both the status and the `success` flag agree.
pub fn login_outcome(status: StatusCode, reply: LoginReply) -> Result<Student, ApiError> {
    match reply {
        LoginReply {
            success: true,
            student: Some(student),
            ..
        } if status.is_success() => Ok(student),
        LoginReply { message, .. } => Err(ApiError::Service {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| "Login failed".to_string()),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Api {
    http: reqwest::Client,
    base: Url,
}

impl Api {
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn student_login(&self, request: &LoginRequest) -> Result<Student, ApiError> {
        let response = self
            .http
            .post(self.endpoint(&["student-login"])?)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let reply: LoginReply = response.json().await?;
        login_outcome(status, reply)
    }

    pub async fn admin_login(&self, request: &AdminLoginRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint(&["admin-login"])?)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let reply: LoginReply = response.json().await?;
        if status.is_success() && reply.success {
            Ok(())
        } else {
            Err(ApiError::Service {
                status: status.as_u16(),
                message: reply.message.unwrap_or_else(|| "Login failed".to_string()),
            })
        }
    }

    pub async fn classify_complaint(&self, request: &ClassifyRequest) -> Result<Filed, ApiError> {
        let response = self
            .http
            .post(self.endpoint(&["classify-complaint"])?)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(service_error(status, response.json().await.unwrap_or_default()))
        }
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.endpoint(&["chatbot"])?)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            let reply: ChatReply = response.json().await?;
            Ok(reply.reply)
        } else {
            Err(service_error(status, response.json().await.unwrap_or_default()))
        }
    }

    pub async fn student_complaints(&self, student_id: &str) -> Result<Vec<Complaint>, ApiError> {
        self.complaints(&["student-complaints", student_id]).await
    }

    pub async fn all_complaints(&self) -> Result<Vec<Complaint>, ApiError> {
        self.complaints(&["complaints"]).await
    }

    async fn complaints(&self, segments: &[&str]) -> Result<Vec<Complaint>, ApiError> {
        let response = self.http.get(self.endpoint(segments)?).send().await?;
        let status = response.status();
        if status.is_success() {
            let list: ComplaintList = response.json().await?;
            Ok(list.complaints)
        } else {
            Err(service_error(status, response.json().await.unwrap_or_default()))
        }
    }

    pub async fn resolve_complaint(&self, id: i64) -> Result<(), ApiError> {
        let id = id.to_string();
        let response = self
            .http
            .put(self.endpoint(&["complaints", &id, "resolve"])?)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(service_error(status, response.json().await.unwrap_or_default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> Api {
        Api::new(Url::parse("https://campus.example.edu/api/").unwrap())
    }

    #[test]
    fn endpoints_append_to_base() {
        let api = api();
        assert_eq!(
            api.endpoint(&["complaints", "12", "resolve"]).unwrap().as_str(),
            "https://campus.example.edu/api/complaints/12/resolve"
        );
        assert_eq!(
            api.endpoint(&["student-complaints", "STU 1/2"]).unwrap().as_str(),
            "https://campus.example.edu/api/student-complaints/STU%201%2F2"
        );
    }

    #[test]
    fn rejected_login_surfaces_service_message() {
        let reply: LoginReply =
            serde_json::from_str(r#"{"success": false, "message": "Invalid credentials"}"#)
                .unwrap();
        let err = login_outcome(StatusCode::UNAUTHORIZED, reply).unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn login_without_message_is_generic() {
        let reply: LoginReply = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        let err = login_outcome(StatusCode::INTERNAL_SERVER_ERROR, reply).unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
    }

    #[test]
    fn success_flag_needs_ok_status() {
        let body = r#"{"success": true, "student": {"id": "STU001", "name": "John Doe", "email": "john@college.edu"}}"#;
        let reply: LoginReply = serde_json::from_str(body).unwrap();
        assert_eq!(login_outcome(StatusCode::OK, reply).unwrap().name, "John Doe");

        let reply: LoginReply = serde_json::from_str(body).unwrap();
        assert!(login_outcome(StatusCode::BAD_GATEWAY, reply).is_err());
    }

    #[test]
    fn service_error_prefers_error_field() {
        let body = ErrorBody {
            message: Some("ignored".into()),
            error: Some("Missing complaint text or student ID".into()),
        };
        let err = service_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "Missing complaint text or student ID");

        let err = service_error(StatusCode::SERVICE_UNAVAILABLE, ErrorBody::default());
        assert_eq!(err.to_string(), "request failed with status 503");
    }

    #[test]
    fn classify_request_wire_shape() {
        let request = ClassifyRequest {
            student_id: "STU001".into(),
            student_name: "John Doe".into(),
            complaint_text: "wifi is down".into(),
            complaint_type: String::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["complaint_type"], "");
        assert_eq!(value["student_name"], "John Doe");
    }
}
