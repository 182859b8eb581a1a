use crate::state::{Session, Student};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Admin,
    Student,
}

impl Surface {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/admin" => Surface::Admin,
            _ => Surface::Student,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    AdminLogin,
    AdminDashboard,
    StudentLogin,
    Dashboard(Student),
}

/// Which top-level screen renders. The admin surface needs its own sign-in,
/// a student session does not grant it.
pub fn screen(surface: Surface, session: &Session, admin: bool) -> Screen {
    match (surface, session.student()) {
        (Surface::Admin, _) if admin => Screen::AdminDashboard,
        (Surface::Admin, _) => Screen::AdminLogin,
        (Surface::Student, Some(student)) => Screen::Dashboard(student.clone()),
        (Surface::Student, None) => Screen::StudentLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> Session {
        Session::Student(Student {
            id: "STU002".into(),
            name: "Jane Smith".into(),
            email: "jane@college.edu".into(),
        })
    }

    #[test]
    fn admin_path() {
        assert_eq!(Surface::from_path("/admin"), Surface::Admin);
        assert_eq!(Surface::from_path("/admin/"), Surface::Admin);
        assert_eq!(Surface::from_path("/administration"), Surface::Student);
        assert_eq!(Surface::from_path("/"), Surface::Student);
    }

    #[test]
    fn admin_requires_admin_sign_in() {
        assert_eq!(
            screen(Surface::Admin, &signed_in(), false),
            Screen::AdminLogin
        );
        assert_eq!(
            screen(Surface::Admin, &Session::Anonymous, true),
            Screen::AdminDashboard
        );
    }

    #[test]
    fn student_surface_follows_session() {
        assert_eq!(
            screen(Surface::Student, &Session::Anonymous, true),
            Screen::StudentLogin
        );
        assert!(matches!(
            screen(Surface::Student, &signed_in(), false),
            Screen::Dashboard(student) if student.id == "STU002"
        ));
    }
}
