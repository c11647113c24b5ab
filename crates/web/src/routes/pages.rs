//! Feature page route handlers.
//!
//! Every page requires a session. Each renders its fixed heading whatever
//! the provider returns for the profile lookup.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, routing::get};
use tracing::instrument;

use familysync_core::UserProfile;

use crate::filters;
use crate::middleware::RequireSession;
use crate::services::auth::Session;
use crate::state::AppState;

/// Hints shown on the family setup page.
pub const FAMILY_SETUP_HINTS: [&str; 4] = [
    "Invite family members by email so everyone shares one calendar.",
    "Pick a color for each member to tell their tasks and events apart.",
    "Choose who manages the family as an admin or parent.",
    "Add younger children without an email; a parent can act for them.",
];

/// Features planned for the tasks page.
pub const PLANNED_TASK_FEATURES: [&str; 3] = [
    "Assign chores and to-dos to family members",
    "Set due dates and recurring tasks",
    "Track what's done at a glance",
];

/// Features planned for the events page.
pub const PLANNED_EVENT_FEATURES: [&str; 3] = [
    "Shared family calendar",
    "Event reminders for everyone involved",
    "Color-coded events per family member",
];

/// Greeting when no profile is available.
pub const DEFAULT_GREETING: &str = "Welcome to FamilySync!";

/// Header context shared by every signed-in page.
#[derive(Debug, Clone)]
pub struct NavContext {
    /// Email (or user ID) of the signed-in user.
    pub user_label: String,
    /// Path of the current page, for highlighting the active link.
    pub current_path: &'static str,
}

impl NavContext {
    #[must_use]
    pub fn new(session: &Session, current_path: &'static str) -> Self {
        Self {
            user_label: session.label(),
            current_path,
        }
    }
}

/// Profile summary shown on the dashboard.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub name: String,
    pub role: &'static str,
    pub color_class: String,
    pub family_name: String,
}

impl From<&UserProfile> for ProfileView {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            role: profile.role.label(),
            color_class: profile.color.css_class(),
            family_name: profile.family.name.clone(),
        }
    }
}

/// Greeting for the dashboard heading area.
#[must_use]
pub fn greeting(profile: Option<&UserProfile>) -> String {
    profile.map_or_else(
        || DEFAULT_GREETING.to_string(),
        |p| format!("Welcome back, {}!", p.first_name()),
    )
}

// =============================================================================
// Templates
// =============================================================================

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub nav: NavContext,
    pub greeting: String,
    pub profile: Option<ProfileView>,
}

/// Tasks page template.
#[derive(Template, WebTemplate)]
#[template(path = "tasks.html")]
pub struct TasksTemplate {
    pub nav: NavContext,
    pub planned: Vec<&'static str>,
}

/// Events page template.
#[derive(Template, WebTemplate)]
#[template(path = "events.html")]
pub struct EventsTemplate {
    pub nav: NavContext,
    pub planned: Vec<&'static str>,
}

/// Family setup page template.
#[derive(Template, WebTemplate)]
#[template(path = "family.html")]
pub struct FamilyTemplate {
    pub nav: NavContext,
    pub hints: Vec<&'static str>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the dashboard.
///
/// The profile lookup is best effort: on failure the page renders with the
/// default greeting.
#[instrument(skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
) -> DashboardTemplate {
    let profile = match state.auth().fetch_profile(&session).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(error = %e, user_id = %session.user.id, "Failed to load profile");
            None
        }
    };

    DashboardTemplate {
        nav: NavContext::new(&session, "/dashboard"),
        greeting: greeting(profile.as_ref()),
        profile: profile.as_ref().map(ProfileView::from),
    }
}

/// Display the tasks page.
pub async fn tasks(RequireSession(session): RequireSession) -> TasksTemplate {
    TasksTemplate {
        nav: NavContext::new(&session, "/tasks"),
        planned: PLANNED_TASK_FEATURES.to_vec(),
    }
}

/// Display the events page.
pub async fn events(RequireSession(session): RequireSession) -> EventsTemplate {
    EventsTemplate {
        nav: NavContext::new(&session, "/events"),
        planned: PLANNED_EVENT_FEATURES.to_vec(),
    }
}

/// Display the family setup page.
pub async fn family(RequireSession(session): RequireSession) -> FamilyTemplate {
    FamilyTemplate {
        nav: NavContext::new(&session, "/family"),
        hints: FAMILY_SETUP_HINTS.to_vec(),
    }
}

/// Create the pages routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/tasks", get(tasks))
        .route("/events", get(events))
        .route("/family", get(family))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use familysync_core::{ColorTag, Email, FamilyId, FamilyRef, MemberRole, UserId};
    use secrecy::SecretString;
    use uuid::Uuid;

    use super::*;
    use crate::models::SessionTokens;
    use crate::services::auth::AuthUser;

    fn nav(path: &'static str) -> NavContext {
        NavContext {
            user_label: "alex@example.com".to_string(),
            current_path: path,
        }
    }

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            id: UserId::new(Uuid::new_v4()),
            family_id: FamilyId::new(Uuid::new_v4()),
            email: Email::parse("alex@example.com").unwrap(),
            name: name.to_string(),
            role: MemberRole::Parent,
            color: ColorTag::new("green"),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_seen: None,
            family: FamilyRef {
                id: FamilyId::new(Uuid::new_v4()),
                name: "The Rivers".to_string(),
            },
        }
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(None), "Welcome to FamilySync!");
        assert_eq!(
            greeting(Some(&profile("Alex Rivera"))),
            "Welcome back, Alex!"
        );
    }

    #[test]
    fn test_nav_context_uses_session_label() {
        let session = Session {
            tokens: SessionTokens {
                access_token: SecretString::from("t"),
                refresh_token: None,
            },
            user: AuthUser {
                id: UserId::new(Uuid::new_v4()),
                email: Some("sam@example.com".to_string()),
                role: None,
                created_at: None,
                last_sign_in_at: None,
            },
        };

        assert_eq!(NavContext::new(&session, "/tasks").user_label, "sam@example.com");
    }

    #[test]
    fn test_dashboard_renders_profile() {
        let profile = profile("Alex Rivera");
        let html = DashboardTemplate {
            nav: nav("/dashboard"),
            greeting: greeting(Some(&profile)),
            profile: Some(ProfileView::from(&profile)),
        }
        .render()
        .unwrap();

        assert!(html.contains("<h1>Dashboard</h1>"));
        assert!(html.contains("Welcome back, Alex!"));
        assert!(html.contains("The Rivers"));
        assert!(html.contains("member-color-green"));
        assert!(html.contains("alex@example.com"));
    }

    #[test]
    fn test_dashboard_renders_without_profile() {
        let html = DashboardTemplate {
            nav: nav("/dashboard"),
            greeting: greeting(None),
            profile: None,
        }
        .render()
        .unwrap();

        assert!(html.contains("<h1>Dashboard</h1>"));
        assert!(html.contains("Welcome to FamilySync!"));
        assert!(html.contains(r#"href="/tasks""#));
        assert!(html.contains(r#"href="/events""#));
        assert!(html.contains(r#"href="/family""#));
    }

    #[test]
    fn test_family_page_has_four_hints() {
        let html = FamilyTemplate {
            nav: nav("/family"),
            hints: FAMILY_SETUP_HINTS.to_vec(),
        }
        .render()
        .unwrap();

        assert!(html.contains("<h1>Family Setup</h1>"));
        assert_eq!(html.matches(r#"<li class="hint">"#).count(), 4);
    }

    #[test]
    fn test_placeholder_pages() {
        let tasks = TasksTemplate {
            nav: nav("/tasks"),
            planned: PLANNED_TASK_FEATURES.to_vec(),
        }
        .render()
        .unwrap();
        assert!(tasks.contains("<h1>Tasks</h1>"));
        assert!(tasks.contains("Coming soon"));

        let events = EventsTemplate {
            nav: nav("/events"),
            planned: PLANNED_EVENT_FEATURES.to_vec(),
        }
        .render()
        .unwrap();
        assert!(events.contains("<h1>Events</h1>"));
        assert!(events.contains("Shared family calendar"));
    }

    #[test]
    fn test_footer_has_product_and_year() {
        use chrono::Datelike;

        let html = TasksTemplate {
            nav: nav("/tasks"),
            planned: Vec::new(),
        }
        .render()
        .unwrap();

        assert!(html.contains("FamilySync"));
        assert!(html.contains(&Utc::now().year().to_string()));
    }
}
