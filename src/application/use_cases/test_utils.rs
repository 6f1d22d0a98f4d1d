//! Shared fixtures for use case tests

use chrono::{Duration, Utc};

use crate::domain::entities::{Counters, Engagement, Resource, ResourceDetails, UserProfile};
use crate::domain::value_objects::{ResourceId, ResourceKind, ResourceStatus, UserId};

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn details(title: &str) -> ResourceDetails {
    ResourceDetails {
        title: title.to_string(),
        description: "Handwritten notes".to_string(),
        course: "B.Tech".to_string(),
        branch: "CSE".to_string(),
        year: "2".to_string(),
        semester: "3".to_string(),
        subject: "Data Structures".to_string(),
        unit: Some("Unit 2".to_string()),
        exam_year: None,
        drive_link: "https://drive.example.com/file/abc".to_string(),
    }
}

/// Approved resource uploaded by `uploader`, created `age_minutes` ago
pub fn resource(uploader: &str, age_minutes: i64, engagement: Engagement) -> Resource {
    let created_at = Utc::now() - Duration::minutes(age_minutes);
    Resource::reconstruct(
        ResourceId::new(),
        ResourceKind::Notes,
        details("Trees and graphs"),
        ResourceStatus::Approved,
        "Uploader".to_string(),
        user(uploader),
        engagement,
        created_at,
        created_at,
    )
}

/// Engagement with `likes=5, dislikes=2` and `u2` in the disliked set
pub fn seeded_engagement() -> Engagement {
    Engagement::from_membership(
        Counters {
            likes: 5,
            dislikes: 2,
            downloads: 0,
            flags: 0,
        },
        vec![],
        vec![user("u2")],
        vec![],
        vec![],
    )
}

pub fn profile(id: &str, trusted: bool) -> UserProfile {
    UserProfile {
        is_trusted: trusted,
        ..UserProfile::new(user(id), Some(format!("User {id}")))
    }
}
