//! Integration tests using TestContainers
//!
//! These run the Postgres adapters against a real database so the single
//! statement interaction update is exercised under real row locking.
//! They need Docker: `cargo test -- --ignored`.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use testcontainers_modules::{postgres::Postgres, testcontainers::runners::AsyncRunner};

use studyshare::application::ports::{ResourceFilter, ResourceRepository, UserRepository};
use studyshare::domain::entities::{Counters, Engagement, Resource, ResourceDetails};
use studyshare::domain::reconciler::InteractionDelta;
use studyshare::domain::value_objects::{
    InteractionAction, ResourceId, ResourceKind, ResourceStatus, UserId,
};
use studyshare::infrastructure::persistence::{PostgresResourceRepository, PostgresUserRepository};

/// Test environment using TestContainers
struct TestEnvironment {
    pool: PgPool,
    resources: Arc<PostgresResourceRepository>,
    users: PostgresUserRepository,
    _container: testcontainers::ContainerAsync<Postgres>,
}

impl TestEnvironment {
    async fn new() -> Self {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container.get_host().await.expect("Failed to get container host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");
        let database_url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            resources: Arc::new(PostgresResourceRepository::new(pool.clone())),
            users: PostgresUserRepository::new(pool.clone()),
            pool,
            _container: container,
        }
    }

    /// Approved resource with `likes=5, dislikes=2` and `u2` disliking it
    async fn seed_resource(&self, status: ResourceStatus) -> ResourceId {
        let engagement = Engagement::from_membership(
            Counters {
                likes: 5,
                dislikes: 2,
                downloads: 0,
                flags: 0,
            },
            vec![],
            vec![uid("u2")],
            vec![],
            vec![],
        );
        let now = Utc::now();
        let resource = Resource::reconstruct(
            ResourceId::new(),
            ResourceKind::Notes,
            ResourceDetails {
                title: "Operating systems".to_string(),
                description: String::new(),
                course: "B.Tech".to_string(),
                branch: "CSE".to_string(),
                year: "3".to_string(),
                semester: "5".to_string(),
                subject: "OS".to_string(),
                unit: Some("Unit 2".to_string()),
                exam_year: None,
                drive_link: "https://drive.example.com/os".to_string(),
            },
            status,
            "Owner".to_string(),
            uid("owner"),
            engagement,
            now,
            now,
        );
        let id = *resource.id();
        self.resources.insert(&resource).await.expect("insert");
        id
    }

    async fn apply(&self, id: &ResourceId, user: &str, action: InteractionAction, value: bool) -> Resource {
        self.resources
            .apply_interaction(id, &uid(user), &InteractionDelta::plan(action, value))
            .await
            .expect("apply")
            .expect("resource exists")
    }
}

fn uid(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_reaction_transitions_in_one_statement() {
    let env = TestEnvironment::new().await;
    let id = env.seed_resource(ResourceStatus::Approved).await;

    let after = env.apply(&id, "u1", InteractionAction::Like, true).await;
    assert_eq!(after.engagement().counters().likes, 6);
    assert_eq!(after.engagement().counters().dislikes, 2);

    let after = env.apply(&id, "u2", InteractionAction::Like, true).await;
    let view = after.engagement().view_for(Some(&uid("u2")));
    assert_eq!((view.likes, view.dislikes), (7, 1));
    assert!(view.user_liked && !view.user_disliked);

    // Retracting a reaction the user does not hold changes nothing
    let after = env.apply(&id, "u3", InteractionAction::Dislike, false).await;
    assert_eq!(after.engagement().counters().dislikes, 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_flags_and_downloads() {
    let env = TestEnvironment::new().await;
    let id = env.seed_resource(ResourceStatus::Approved).await;

    env.apply(&id, "u1", InteractionAction::Flag, true).await;
    env.apply(&id, "u1", InteractionAction::Flag, true).await;
    let after = env.apply(&id, "u1", InteractionAction::Flag, false).await;
    assert_eq!(after.engagement().counters().flags, 1);
    assert!(after.engagement().has_flagged(&uid("u1")));

    env.apply(&id, "u1", InteractionAction::Download, true).await;
    let after = env.apply(&id, "u2", InteractionAction::Download, false).await;
    assert_eq!(after.engagement().counters().downloads, 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_likes_are_not_lost() {
    let env = TestEnvironment::new().await;
    let id = env.seed_resource(ResourceStatus::Approved).await;

    let mut handles = Vec::new();
    for i in 0..25 {
        let repo = Arc::clone(&env.resources);
        handles.push(tokio::spawn(async move {
            let delta = InteractionDelta::plan(InteractionAction::Like, true);
            repo.apply_interaction(&id, &uid(&format!("voter-{}", i)), &delta)
                .await
                .expect("apply");
        }));
    }
    for handle in handles {
        handle.await.expect("task");
    }

    let stored = env.resources.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.engagement().counters().likes, 30);
    assert_eq!(stored.engagement().liked_by().count(), 25);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_saved_query_and_catalogue_filter() {
    let env = TestEnvironment::new().await;
    let approved = env.seed_resource(ResourceStatus::Approved).await;
    let pending = env.seed_resource(ResourceStatus::Pending).await;

    env.apply(&approved, "u1", InteractionAction::Save, true).await;
    env.apply(&pending, "u1", InteractionAction::Save, true).await;

    let saved = env.resources.list_saved_by(&uid("u1")).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id(), &approved);

    let filter = ResourceFilter {
        years: vec!["3".to_string(), "3rd Year".to_string()],
        unit: Some("2".to_string()),
        search: Some("operating".to_string()),
        limit: 10,
        ..ResourceFilter::default()
    };
    let listed = env.resources.list_approved(&filter).await.unwrap();
    assert_eq!(listed.len(), 1);

    let counts = env
        .resources
        .count_approved_by_uploaders(&[uid("owner")])
        .await
        .unwrap();
    assert_eq!(counts.get(&uid("owner")), Some(&1));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_missing_resource_and_reputation() {
    let env = TestEnvironment::new().await;

    let result = env
        .resources
        .apply_interaction(
            &ResourceId::new(),
            &uid("u1"),
            &InteractionDelta::plan(InteractionAction::Like, true),
        )
        .await
        .unwrap();
    assert!(result.is_none());

    sqlx::query("INSERT INTO users (id, name) VALUES ('u1', 'Asha')")
        .execute(&env.pool)
        .await
        .unwrap();
    env.users.add_reputation(&uid("u1"), 10).await.unwrap();

    let top = env.users.top_by_reputation(50).await.unwrap();
    assert_eq!(top[0].reputation, 10);
    assert_eq!(top[0].display_name(), "Asha");
}
