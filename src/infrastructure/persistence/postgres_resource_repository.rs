use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{RepositoryError, ResourceFilter, ResourceRepository};
use crate::domain::entities::{Counters, Engagement, Resource, ResourceDetails};
use crate::domain::reconciler::InteractionDelta;
use crate::domain::value_objects::{ResourceId, ResourceKind, ResourceStatus, UserId};

const RESOURCE_COLUMNS: &str = r#"
    id, resource_type, title, description, course, branch, year, semester,
    subject, unit, exam_year, drive_link, status, uploader, uploader_id,
    likes, dislikes, downloads, flags,
    liked_by, disliked_by, saved_by, flagged_by,
    created_at, updated_at
"#;

pub struct PostgresResourceRepository {
    pool: PgPool,
}

impl PostgresResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for PostgresResourceRepository {
    async fn insert(&self, resource: &Resource) -> Result<(), RepositoryError> {
        let details = resource.details();
        let counters = resource.engagement().counters();
        let engagement = resource.engagement();

        sqlx::query(
            r#"
            INSERT INTO resources (
                id, resource_type, title, description, course, branch, year, semester,
                subject, unit, exam_year, drive_link, status, uploader, uploader_id,
                likes, dislikes, downloads, flags,
                liked_by, disliked_by, saved_by, flagged_by,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
            "#,
        )
        .bind(resource.id().as_uuid())
        .bind(resource.kind().as_str())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.course)
        .bind(&details.branch)
        .bind(&details.year)
        .bind(&details.semester)
        .bind(&details.subject)
        .bind(details.unit.as_deref())
        .bind(details.exam_year.as_deref())
        .bind(&details.drive_link)
        .bind(resource.status().as_str())
        .bind(resource.uploader())
        .bind(resource.uploader_id().as_str())
        .bind(to_db_count(counters.likes)?)
        .bind(to_db_count(counters.dislikes)?)
        .bind(to_db_count(counters.downloads)?)
        .bind(to_db_count(counters.flags)?)
        .bind(user_ids(engagement.liked_by()))
        .bind(user_ids(engagement.disliked_by()))
        .bind(user_ids(engagement.saved_by()))
        .bind(user_ids(engagement.flagged_by().iter()))
        .bind(resource.created_at())
        .bind(resource.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Resource>, RepositoryError> {
        let sql = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1");
        let row = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ResourceRow::into_domain).transpose()
    }

    async fn apply_interaction(
        &self,
        id: &ResourceId,
        user: &UserId,
        delta: &InteractionDelta,
    ) -> Result<Option<Resource>, RepositoryError> {
        let ops = delta.membership_ops();

        // Every CASE reads the pre-update row, so counters move only on real
        // membership transitions and the whole delta lands in one statement.
        let sql = format!(
            r#"
            UPDATE resources SET
                likes = CASE
                    WHEN $3 = 1 AND NOT ($2 = ANY(liked_by)) THEN likes + 1
                    WHEN $3 = 2 AND $2 = ANY(liked_by) THEN GREATEST(likes - 1, 0)
                    ELSE likes END,
                liked_by = CASE
                    WHEN $3 = 1 AND NOT ($2 = ANY(liked_by)) THEN array_append(liked_by, $2)
                    WHEN $3 = 2 THEN array_remove(liked_by, $2)
                    ELSE liked_by END,
                dislikes = CASE
                    WHEN $4 = 1 AND NOT ($2 = ANY(disliked_by)) THEN dislikes + 1
                    WHEN $4 = 2 AND $2 = ANY(disliked_by) THEN GREATEST(dislikes - 1, 0)
                    ELSE dislikes END,
                disliked_by = CASE
                    WHEN $4 = 1 AND NOT ($2 = ANY(disliked_by)) THEN array_append(disliked_by, $2)
                    WHEN $4 = 2 THEN array_remove(disliked_by, $2)
                    ELSE disliked_by END,
                saved_by = CASE
                    WHEN $5 = 1 AND NOT ($2 = ANY(saved_by)) THEN array_append(saved_by, $2)
                    WHEN $5 = 2 THEN array_remove(saved_by, $2)
                    ELSE saved_by END,
                flags = CASE
                    WHEN $6 AND NOT ($2 = ANY(flagged_by)) THEN flags + 1
                    ELSE flags END,
                flagged_by = CASE
                    WHEN $6 AND NOT ($2 = ANY(flagged_by)) THEN array_append(flagged_by, $2)
                    ELSE flagged_by END,
                downloads = downloads + $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {RESOURCE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(id.as_uuid())
            .bind(user.as_str())
            .bind(ops.liked.code())
            .bind(ops.disliked.code())
            .bind(ops.saved.code())
            .bind(ops.flag)
            .bind(to_db_count(ops.downloads)?)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ResourceRow::into_domain).transpose()
    }

    async fn list_approved(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, RepositoryError> {
        let mut conditions = vec!["status = 'approved'".to_string()];
        let mut binds: Vec<Bind> = Vec::new();

        let mut push = |template: &str, bind: Bind| {
            binds.push(bind);
            conditions.push(template.replace('?', &format!("${}", binds.len())));
        };

        if let Some(kind) = filter.kind {
            push("resource_type = ?", Bind::Text(kind.as_str().to_string()));
        }
        if let Some(branch) = &filter.branch {
            push("branch = ?", Bind::Text(branch.clone()));
        }
        if let Some(course) = &filter.course {
            push("course = ?", Bind::Text(course.clone()));
        }
        if let Some(semester) = &filter.semester {
            push("semester = ?", Bind::Text(semester.clone()));
        }
        if let Some(subject) = &filter.subject {
            push("subject = ?", Bind::Text(subject.clone()));
        }
        if !filter.years.is_empty() {
            push("year = ANY(?)", Bind::TextArray(filter.years.clone()));
        }
        if let Some(exam_year) = &filter.exam_year {
            push("exam_year = ?", Bind::Text(exam_year.clone()));
        }
        if let Some(unit) = &filter.unit {
            push("unit ILIKE ?", Bind::Text(like_pattern(unit)));
        }
        if let Some(search) = &filter.search {
            push(
                "(title ILIKE ? OR description ILIKE ? OR subject ILIKE ? OR uploader ILIKE ?)",
                Bind::Text(like_pattern(search)),
            );
        }

        let sql = format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM resources
            WHERE {}
            ORDER BY created_at DESC
            LIMIT ${}
            "#,
            conditions.join(" AND "),
            binds.len() + 1
        );

        let mut query = sqlx::query_as::<_, ResourceRow>(&sql);
        for bind in binds {
            query = match bind {
                Bind::Text(value) => query.bind(value),
                Bind::TextArray(values) => query.bind(values),
            };
        }
        query = query.bind(filter.limit);

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(ResourceRow::into_domain).collect()
    }

    async fn list_saved_by(&self, user: &UserId) -> Result<Vec<Resource>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM resources
            WHERE saved_by @> ARRAY[$1]::text[] AND status = 'approved'
            ORDER BY created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(user.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ResourceRow::into_domain).collect()
    }

    async fn list_uploaded_by(&self, user: &UserId) -> Result<Vec<Resource>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM resources
            WHERE uploader_id = $1
            ORDER BY created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(user.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ResourceRow::into_domain).collect()
    }

    async fn count_approved_by_uploaders(
        &self,
        uploaders: &[UserId],
    ) -> Result<HashMap<UserId, u64>, RepositoryError> {
        let ids: Vec<String> = uploaders.iter().map(|u| u.as_str().to_string()).collect();

        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT uploader_id, COUNT(*)
            FROM resources
            WHERE status = 'approved' AND uploader_id = ANY($1)
            GROUP BY uploader_id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, count)| Ok((parse_user(id)?, from_db_count(count)?)))
            .collect()
    }

    async fn delete(&self, id: &ResourceId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

enum Bind {
    Text(String),
    TextArray(Vec<String>),
}

/// Case-insensitive substring pattern with LIKE wildcards escaped
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn user_ids<'a>(users: impl Iterator<Item = &'a UserId>) -> Vec<String> {
    users.map(|u| u.as_str().to_string()).collect()
}

fn to_db_count(value: u64) -> Result<i64, RepositoryError> {
    i64::try_from(value).map_err(|_| RepositoryError::Internal(format!("count {} out of range", value)))
}

fn from_db_count(value: i64) -> Result<u64, RepositoryError> {
    u64::try_from(value)
        .map_err(|_| RepositoryError::SerializationError(format!("negative count {}", value)))
}

fn parse_user(id: String) -> Result<UserId, RepositoryError> {
    UserId::new(id).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn parse_users(ids: Vec<String>) -> Result<Vec<UserId>, RepositoryError> {
    ids.into_iter().map(parse_user).collect()
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct ResourceRow {
    id: uuid::Uuid,
    resource_type: String,
    title: String,
    description: String,
    course: String,
    branch: String,
    year: String,
    semester: String,
    subject: String,
    unit: Option<String>,
    exam_year: Option<String>,
    drive_link: String,
    status: String,
    uploader: String,
    uploader_id: String,
    likes: i64,
    dislikes: i64,
    downloads: i64,
    flags: i64,
    liked_by: Vec<String>,
    disliked_by: Vec<String>,
    saved_by: Vec<String>,
    flagged_by: Vec<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl ResourceRow {
    fn into_domain(self) -> Result<Resource, RepositoryError> {
        let kind = self
            .resource_type
            .parse::<ResourceKind>()
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        let status = self
            .status
            .parse::<ResourceStatus>()
            .map_err(RepositoryError::SerializationError)?;

        let counters = Counters {
            likes: from_db_count(self.likes)?,
            dislikes: from_db_count(self.dislikes)?,
            downloads: from_db_count(self.downloads)?,
            flags: from_db_count(self.flags)?,
        };

        let engagement = Engagement::from_membership(
            counters,
            parse_users(self.liked_by)?,
            parse_users(self.disliked_by)?,
            parse_users(self.saved_by)?,
            parse_users(self.flagged_by)?,
        );

        let details = ResourceDetails {
            title: self.title,
            description: self.description,
            course: self.course,
            branch: self.branch,
            year: self.year,
            semester: self.semester,
            subject: self.subject,
            unit: self.unit,
            exam_year: self.exam_year,
            drive_link: self.drive_link,
        };

        Ok(Resource::reconstruct(
            ResourceId::from_uuid(self.id),
            kind,
            details,
            status,
            self.uploader,
            parse_user(self.uploader_id)?,
            engagement,
            self.created_at,
            self.updated_at,
        ))
    }
}
