//! Audit the resources table for engagement state the service would never
//! produce, optionally repairing it.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::env;

#[derive(Parser)]
#[command(about = "Check resource engagement invariants")]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    /// Repair the rows that can be repaired mechanically
    #[arg(long)]
    fix: bool,
}

struct Check {
    name: &'static str,
    find: &'static str,
    repair: Option<&'static str>,
}

const CHECKS: &[Check] = &[
    Check {
        name: "users both liking and disliking",
        find: "SELECT id FROM resources WHERE liked_by && disliked_by",
        // Liked wins, matching how the service reads such rows
        repair: Some(
            r#"UPDATE resources SET
                   dislikes = GREATEST(dislikes - cardinality(ARRAY(
                       SELECT unnest(disliked_by) INTERSECT SELECT unnest(liked_by))), 0),
                   disliked_by = ARRAY(
                       SELECT unnest(disliked_by) EXCEPT SELECT unnest(liked_by))
               WHERE id = $1"#,
        ),
    },
    Check {
        name: "duplicate set members",
        find: r#"SELECT id FROM resources WHERE
                   cardinality(liked_by) <> cardinality(ARRAY(SELECT DISTINCT unnest(liked_by)))
                OR cardinality(disliked_by) <> cardinality(ARRAY(SELECT DISTINCT unnest(disliked_by)))
                OR cardinality(saved_by) <> cardinality(ARRAY(SELECT DISTINCT unnest(saved_by)))
                OR cardinality(flagged_by) <> cardinality(ARRAY(SELECT DISTINCT unnest(flagged_by)))"#,
        repair: Some(
            r#"UPDATE resources SET
                   liked_by = ARRAY(SELECT DISTINCT unnest(liked_by)),
                   disliked_by = ARRAY(SELECT DISTINCT unnest(disliked_by)),
                   saved_by = ARRAY(SELECT DISTINCT unnest(saved_by)),
                   flagged_by = ARRAY(SELECT DISTINCT unnest(flagged_by))
               WHERE id = $1"#,
        ),
    },
    Check {
        name: "counters below their set size",
        find: r#"SELECT id FROM resources WHERE
                   likes < cardinality(liked_by)
                OR dislikes < cardinality(disliked_by)
                OR flags < cardinality(flagged_by)"#,
        repair: Some(
            r#"UPDATE resources SET
                   likes = GREATEST(likes, cardinality(liked_by)),
                   dislikes = GREATEST(dislikes, cardinality(disliked_by)),
                   flags = GREATEST(flags, cardinality(flagged_by))
               WHERE id = $1"#,
        ),
    },
    Check {
        name: "question papers without exam year",
        find: "SELECT id FROM resources WHERE resource_type = 'pyq' AND (exam_year IS NULL OR exam_year = '')",
        repair: None,
    },
];

async fn run_check(pool: &PgPool, check: &Check, fix: bool) -> anyhow::Result<usize> {
    let rows = sqlx::query(check.find).fetch_all(pool).await?;

    println!("{}: {}", check.name, rows.len());
    for row in rows.iter() {
        let id: uuid::Uuid = row.get("id");
        println!("  id: {}", id);

        if let (true, Some(repair)) = (fix, check.repair) {
            sqlx::query(repair).bind(id).execute(pool).await?;
            println!("  fixed: {}", id);
        }
    }

    Ok(rows.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .ok_or_else(|| {
            anyhow::anyhow!("DATABASE_URL must be set or passed with --database-url")
        })?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    let mut problems = 0;
    for check in CHECKS {
        problems += run_check(&pool, check, cli.fix).await?;
    }

    if problems > 0 && !cli.fix {
        println!("{} problem rows found; rerun with --fix to repair", problems);
    }

    Ok(())
}
