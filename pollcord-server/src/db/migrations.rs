//! Schema creation for users, polls, links, and availability

use sqlx::PgPool;

/// Create all tables and indexes. Safe to run on every start.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGINT PRIMARY KEY
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS polls (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            creator_id BIGINT NOT NULL
                CONSTRAINT polls_creator_id_fkey REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_poll_links (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id BIGINT NOT NULL
                CONSTRAINT user_poll_links_user_id_fkey REFERENCES users(id) ON DELETE CASCADE,
            poll_id UUID NOT NULL
                CONSTRAINT user_poll_links_poll_id_fkey REFERENCES polls(id) ON DELETE CASCADE,
            CONSTRAINT user_poll_links_user_poll_key UNIQUE (user_id, poll_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS available_times (
            link_id UUID NOT NULL REFERENCES user_poll_links(id) ON DELETE CASCADE,
            time_available TIMESTAMPTZ NOT NULL,
            PRIMARY KEY (link_id, time_available)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_polls_creator ON polls(creator_id)")
        .execute(pool)
        .await?;
    // (user_id, poll_id) is covered by the unique constraint
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_poll_links_poll ON user_poll_links(poll_id)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");
    }
}
