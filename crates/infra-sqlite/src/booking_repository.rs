// SQLite BookingRepository Implementation

use async_trait::async_trait;
use sqlx::SqlitePool;
use tolka_core::domain::{AdminReview, Distance, Job, JobId, JobStatus, JobUpdate, NewJob, UserId};
use tolka_core::error::{AppError, Result};
use tolka_core::port::BookingRepository;

// Helper to convert sqlx::Error to AppError with structured information
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // SQLite error codes: https://www.sqlite.org/rescode.html
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();
                match code_str {
                    "2067" | "1555" => AppError::Database(format!(
                        "Unique constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "787" | "3850" => AppError::Database(format!(
                        "Foreign key constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "5" => AppError::Database(format!(
                        "Database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    "13" => AppError::Database(format!("Database full: {}", db_err.message())),
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => AppError::Database(format!("Column not found: {}", col)),
        _ => AppError::Database(err.to_string()),
    }
}

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Disambiguate a conditional update that hit no row: the job is either
    /// missing or sits in a state the transition does not start from.
    async fn no_rows_hit(&self, id: JobId, to: JobStatus) -> AppError {
        let current: std::result::Result<Option<String>, sqlx::Error> =
            sqlx::query_scalar("SELECT status FROM jobs WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await;

        match current {
            Ok(None) => AppError::NotFound(format!("Job {} not found", id)),
            Ok(Some(status)) => AppError::InvalidState(format!(
                "Cannot move job {} from {} to {}",
                id, status, to
            )),
            Err(err) => map_sqlx_error(err),
        }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn insert_job(&self, job: &NewJob) -> Result<Job> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (
                customer_id, translator_id, status,
                from_language, to_language, due_at, duration_minutes, immediate, remarks,
                session_time, admin_comments, flagged, manually_handled, by_admin,
                created_at, updated_at
            ) VALUES (?, NULL, ?, ?, ?, ?, ?, ?, ?, '', '', 0, 0, 0, ?, ?)
            RETURNING *
            "#,
        )
        .bind(job.customer_id)
        .bind(JobStatus::Pending.to_string())
        .bind(&job.from_language)
        .bind(&job.to_language)
        .bind(job.due_at)
        .bind(job.duration_minutes)
        .bind(if job.immediate { 1 } else { 0 })
        .bind(&job.remarks)
        .bind(job.created_at)
        .bind(job.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into_job())
    }

    async fn find_job(&self, id: JobId) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_job()))
    }

    async fn update_job(&self, id: JobId, changes: &JobUpdate, now_millis: i64) -> Result<Job> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET from_language = COALESCE(?, from_language),
                to_language = COALESCE(?, to_language),
                due_at = COALESCE(?, due_at),
                duration_minutes = COALESCE(?, duration_minutes),
                remarks = COALESCE(?, remarks),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&changes.from_language)
        .bind(&changes.to_language)
        .bind(changes.due_at)
        .bind(changes.duration_minutes)
        .bind(&changes.remarks)
        .bind(now_millis)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|r| r.into_job())
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))
    }

    async fn jobs_for_user(&self, user_id: UserId) -> Result<Vec<Job>> {
        let rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT * FROM jobs
            WHERE customer_id = ? OR translator_id = ?
            ORDER BY due_at ASC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_job()).collect())
    }

    async fn all_jobs(&self) -> Result<Vec<Job>> {
        let rows: Vec<JobRow> = sqlx::query_as("SELECT * FROM jobs ORDER BY due_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_job()).collect())
    }

    async fn job_history_for_user(&self, user_id: UserId) -> Result<Vec<Job>> {
        let rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT * FROM jobs
            WHERE (customer_id = ? OR translator_id = ?)
              AND status IN ('COMPLETED', 'CANCELLED', 'TIMEDOUT', 'NOT_CARRIED_OUT_CUSTOMER')
            ORDER BY due_at DESC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_job()).collect())
    }

    async fn potential_jobs_for(&self, translator_id: UserId) -> Result<Vec<Job>> {
        // A translator's own bookings as a customer are not potential work
        let rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT * FROM jobs
            WHERE status = 'PENDING'
              AND translator_id IS NULL
              AND customer_id != ?
            ORDER BY due_at ASC
            "#,
        )
        .bind(translator_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_job()).collect())
    }

    async fn assign_translator(
        &self,
        id: JobId,
        translator_id: UserId,
        now_millis: i64,
    ) -> Result<Job> {
        // Conditional single-row update: of two racing accepts, one wins
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET status = ?, translator_id = ?, updated_at = ?
            WHERE id = ? AND status = ? AND translator_id IS NULL
            RETURNING *
            "#,
        )
        .bind(JobStatus::Assigned.to_string())
        .bind(translator_id)
        .bind(now_millis)
        .bind(id)
        .bind(JobStatus::Pending.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => Ok(row.into_job()),
            None => {
                let exists: Option<String> =
                    sqlx::query_scalar("SELECT status FROM jobs WHERE id = ?")
                        .bind(id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(map_sqlx_error)?;

                match exists {
                    None => Err(AppError::NotFound(format!("Job {} not found", id))),
                    Some(_) => Err(AppError::Conflict(format!("Job {} is already taken", id))),
                }
            }
        }
    }

    async fn update_status(
        &self,
        id: JobId,
        from: &[JobStatus],
        to: JobStatus,
        now_millis: i64,
    ) -> Result<()> {
        let placeholders = vec!["?"; from.len()].join(", ");
        let sql = format!(
            "UPDATE jobs SET status = ?, updated_at = ? WHERE id = ? AND status IN ({})",
            placeholders
        );

        let mut query = sqlx::query(&sql).bind(to.to_string()).bind(now_millis).bind(id);
        for status in from {
            query = query.bind(status.to_string());
        }

        let result = query.execute(&self.pool).await.map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            Err(self.no_rows_hit(id, to).await)
        } else {
            Ok(())
        }
    }

    async fn complete_job(&self, id: JobId, session_time: &str, now_millis: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = ?, session_time = ?, updated_at = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(JobStatus::Completed.to_string())
        .bind(session_time)
        .bind(now_millis)
        .bind(id)
        .bind(JobStatus::Assigned.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            Err(self.no_rows_hit(id, JobStatus::Completed).await)
        } else {
            Ok(())
        }
    }

    async fn reopen_job(&self, id: JobId, now_millis: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = ?, translator_id = NULL, updated_at = ?
            WHERE id = ? AND status IN ('CANCELLED', 'TIMEDOUT')
            "#,
        )
        .bind(JobStatus::Pending.to_string())
        .bind(now_millis)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            Err(self.no_rows_hit(id, JobStatus::Pending).await)
        } else {
            Ok(())
        }
    }

    async fn upsert_distance(&self, job_id: JobId, distance: &str, time: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO distances (job_id, distance, time)
            VALUES (?, ?, ?)
            ON CONFLICT(job_id) DO UPDATE SET distance = excluded.distance, time = excluded.time
            "#,
        )
        .bind(job_id)
        .bind(distance)
        .bind(time)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_distance(&self, job_id: JobId) -> Result<Option<Distance>> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT distance, time FROM distances WHERE job_id = ?")
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(|(distance, time)| Distance {
            job_id,
            distance,
            time,
        }))
    }

    async fn update_admin_review(
        &self,
        job_id: JobId,
        review: &AdminReview,
        now_millis: i64,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET admin_comments = ?, session_time = ?, flagged = ?,
                manually_handled = ?, by_admin = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&review.admin_comments)
        .bind(&review.session_time)
        .bind(if review.flagged { 1 } else { 0 })
        .bind(if review.manually_handled { 1 } else { 0 })
        .bind(if review.by_admin { 1 } else { 0 })
        .bind(now_millis)
        .bind(job_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            Err(AppError::NotFound(format!("Job {} not found", job_id)))
        } else {
            Ok(())
        }
    }
}

/// SQLite row representation of a job
#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: i64,
    customer_id: i64,
    translator_id: Option<i64>,
    status: String,
    from_language: String,
    to_language: String,
    due_at: i64,
    duration_minutes: i64,
    immediate: i64, // SQLite boolean as integer
    remarks: Option<String>,
    session_time: String,
    admin_comments: String,
    flagged: i64,
    manually_handled: i64,
    by_admin: i64,
    created_at: i64,
    updated_at: i64,
}

impl JobRow {
    fn into_job(self) -> Job {
        let status = match self.status.as_str() {
            "PENDING" => JobStatus::Pending,
            "ASSIGNED" => JobStatus::Assigned,
            "COMPLETED" => JobStatus::Completed,
            "CANCELLED" => JobStatus::Cancelled,
            "TIMEDOUT" => JobStatus::Timedout,
            "NOT_CARRIED_OUT_CUSTOMER" => JobStatus::NotCarriedOutCustomer,
            _ => JobStatus::Cancelled, // Default fallback
        };

        Job {
            id: self.id,
            customer_id: self.customer_id,
            translator_id: self.translator_id,
            status,
            from_language: self.from_language,
            to_language: self.to_language,
            due_at: self.due_at,
            duration_minutes: self.duration_minutes,
            immediate: self.immediate != 0,
            remarks: self.remarks,
            session_time: self.session_time,
            admin_comments: self.admin_comments,
            flagged: self.flagged != 0,
            manually_handled: self.manually_handled != 0,
            by_admin: self.by_admin != 0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
