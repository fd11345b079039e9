//! Rating side channel: append-only, no read path.

use crate::AppState;
use axum::extract::{Form, State};
use axum::response::Redirect;
use tokio::io::AsyncWriteExt;

#[derive(serde::Deserialize)]
pub(crate) struct RatingForm {
    regnum: String,
    rating: String,
}

/// POST /submit-rating – appends the rating, then sends the browser back to the page.
pub(crate) async fn submit_rating(
    State(state): State<AppState>,
    Form(form): Form<RatingForm>,
) -> Redirect {
    match append_rating(&state.config.ratings_path, &form).await {
        Ok(()) => tracing::info!(
            target: "advisor::feedback",
            regnum = %log_field(&form.regnum),
            rating = %log_field(&form.rating),
            "Rating recorded"
        ),
        Err(e) => tracing::warn!(
            target: "advisor::feedback",
            path = %state.config.ratings_path,
            error = %e,
            "Failed to append rating"
        ),
    }
    Redirect::to("/")
}

/// One log line per rating: control characters (newlines included) are dropped.
fn log_field(value: &str) -> String {
    value.trim().chars().filter(|c| !c.is_control()).collect()
}

async fn append_rating(path: &str, form: &RatingForm) -> std::io::Result<()> {
    let line = format!(
        "Registration Number: {}, Rating: {}\n",
        log_field(&form.regnum),
        log_field(&form.rating)
    );
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
