//! Periodic keep-alive ping
//!
//! Free-tier hosts shut idle services down; this task keeps the instance
//! warm by pinging it at a randomized 5-10 minute interval. Failures are
//! logged and swallowed. The task owns no shared state and is aborted at
//! shutdown without blocking process exit.

use std::time::Duration;

use rand::Rng;

/// Ping `url` forever, sleeping 300-600 s between attempts
pub async fn run(url: String) {
    let client = reqwest::Client::new();

    loop {
        match client.get(&url).send().await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "keep-alive ping sent");
            }
            Err(e) => {
                tracing::warn!(error = %e, "keep-alive ping failed");
            }
        }

        let wait = rand::thread_rng().gen_range(300..=600);
        tokio::time::sleep(Duration::from_secs(wait)).await;
    }
}
