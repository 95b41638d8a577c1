use crate::api::{dispatch_effects, ScoreBoard, ScoreReporter, TrackingReporter, WordProvider};
use crate::logger;
use crate::models::{ApiRequest, ApiResponse};
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::sync::Arc;
use std::thread;

/// Everything the worker needs from the remote API.
pub trait QuizApi: WordProvider + ScoreReporter + TrackingReporter + ScoreBoard {}

impl<T> QuizApi for T where T: WordProvider + ScoreReporter + TrackingReporter + ScoreBoard {}

/// Runs API calls off the UI thread. The worker owns one tokio runtime and
/// stops when the request channel disconnects.
pub fn spawn_api_worker<C>(
    client: Arc<C>,
    api_tx: Sender<ApiResponse>,
    api_rx: Receiver<ApiRequest>,
) -> io::Result<thread::JoinHandle<()>>
where
    C: QuizApi + 'static,
{
    thread::Builder::new()
        .name("wortquiz::api_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Failed to start API runtime: {}", e));
                    return;
                }
            };

            while let Ok(request) = api_rx.recv() {
                let response = rt.block_on(handle_request(client.as_ref(), request));
                if api_tx.send(response).is_err() {
                    break;
                }
            }
            logger::log("API worker channel disconnected, exiting");
        })
}

async fn handle_request<C>(client: &C, request: ApiRequest) -> ApiResponse
where
    C: QuizApi + ?Sized,
{
    match request {
        ApiRequest::FetchWords {
            request_id,
            game,
            difficulty,
        } => {
            logger::log(&format!(
                "Worker fetching {} words (request {})",
                game, request_id
            ));
            let result = client.fetch_words(game, difficulty).await.map_err(|e| {
                logger::log(&format!("Word fetch failed: {}", e));
                format!("Could not load words: {}", e)
            });
            ApiResponse::Words { request_id, result }
        }
        ApiRequest::Dispatch(effects) => {
            let report = dispatch_effects(client, &effects).await;
            ApiResponse::EffectsDelivered {
                delivered: report.delivered,
                failed: report.failed,
            }
        }
        ApiRequest::FetchScores { request_id } => {
            let result = client.fetch_scores().await.map_err(|e| {
                logger::log(&format!("Error fetching scores: {}", e));
                format!("Could not load scores: {}", e)
            });
            ApiResponse::Scores { request_id, result }
        }
    }
}
