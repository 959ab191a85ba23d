//! HTTP JSON interface for the radix root-finding service.
//!
//! The server exposes:
//! - `POST /calculate` — runs one solve and returns the full payload
//! - `GET /schema` — returns a default-shaped request document
//!
//! Every request is handled synchronously and independently; the solver
//! layers share no state, so no locking is needed.

use std::convert::Infallible;

use serde::Serialize;
use thiserror::Error;
use warp::Filter;
use warp::http::StatusCode;

use radix_core::request::SolveRequest;
use radix_core::response::{self, SolveResponse};
use radix_core::solve;
use radix_plot::{Figure, RenderError, render_png};

/// Failures surfaced to the client as an `{"error": ...}` payload.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Solve(#[from] solve::Error),

    #[error("failed to render plot: {0}")]
    Render(#[from] RenderError),
}

impl ServiceError {
    /// Solve failures are the caller's input; rendering is ours.
    fn status(&self) -> StatusCode {
        match self {
            Self::Solve(_) => StatusCode::BAD_REQUEST,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Runs one request end to end: solve, render, assemble.
///
/// # Errors
///
/// Returns a [`ServiceError`] if solving or rendering fails; an
/// exhausted iteration budget is not a failure and still yields the
/// full payload.
pub fn handle(request: &SolveRequest) -> Result<SolveResponse, ServiceError> {
    let outcome = solve::solve(request)?;

    let mut figure = Figure::new((outcome.root, outcome.f_root)).with_points(&outcome.points);
    if let Some((a, b)) = outcome.bracket {
        figure = figure.with_bracket(a, b);
    }
    let png = render_png(|x| outcome.expr.eval(x).ok(), &figure)?;

    Ok(response::assemble(outcome, &png))
}

/// Builds the service routes.
pub fn routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let calculate = warp::path("calculate")
        .and(warp::post())
        .and(warp::body::json())
        .map(|request: SolveRequest| match handle(&request) {
            Ok(payload) => {
                tracing::info!(
                    method = %request.method,
                    root = payload.root,
                    iterations = payload.iterations.len(),
                    "solve completed"
                );
                warp::reply::with_status(warp::reply::json(&payload), StatusCode::OK)
            }
            Err(failure) => {
                tracing::warn!(method = %request.method, error = %failure, "solve rejected");
                let body = ErrorBody {
                    error: failure.to_string(),
                };
                warp::reply::with_status(warp::reply::json(&body), failure.status())
            }
        });

    let schema = warp::path("schema")
        .and(warp::get())
        .map(|| warp::reply::json(&SolveRequest::default()));

    calculate.or(schema)
}

/// Keeps rejected requests (unknown routes, malformed bodies) on the
/// same `{"error": ...}` contract as solve failures.
async fn recover(rejection: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, error) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(cause) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, cause.to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "unhandled error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody { error }),
        status,
    ))
}

/// Serves the API on the loopback interface.
pub async fn run(port: u16) {
    tracing::info!(port, "radix server listening");
    warp::serve(routes().recover(recover))
        .run(([127, 0, 0, 1], port))
        .await;
}
