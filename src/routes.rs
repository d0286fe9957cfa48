use std::sync::Arc;

use log::debug;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::UnsupportedMediaType;
use warp::{Filter, Rejection, Reply};

use crate::login::{LoginRequest, LoginResponse, MSG_BAD_BODY, MSG_REQUIRED};
use crate::verifier::Verifier;

const BODY_LIMIT: u64 = 16 * 1024;

pub fn routes(
    verifier: Arc<Verifier>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["POST"])
        .allow_headers(vec![
            "accept",
            "authorization",
            "content-type",
            "origin",
            "x-requested-with",
        ]);

    login(verifier)
        .with(cors)
        .with(warp::log("credcheck"))
}

fn login(
    verifier: Arc<Verifier>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("login")
        .and(warp::post())
        .and(warp::any().map(move || Arc::clone(&verifier)))
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .then(handle_login)
        .recover(bad_body)
        .unify()
}

async fn handle_login(verifier: Arc<Verifier>, body: LoginRequest) -> warp::reply::Response {
    let result = match body.validate() {
        Ok(creds) => verifier.verify(creds).await,
        Err(result) => {
            debug!("rejecting login request without username or password");
            result
        }
    };

    let (status, body) = result.reply();
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

async fn bad_body(rejection: Rejection) -> Result<warp::reply::Response, Rejection> {
    if let Some(e) = rejection.find::<BodyDeserializeError>() {
        debug!("undecodable login body: {e}");
        return Ok(json_fail(MSG_BAD_BODY, StatusCode::BAD_REQUEST));
    }

    // a non-JSON body carries no credentials at all
    if rejection.find::<UnsupportedMediaType>().is_some() {
        debug!("login body is not JSON");
        return Ok(json_fail(MSG_REQUIRED, StatusCode::BAD_REQUEST));
    }

    Err(rejection)
}

fn json_fail(message: &'static str, status: StatusCode) -> warp::reply::Response {
    warp::reply::with_status(warp::reply::json(&LoginResponse::fail(message)), status)
        .into_response()
}
