use crate::error::UniformError;
use crate::generator::GeneratorClient;
use crate::media::MediaLibrary;
use crate::server::auth::{require_admin, require_nonce, NonceStore};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

pub struct AppState {
    pub generator: GeneratorClient,
    pub media: MediaLibrary,
    pub nonces: NonceStore,
    pub admin_token: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub nonce: String,
    pub logo_url: String,
    pub gender: String,
    pub outfit: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveParams {
    pub nonce: String,
    pub image_data: String,
}

#[derive(Serialize)]
struct NonceBody {
    success: bool,
    nonce: String,
}

#[derive(Serialize)]
struct GenerateBody {
    success: bool,
    images: Vec<String>,
}

#[derive(Serialize)]
struct SaveBody {
    success: bool,
    url: String,
}

#[derive(Serialize)]
struct ErrorDetails {
    message: String,
    code: &'static str,
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    error_details: ErrorDetails,
}

fn status_for(err: &UniformError) -> StatusCode {
    match err {
        UniformError::ValidationError(_) => StatusCode::BAD_REQUEST,
        UniformError::AuthorizationError(_) => StatusCode::UNAUTHORIZED,
        UniformError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        UniformError::ProviderError(_) | UniformError::EmptyResult(_) => StatusCode::BAD_GATEWAY,
        UniformError::ConfigError(_)
        | UniformError::StorageError(_)
        | UniformError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Every failure leaves through here: a uniform JSON body with a
/// human-readable message plus diagnostic details for the operator.
fn failure_response(err: UniformError, file: &'static str, line: u32) -> HttpResponse {
    log::error!("Request failed at {}:{}: {}", file, line, err);
    HttpResponse::build(status_for(&err)).json(ErrorBody {
        success: false,
        error: err.to_string(),
        error_details: ErrorDetails {
            message: err.to_string(),
            code: err.code(),
            file,
            line,
        },
    })
}

macro_rules! guard {
    ($check:expr) => {
        if let Err(err) = $check {
            return failure_response(err, file!(), line!());
        }
    };
}

pub async fn issue_nonce(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    guard!(require_admin(&req, &state.admin_token));

    HttpResponse::Ok().json(NonceBody {
        success: true,
        nonce: state.nonces.issue(),
    })
}

pub async fn generate(
    req: HttpRequest,
    state: web::Data<AppState>,
    params: web::Json<GenerateParams>,
) -> HttpResponse {
    guard!(require_nonce(&state.nonces, &params.nonce));
    guard!(require_admin(&req, &state.admin_token));

    match state
        .generator
        .generate_uniform_image(&params.logo_url, &params.gender, &params.outfit)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(GenerateBody {
            success: true,
            images: response.images,
        }),
        Err(err) => failure_response(err, file!(), line!()),
    }
}

pub async fn save(
    req: HttpRequest,
    state: web::Data<AppState>,
    params: web::Json<SaveParams>,
) -> HttpResponse {
    guard!(require_nonce(&state.nonces, &params.nonce));
    guard!(require_admin(&req, &state.admin_token));

    if params.image_data.trim().is_empty() {
        return failure_response(
            UniformError::ValidationError("Missing image data".into()),
            file!(),
            line!(),
        );
    }

    match state.media.save(&params.image_data).await {
        Ok(saved) => HttpResponse::Ok().json(SaveBody {
            success: true,
            url: saved.url,
        }),
        Err(err) => failure_response(err, file!(), line!()),
    }
}
