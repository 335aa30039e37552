//! Files REST API: list, read, create and update markdown notes.
//!
//! Thin adapter over [`FileStore`]: every store call runs on the blocking
//! pool and its error kind is mapped to an HTTP status.

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use notes_api_types::{
    ContentResponse, ErrorResponse, FileContent, FrontmatterResponse, ListQuery, ListType,
    ReadContent, ReadQuery, StatusResponse, UpdateQuery, UpdateType, WriteQuery,
};
use serde_json::{Map, Value};

use crate::files::{ErrorKind, FileError, FileResult, FileStore, Frontmatter};

/// HTTP status for each error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidPath
        | ErrorKind::InvalidContentType
        | ErrorKind::AlreadyExists
        | ErrorKind::ParseError => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound | ErrorKind::NotAFile | ErrorKind::NotADirectory => {
            StatusCode::NOT_FOUND
        }
        ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &FileError) -> HttpResponse {
    let status = status_for(err.kind());
    if status.is_server_error() {
        log::error!("[FILES] {}", err);
    } else {
        log::warn!("[FILES] {}", err);
    }
    HttpResponse::build(status).json(ErrorResponse::new(
        status.as_u16(),
        err.kind().as_str(),
        err.to_string(),
    ))
}

/// Run a store operation on the blocking thread pool
async fn run<T, F>(store: web::Data<FileStore>, op: F) -> FileResult<T>
where
    F: FnOnce(&FileStore) -> FileResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || op(store.get_ref()))
        .await
        .map_err(|e| FileError::Unexpected(format!("File task failed: {}", e)))?
}

fn to_frontmatter(map: Map<String, Value>) -> FileResult<Frontmatter> {
    serde_json::from_value(Value::Object(map))
        .map_err(|e| FileError::Unexpected(format!("Unsupported frontmatter value: {}", e)))
}

// --- List ---

async fn list_files(store: web::Data<FileStore>, query: web::Query<ListQuery>) -> HttpResponse {
    let ListQuery { path, list_type } = query.into_inner();
    let recursive = list_type.is_recursive();

    let result = run(store, move |store| match list_type {
        ListType::Files | ListType::FilesAll => store.list_files(&path, recursive),
        ListType::Dirs | ListType::DirsAll => store.list_dirs(&path, recursive),
    })
    .await;

    match result {
        Ok(paths) => HttpResponse::Ok().json(paths),
        Err(e) => error_response(&e),
    }
}

// --- Read ---

async fn read_file(store: web::Data<FileStore>, query: web::Query<ReadQuery>) -> HttpResponse {
    let ReadQuery { path, content } = query.into_inner();

    let result = match content {
        ReadContent::Full => run(store, move |store| store.read_file(&path))
            .await
            .map(|content| HttpResponse::Ok().json(ContentResponse { content })),
        ReadContent::Text => run(store, move |store| store.get_text_content(&path))
            .await
            .map(|content| HttpResponse::Ok().json(ContentResponse { content })),
        ReadContent::Frontmatter => run(store, move |store| store.get_frontmatter(&path))
            .await
            .and_then(|frontmatter| {
                serde_json::to_value(&frontmatter).map_err(|e| {
                    FileError::Unexpected(format!("Failed to encode frontmatter: {}", e))
                })
            })
            .map(|frontmatter| HttpResponse::Ok().json(FrontmatterResponse { frontmatter })),
    };

    result.unwrap_or_else(|e| error_response(&e))
}

// --- Write ---

async fn write_file(
    store: web::Data<FileStore>,
    query: web::Query<WriteQuery>,
    body: web::Json<FileContent>,
) -> HttpResponse {
    let path = query.into_inner().path;
    let FileContent {
        frontmatter,
        content,
    } = body.into_inner();

    let frontmatter = match frontmatter.map(to_frontmatter).transpose() {
        Ok(fm) => fm,
        Err(e) => return error_response(&e),
    };

    log::info!("[FILES] Creating file at path: {}", path);

    match run(store, move |store| store.write_file(&path, frontmatter, content)).await {
        Ok(()) => HttpResponse::Created().json(StatusResponse::success()),
        Err(e) => error_response(&e),
    }
}

// --- Update ---

async fn update_file(
    store: web::Data<FileStore>,
    query: web::Query<UpdateQuery>,
    body: web::Json<FileContent>,
) -> HttpResponse {
    let UpdateQuery { path, update_type } = query.into_inner();
    let FileContent {
        frontmatter,
        content,
    } = body.into_inner();

    log::info!(
        "[FILES] Updating file at path: {} with type: {:?}",
        path,
        update_type
    );

    let result = match update_type {
        UpdateType::Frontmatter => {
            let partial = match to_frontmatter(frontmatter.unwrap_or_default()) {
                Ok(fm) => fm,
                Err(e) => return error_response(&e),
            };
            run(store, move |store| store.update_frontmatter(&path, &partial))
                .await
                .map(|changed| {
                    if !changed {
                        log::debug!("[FILES] Frontmatter unchanged, write skipped");
                    }
                })
        }
        UpdateType::Content => {
            let lines = content.unwrap_or_default();
            run(store, move |store| store.update_content(&path, lines)).await
        }
        UpdateType::Replace => {
            let lines = content.unwrap_or_default();
            run(store, move |store| store.replace_content(&path, lines)).await
        }
    };

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Malformed query strings get the same JSON error shape as store failures
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "bad_request",
            err.to_string(),
        ));
        InternalError::from_response(err, response).into()
    })
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "bad_request",
            err.to_string(),
        ));
        InternalError::from_response(err, response).into()
    })
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ErrorResponse::new(404, "not_found", "Route not found"))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/files")
            .app_data(query_config())
            .app_data(json_config())
            .route("", web::get().to(list_files))
            .route("/read", web::get().to(read_file))
            .route("/write", web::post().to(write_file))
            .route("/write", web::patch().to(update_file))
            .default_service(web::to(not_found)),
    );
}
