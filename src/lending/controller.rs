use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::lending::command::loan_book_cmd::{LoanBookCommand, LoanBookCommandRequest, LoanBookCommandResponse};
use crate::lending::command::query_book_cmd::{QueryBookCommand, QueryBookCommandRequest, QueryBookCommandResponse};
use crate::lending::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::lending::domain::LendingService;
use crate::lending::factory;

fn build_service(state: AppState) -> Box<dyn LendingService> {
    factory::create_lending_service(&state.config, state.repository)
}

pub async fn find_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<QueryBookCommandResponse>, ServerError> {
    let req = QueryBookCommandRequest { isbn };
    let svc = build_service(state);
    let res = QueryBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn loan_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<LoanBookCommandResponse>, ServerError> {
    let req: LoanBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state);
    let res = LoanBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn return_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let req: ReturnBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state);
    let res = ReturnBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::Json;
    use serde_json::json;
    use tempfile::TempDir;
    use crate::books::factory::create_catalog_repository;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::lending::controller::{find_book, loan_book, return_book};

    fn build_state(content: &str) -> (TempDir, AppState) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("catalog.txt");
        fs::write(&path, content).expect("seed");
        let config = Configuration::new(path.to_str().expect("utf8 path"));
        let repository = create_catalog_repository(&config);
        (dir, AppState::new(config, repository))
    }

    #[tokio::test]
    async fn test_should_serve_query_loan_return() {
        let (_dir, state) = build_state("9780134685991|Effective Java|Joshua Bloch|5|2\n");

        let res = find_book(State(state.clone()), Path("9780134685991".to_string())).await.expect("should find");
        assert_eq!(3, res.0.book.available);

        let res = loan_book(State(state.clone()), Json(json!({"title": "Effective Java"}))).await.expect("should loan");
        assert_eq!(2, res.0.loan.available_after);

        let res = return_book(State(state.clone()), Json(json!({"isbn": "9780134685991"}))).await.expect("should return");
        assert_eq!(3, res.0.returned.available_after);
    }

    #[tokio::test]
    async fn test_should_map_failures_to_status() {
        let (_dir, state) = build_state("9780134685991|Effective Java|Joshua Bloch|1|0\n");

        let (status, _) = find_book(State(state.clone()), Path("123".to_string())).await.expect_err("bad isbn");
        assert_eq!(StatusCode::BAD_REQUEST, status);
        let (status, _) = find_book(State(state.clone()), Path("9780000000000".to_string())).await.expect_err("missing");
        assert_eq!(StatusCode::NOT_FOUND, status);
        let (status, _) = return_book(State(state.clone()), Json(json!({"isbn": "9780134685991"}))).await.expect_err("nothing on loan");
        assert_eq!(StatusCode::CONFLICT, status);
        let (status, _) = return_book(State(state.clone()), Json(json!({"isbn": 42}))).await.expect_err("bad body");
        assert_eq!(StatusCode::BAD_REQUEST, status);
        let (status, _) = loan_book(State(state.clone()), Json(json!({"isbn": "9780134685991", "title": "Effective Java"}))).await.expect_err("both keys");
        assert_eq!(StatusCode::BAD_REQUEST, status);
    }

    #[tokio::test]
    async fn test_should_report_corrupt_store_as_internal() {
        let (_dir, state) = build_state("9780134685991|Effective Java|Joshua Bloch|1|3\n");
        let (status, body) = find_book(State(state), Path("9780134685991".to_string())).await.expect_err("corrupt");
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
        assert!(body.contains("line 1"));
    }
}
