//! HTTP Routes
//!
//! API Endpoints:
//! - /                                   GET     欢迎信息
//! - /predecir                           POST    预测（旧路径）
//! - /api/ping                           GET     健康检查 + 模型状态
//! - /api/predict                        POST    预测并保存读数
//! - /api/machines                       POST    登记机器
//! - /api/machines                       GET     列出机器（skip, limit）
//! - /api/machines/:id                   GET     机器详情（含读数）
//! - /api/machines/:id                   PUT     更新机器
//! - /api/machines/:id                   DELETE  删除机器
//! - /api/machines/:id/readings          GET     机器读数（skip, limit）
//! - /api/readings/:id                   GET     读数详情
//! - /api/readings/:id                   DELETE  删除读数
//! - /api/readings/:id/failure_details   GET     读数故障明细
//! - /api/failure_types/:id              PUT     修正故障明细
//! - /api/failure_types/:id              DELETE  删除故障明细

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/predecir", post(handlers::predict))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/predict", post(handlers::predict))
        .nest("/machines", machine_routes())
        .nest("/readings", reading_routes())
        .route(
            "/failure_types/:failure_id",
            put(handlers::update_failure_detail).delete(handlers::delete_failure_detail),
        )
}

/// Machine 路由
fn machine_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            post(handlers::create_machine).get(handlers::list_machines),
        )
        .route(
            "/:machine_id",
            get(handlers::get_machine)
                .put(handlers::update_machine)
                .delete(handlers::delete_machine),
        )
        .route("/:machine_id/readings", get(handlers::list_machine_readings))
}

/// Reading 路由
fn reading_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/:reading_id",
            get(handlers::get_reading).delete(handlers::delete_reading),
        )
        .route(
            "/:reading_id/failure_details",
            get(handlers::get_reading_failure_detail),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::application::inference::stubs::{self, RuleGate, StubTypes};
    use crate::application::DiagnosisPipeline;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, DbPool, SqliteDiagnosisStore,
        SqliteFailureDetailRepository, SqliteMachineRepository, SqliteReadingRepository,
    };

    async fn test_pool() -> DbPool {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn app(pool: DbPool, pipeline: DiagnosisPipeline) -> Router {
        let state = AppState::new(
            Arc::new(pipeline),
            Arc::new(SqliteMachineRepository::new(pool.clone())),
            Arc::new(SqliteReadingRepository::new(pool.clone())),
            Arc::new(SqliteFailureDetailRepository::new(pool.clone())),
            Arc::new(SqliteDiagnosisStore::new(pool)),
        );
        create_routes().with_state(Arc::new(state))
    }

    /// 规则门控 + 类型模型固定输出 TWF
    fn ready_pipeline() -> DiagnosisPipeline {
        stubs::pipeline(
            Arc::new(RuleGate),
            Arc::new(StubTypes::new(vec![true, false, false, false])),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create_machine(app: &Router, machine_type: &str) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/machines",
            Some(json!({ "type": machine_type, "location": "Nave 3" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["machine_id"].as_i64().unwrap()
    }

    fn failing_reading(machine_id: i64) -> Value {
        json!({
            "machine_id": machine_id,
            "temp_aire": 298.1,
            "temp_proceso": 308.6,
            "velocidad_rotacion": 1408,
            "torque": 62.4,
            "desgaste_herramienta": 215,
            "Type": "H"
        })
    }

    fn normal_reading(machine_id: i64) -> Value {
        json!({
            "machine_id": machine_id,
            "air_temperature": 298.1,
            "process_temperature": 308.6,
            "rotational_speed": 1551,
            "torque": 42.8,
            "tool_wear": 0,
            "type": "H"
        })
    }

    async fn count_readings(pool: &DbPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM machine_readings")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_welcome_and_ping() {
        let app = app(test_pool().await, ready_pipeline());

        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["mensaje"],
            "API del Doctor de Máquinas v2.0 está funcionando."
        );

        let (_, body) = send(&app, Method::GET, "/api/ping", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["models_loaded"], true);
    }

    #[tokio::test]
    async fn test_predict_failure_saves_reading_and_detail() {
        let pool = test_pool().await;
        let app = app(pool.clone(), ready_pipeline());
        let machine_id = create_machine(&app, "h").await;

        let (status, body) = send(&app, Method::POST, "/api/predict", Some(failing_reading(machine_id))).await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["prediccion"], "FALLA PROBABLE");
        assert_eq!(data["confianza"], "87.00%");
        assert_eq!(data["tipo_falla_probable"], "Falla por Desgaste de Herramienta (TWF)");
        assert_eq!(
            data["recomendacion"],
            "Revisar la herramienta de corte, posible reemplazo necesario"
        );

        let reading_id = data["reading_saved_id"].as_i64().unwrap();
        let (status, body) = send(&app, Method::GET, &format!("/api/readings/{}", reading_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["machine_failure"], true);
        assert_eq!(body["data"]["tool_wear"], 215);
        assert_eq!(body["data"]["failure_details"]["twf"], true);
        assert_eq!(body["data"]["failure_details"]["rnf"], false);
    }

    #[tokio::test]
    async fn test_predict_normal_has_no_failure_detail() {
        let app = app(test_pool().await, ready_pipeline());
        let machine_id = create_machine(&app, "H").await;

        // 旧路径同样可用
        let (status, body) = send(&app, Method::POST, "/predecir", Some(normal_reading(machine_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["prediccion"], "OPERACION NORMAL");
        assert_eq!(body["data"]["confianza"], "96.00%");
        assert_eq!(body["data"]["tipo_falla_probable"], "N/A");

        let reading_id = body["data"]["reading_saved_id"].as_i64().unwrap();
        let uri = format!("/api/readings/{}/failure_details", reading_id);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errno"], 404);
    }

    #[tokio::test]
    async fn test_predict_without_models_returns_503_and_saves_nothing() {
        let pool = test_pool().await;
        let app = app(pool.clone(), DiagnosisPipeline::degraded());
        let machine_id = create_machine(&app, "H").await;

        let (_, ping) = send(&app, Method::GET, "/api/ping", None).await;
        assert_eq!(ping["data"]["models_loaded"], false);

        let (status, body) = send(&app, Method::POST, "/api/predict", Some(failing_reading(machine_id))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["errno"], 503);
        assert!(body["data"].is_null());
        assert_eq!(count_readings(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_predict_rejects_unknown_machine_and_type_mismatch() {
        let pool = test_pool().await;
        let app = app(pool.clone(), ready_pipeline());
        let machine_id = create_machine(&app, "L").await;

        let (status, _) = send(&app, Method::POST, "/api/predict", Some(failing_reading(machine_id + 100))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // 机器登记为 L，读数声明 H
        let (status, body) = send(&app, Method::POST, "/api/predict", Some(failing_reading(machine_id))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errno"], 400);
        assert_eq!(count_readings(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_malformed_requests_keep_envelope() {
        let app = app(test_pool().await, ready_pipeline());
        let machine_id = create_machine(&app, "M").await;

        let mut missing = failing_reading(machine_id);
        missing.as_object_mut().unwrap().remove("torque");
        let (status, body) = send(&app, Method::POST, "/api/predict", Some(missing)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errno"], 400);

        let mut bad_type = failing_reading(machine_id);
        bad_type["Type"] = json!("X");
        let (status, _) = send(&app, Method::POST, "/api/predict", Some(bad_type)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::POST, "/api/machines", Some(json!({ "type": "Z" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/machines?limit=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::GET, "/api/machines/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_machine_crud() {
        let app = app(test_pool().await, ready_pipeline());
        let first = create_machine(&app, "L").await;
        let second = create_machine(&app, "M").await;

        let (_, body) = send(&app, Method::GET, "/api/machines?skip=1&limit=10", None).await;
        let listed = body["data"].as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["machine_id"], second);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/machines/{}", first),
            Some(json!({ "type": "h", "description": "Torno CNC" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["type"], "H");
        assert_eq!(body["data"]["description"], "Torno CNC");
        assert!(body["data"]["location"].is_null());

        let (status, _) = send(&app, Method::PUT, "/api/machines/999", Some(json!({ "type": "L" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/machines/{}", first), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, &format!("/api/machines/{}", first), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_machine_detail_and_reading_lifecycle() {
        let pool = test_pool().await;
        let app = app(pool.clone(), ready_pipeline());
        let machine_id = create_machine(&app, "H").await;

        let (_, body) = send(&app, Method::POST, "/api/predict", Some(failing_reading(machine_id))).await;
        let failing_id = body["data"]["reading_saved_id"].as_i64().unwrap();
        send(&app, Method::POST, "/api/predict", Some(normal_reading(machine_id))).await;

        let (_, body) = send(&app, Method::GET, &format!("/api/machines/{}", machine_id), None).await;
        assert_eq!(body["data"]["type"], "H");
        let readings = body["data"]["readings"].as_array().unwrap();
        assert_eq!(readings.len(), 2);
        assert!(readings[1]["failure_details"].is_null());

        let uri = format!("/api/machines/{}/readings?skip=0&limit=1", machine_id);
        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["reading_id"], failing_id);

        let (status, _) = send(&app, Method::GET, "/api/machines/999/readings", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // 人工修正故障明细
        let uri = format!("/api/readings/{}/failure_details", failing_id);
        let (_, body) = send(&app, Method::GET, &uri, None).await;
        let failure_id = body["data"]["failure_id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/failure_types/{}", failure_id),
            Some(json!({ "hdf": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["hdf"], true);
        assert_eq!(body["data"]["twf"], false);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/failure_types/{}", failure_id), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, &format!("/api/failure_types/{}", failure_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/readings/{}", failing_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count_readings(&pool).await, 1);
        let (status, _) = send(&app, Method::DELETE, &format!("/api/readings/{}", failing_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
