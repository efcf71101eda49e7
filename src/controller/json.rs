use axum::{Json, Router, extract::State, routing::post};
use std::sync::Arc;

use crate::dao::ProductDao;
use crate::datasource::{DataSourceRequest, DataSourceResult};
use crate::di::{Container, Injectable};
use crate::error::Result;

/// JSON endpoints backing the product grid.
pub struct JsonController {
    product: Arc<dyn ProductDao>,
}

impl JsonController {
    pub fn new(product: Arc<dyn ProductDao>) -> Self {
        Self { product }
    }

    pub fn base_path() -> &'static str {
        "/json"
    }

    pub fn router(controller: Arc<Self>) -> Router {
        Router::new()
            .route("/products", post(products))
            .with_state(controller)
    }

    /// Forwards the query to the DAO and returns its result untouched.
    pub async fn products(&self, request: DataSourceRequest) -> Result<DataSourceResult> {
        tracing::debug!(
            window = ?request.window(),
            sorts = request.sort.len(),
            groups = request.group.len(),
            filtered = request.filter.is_some(),
            "products query"
        );
        let result = self.product.get_list(&request).await?;
        tracing::debug!(total = result.total, returned = result.data.len(), "products result");
        Ok(result)
    }
}

impl Injectable for JsonController {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self::new(container.resolve_trait::<dyn ProductDao>()?))
    }
}

async fn products(
    State(controller): State<Arc<JsonController>>,
    request: DataSourceRequest,
) -> Result<Json<DataSourceResult>> {
    controller.products(request).await.map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{FilterCondition, FilterDescriptor, FilterOperator, SortDescriptor, SortDirection};
    use crate::error::GridError;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Records every request it sees and answers with a canned result.
    struct RecordingDao {
        seen: Mutex<Vec<DataSourceRequest>>,
        result: DataSourceResult,
    }

    impl RecordingDao {
        fn new(result: DataSourceResult) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                result,
            })
        }

        fn seen(&self) -> Vec<DataSourceRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductDao for RecordingDao {
        async fn get_list(&self, request: &DataSourceRequest) -> Result<DataSourceResult> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.result.clone())
        }
    }

    struct FailingDao;

    #[async_trait]
    impl ProductDao for FailingDao {
        async fn get_list(&self, _request: &DataSourceRequest) -> Result<DataSourceResult> {
            Err(GridError::Dao("catalog offline".into()))
        }
    }

    fn canned() -> DataSourceResult {
        DataSourceResult::records(vec![json!({ "productId": 7, "productName": "Anything" })], 42)
    }

    fn app(dao: Arc<dyn ProductDao>) -> Router {
        Router::new().nest(
            JsonController::base_path(),
            JsonController::router(Arc::new(JsonController::new(dao))),
        )
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn delegates_once_and_returns_dao_result_unmodified() {
        let dao = RecordingDao::new(canned());
        let request = DataSourceRequest {
            take: Some(5),
            sort: vec![SortDescriptor {
                field: "productName".to_string(),
                dir: SortDirection::Desc,
            }],
            filter: Some(FilterDescriptor::Condition(FilterCondition::new(
                "unitPrice",
                FilterOperator::Gt,
                json!("10"),
            ))),
            ..Default::default()
        };

        let controller = JsonController::new(dao.clone());
        let result = controller.products(request.clone()).await.unwrap();

        assert_eq!(result, canned());
        assert_eq!(dao.seen(), vec![request]);
    }

    #[tokio::test]
    async fn form_post_is_bound_and_serialized() {
        let dao = RecordingDao::new(canned());
        let response = app(dao.clone())
            .oneshot(
                Request::post("/json/products")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("take=5&skip=0&sort%5B0%5D%5Bfield%5D=productName&sort%5B0%5D%5Bdir%5D=desc"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::to_value(canned()).unwrap());

        let seen = dao.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].take, Some(5));
        assert_eq!(seen[0].sort[0].dir, SortDirection::Desc);
    }

    #[tokio::test]
    async fn json_post_is_bound() {
        let dao = RecordingDao::new(canned());
        let response = app(dao.clone())
            .oneshot(
                Request::post("/json/products")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"page":2,"pageSize":10}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(dao.seen()[0].window(), Some((10, 10)));
    }

    #[tokio::test]
    async fn empty_body_falls_back_to_query_string() {
        let dao = RecordingDao::new(canned());
        let response = app(dao.clone())
            .oneshot(
                Request::post("/json/products?take=3&skip=6")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(dao.seen()[0].window(), Some((6, 3)));
    }

    #[tokio::test]
    async fn binding_errors_never_reach_the_dao() {
        let dao = RecordingDao::new(canned());
        let response = app(dao.clone())
            .oneshot(
                Request::post("/json/products")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("take=lots"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(dao.seen().is_empty());
    }

    #[tokio::test]
    async fn dao_errors_become_server_errors() {
        let response = app(Arc::new(FailingDao))
            .oneshot(
                Request::post("/json/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Data access failed: catalog offline");
    }

    #[tokio::test]
    async fn get_is_not_routed() {
        let response = app(RecordingDao::new(canned()))
            .oneshot(Request::get("/json/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn injects_bound_dao() {
        let mut container = Container::new();
        container
            .register(FailingDao)
            .bind::<dyn ProductDao, FailingDao, _>(|dao| dao as Arc<dyn ProductDao>);
        assert!(JsonController::inject(&container).is_ok());
        assert!(JsonController::inject(&Container::new()).is_err());
    }
}
