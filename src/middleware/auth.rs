use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::middleware::roles::bearer_token;
use crate::models::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::error::AppError;

/// Verifies the bearer token and that its user still exists, then attaches
/// the `AuthenticatedUser` to the request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                    Ok(req.error_response(e).map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("Application state not configured".to_string()))?;

    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let claims = state.jwt.verify(bearer_token(header)?)?;

    // Token may outlive the account
    let user = state
        .users
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid token, user not found".to_string()))?;

    Ok(AuthenticatedUser::from(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::UserStore;
    use crate::models::Role;
    use crate::test_support::TestContext;
    use actix_web::{http::StatusCode, test, App, HttpResponse};

    async fn whoami(user: web::ReqData<AuthenticatedUser>) -> HttpResponse {
        HttpResponse::Ok().body(format!("{}:{}", user.id, user.role))
    }

    macro_rules! app {
        ($ctx:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($ctx.state.clone()))
                    .service(
                        web::scope("/protected")
                            .wrap(AuthMiddleware)
                            .route("", web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_valid_token_attaches_user() {
        let ctx = TestContext::new();
        let token = ctx.seed_user("u1", "jyn@rogue.one", Role::User);
        let app = app!(ctx);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, web::Bytes::from_static(b"u1:USER"));
    }

    #[actix_web::test]
    async fn test_missing_header_unauthorized() {
        let ctx = TestContext::new();
        let app = app!(ctx);

        let req = test::TestRequest::get().uri("/protected").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing authorization header");
    }

    #[actix_web::test]
    async fn test_deleted_user_token_unauthorized() {
        let ctx = TestContext::new();
        let token = ctx.seed_user("u1", "cassian@rogue.one", Role::Admin);
        ctx.users.delete("u1").await.unwrap();
        let app = app!(ctx);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Invalid token, user not found");
    }

    #[actix_web::test]
    async fn test_tampered_token_unauthorized() {
        let ctx = TestContext::new();
        let token = ctx.seed_user("u1", "bodhi@rogue.one", Role::User);
        let app = app!(ctx);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}x", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
