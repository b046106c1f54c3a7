//! Authentication gateway middleware and the principal extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use zlang_core::domain::Principal;
use zlang_core::services::{Access, AuthGateway};

use crate::middleware::error::AppError;

/// Runs every request through the [`AuthGateway`].
///
/// Public paths pass through untouched. Everything else needs a valid bearer
/// token; the resolved [`Principal`] is stored in the request extensions.
pub struct AuthGatewayMiddleware {
    gateway: Arc<AuthGateway>,
}

impl AuthGatewayMiddleware {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGatewayMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGatewayService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGatewayService {
            service: Rc::new(service),
            gateway: self.gateway.clone(),
        }))
    }
}

pub struct AuthGatewayService<S> {
    service: Rc<S>,
    gateway: Arc<AuthGateway>,
}

impl<S, B> Service<ServiceRequest> for AuthGatewayService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gateway = Arc::clone(&self.gateway);

        Box::pin(async move {
            let authorization = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let access = gateway
                .authenticate(req.path(), authorization.as_deref())
                .await;

            match access {
                Ok(Access::Anonymous) => {}
                Ok(Access::Authenticated(principal)) => {
                    req.extensions_mut().insert(principal);
                }
                Err(err) => {
                    tracing::debug!(path = %req.path(), "Request rejected by auth gateway");
                    let response = AppError::from(err).error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// The authenticated caller, as resolved by [`AuthGatewayMiddleware`].
///
/// ```ignore
/// async fn my_slangs(CurrentUser(principal): CurrentUser) -> impl Responder { .. }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        ready(
            principal
                .map(CurrentUser)
                .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string())),
        )
    }
}
