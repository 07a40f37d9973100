//! Async HTTP client for the Conekta API.
//!
//! [`Client`] owns a [`Config`] and a connection pool and exposes one typed
//! method per API operation:
//!
//! - Customers: create, find, update, delete
//! - Payment sources: create, update, delete (nested under a customer)
//! - Subscriptions: create (nested under a customer)
//!
//! ## Request shape
//!
//! Every request authenticates with HTTP Basic auth (the private key as
//! username, empty password) and pins the API version and locale through the
//! `Accept` and `Accept-Language` headers.
//!
//! ## Error Handling
//!
//! Custom error types capture detailed failure contexts, including
//! - URL construction
//! - HTTP transport failures
//! - JSON deserialization errors
//! - Structured API error envelopes
//! - Unexpected HTTP status responses

use reqwest::{Method, RequestBuilder, header};
use url::Url;

use crate::config::Config;
use crate::error::{ApiError, Error};
use crate::resources::{
    Customer, CustomerRequest, CustomerUpdate, PaymentSource, PaymentSourceRequest,
    PaymentSourceUpdate, Subscription, SubscriptionRequest,
};

/// A client for the Conekta API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    /// Credentials, base URL, and header configuration.
    config: Config,
    /// Shared Reqwest HTTP client.
    client: reqwest::Client,
}

impl Client {
    /// Constructs a new [`Client`] from a configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Returns the configuration used by this client.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the request fails or the API rejects it.
    pub async fn create_customer(&self, request: &CustomerRequest) -> Result<Customer, Error> {
        self.post_json("customers", "POST /customers", request).await
    }

    /// Retrieves a customer by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the request fails or no such customer exists.
    pub async fn find_customer(&self, customer_id: &str) -> Result<Customer, Error> {
        self.get_json(&format!("customers/{customer_id}"), "GET /customers/{id}")
            .await
    }

    /// Updates a customer. Fields absent from the update are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the request fails or the API rejects it.
    pub async fn update_customer(
        &self,
        customer_id: &str,
        update: &CustomerUpdate,
    ) -> Result<Customer, Error> {
        self.put_json(
            &format!("customers/{customer_id}"),
            "PUT /customers/{id}",
            update,
        )
        .await
    }

    /// Deletes a customer, returning its final state.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the request fails or no such customer exists.
    pub async fn delete_customer(&self, customer_id: &str) -> Result<Customer, Error> {
        self.delete_json(&format!("customers/{customer_id}"), "DELETE /customers/{id}")
            .await
    }

    /// Attaches a payment source to a customer.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the request fails or the API rejects it.
    pub async fn create_payment_source(
        &self,
        customer_id: &str,
        request: &PaymentSourceRequest,
    ) -> Result<PaymentSource, Error> {
        self.post_json(
            &format!("customers/{customer_id}/payment_sources"),
            "POST /customers/{id}/payment_sources",
            request,
        )
        .await
    }

    /// Updates a payment source. Fields absent from the update are left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the request fails or the API rejects it.
    pub async fn update_payment_source(
        &self,
        customer_id: &str,
        source_id: &str,
        update: &PaymentSourceUpdate,
    ) -> Result<PaymentSource, Error> {
        self.put_json(
            &format!("customers/{customer_id}/payment_sources/{source_id}"),
            "PUT /customers/{id}/payment_sources/{source_id}",
            update,
        )
        .await
    }

    /// Detaches a payment source from a customer, returning its final state.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the request fails or no such source exists.
    pub async fn delete_payment_source(
        &self,
        customer_id: &str,
        source_id: &str,
    ) -> Result<PaymentSource, Error> {
        self.delete_json(
            &format!("customers/{customer_id}/payment_sources/{source_id}"),
            "DELETE /customers/{id}/payment_sources/{source_id}",
        )
        .await
    }

    /// Subscribes a customer to a plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the request fails or the API rejects it.
    pub async fn create_subscription(
        &self,
        customer_id: &str,
        request: &SubscriptionRequest,
    ) -> Result<Subscription, Error> {
        self.post_json(
            &format!("customers/{customer_id}/subscription"),
            "POST /customers/{id}/subscription",
            request,
        )
        .await
    }

    /// Resolves an endpoint path against the configured base URL.
    fn endpoint(&self, path: &str, context: &'static str) -> Result<Url, Error> {
        self.config
            .base_url()
            .join(path)
            .map_err(|e| Error::UrlParse { context, source: e })
    }

    /// Builds a request carrying authentication and negotiation headers.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let accept = format!(
            "application/vnd.conekta-v{}+json",
            self.config.api_version()
        );
        let mut req = self
            .client
            .request(method, url)
            .basic_auth(self.config.api_key(), None::<&str>)
            .header(header::ACCEPT, accept)
            .header(header::ACCEPT_LANGUAGE, self.config.locale());
        if let Some(timeout) = self.config.timeout() {
            req = req.timeout(timeout);
        }
        req
    }

    /// Generic POST helper that handles JSON serialization and error mapping.
    ///
    /// `context` is a human-readable identifier used in tracing and error
    /// messages (e.g. `"POST /customers"`).
    async fn post_json<T, R>(
        &self,
        path: &str,
        context: &'static str,
        payload: &T,
    ) -> Result<R, Error>
    where
        T: serde::Serialize + Sync + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path, context)?;
        let req = self.request(Method::POST, url).json(payload);
        execute(req, context).await
    }

    /// Generic PUT helper that handles JSON serialization and error mapping.
    async fn put_json<T, R>(
        &self,
        path: &str,
        context: &'static str,
        payload: &T,
    ) -> Result<R, Error>
    where
        T: serde::Serialize + Sync + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path, context)?;
        let req = self.request(Method::PUT, url).json(payload);
        execute(req, context).await
    }

    /// Generic GET helper that handles error mapping.
    async fn get_json<R>(&self, path: &str, context: &'static str) -> Result<R, Error>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path, context)?;
        let req = self.request(Method::GET, url);
        execute(req, context).await
    }

    /// Generic DELETE helper that handles error mapping.
    async fn delete_json<R>(&self, path: &str, context: &'static str) -> Result<R, Error>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path, context)?;
        let req = self.request(Method::DELETE, url);
        execute(req, context).await
    }
}

/// Sends a prepared request and decodes the response.
///
/// Success bodies decode into `R`. Failure bodies are read as text and
/// parsed as an [`ApiError`] envelope where possible, falling back to an
/// opaque status error.
async fn execute<R>(req: RequestBuilder, context: &'static str) -> Result<R, Error>
where
    R: serde::de::DeserializeOwned,
{
    let response = req
        .send()
        .await
        .map_err(|e| Error::Http { context, source: e })?;

    let status = response.status();
    let result = if status.is_success() {
        response
            .json::<R>()
            .await
            .map_err(|e| Error::JsonDeserialization { context, source: e })
    } else {
        let body = response
            .text()
            .await
            .map_err(|e| Error::ResponseBodyRead { context, source: e })?;
        match ApiError::from_body(&body) {
            Some(error) => Err(Error::Api {
                context,
                status,
                error,
            }),
            None => Err(Error::HttpStatus {
                context,
                status,
                body,
            }),
        }
    };

    match &result {
        Ok(_) => tracing::debug!(context, status = status.as_u16(), "request completed"),
        Err(err) => {
            tracing::debug!(context, status = status.as_u16(), error = %err, "request failed");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> Client {
        let base_url = Url::parse(&server.uri()).unwrap();
        Client::new(Config::new("key_test").with_base_url(base_url))
    }

    fn customer_body(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "object": "customer",
            "name": "Emiliano Zapata",
            "email": "emiliano@anenecuilco.mx"
        })
    }

    #[tokio::test]
    async fn test_create_customer_sends_credentials_and_headers() {
        let mock_server = MockServer::start().await;

        // base64("key_test:"), private key as username with empty password
        Mock::given(method("POST"))
            .and(path("/customers"))
            .and(header("Authorization", "Basic a2V5X3Rlc3Q6"))
            .and(header("Accept", "application/vnd.conekta-v2.0.0+json"))
            .and(header("Accept-Language", "es"))
            .and(body_json(json!({
                "name": "Emiliano Zapata",
                "email": "emiliano@anenecuilco.mx"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_body("cus_1")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let request = CustomerRequest::new("Emiliano Zapata", "emiliano@anenecuilco.mx");
        let customer = client.create_customer(&request).await.unwrap();
        assert_eq!(customer.id, "cus_1");
    }

    #[tokio::test]
    async fn test_find_customer_resolves_nested_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customers/cus_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_body("cus_1")))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let customer = client.find_customer("cus_1").await.unwrap();
        assert_eq!(customer.email, "emiliano@anenecuilco.mx");
    }

    #[tokio::test]
    async fn test_update_payment_source_puts_partial_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/customers/cus_1/payment_sources/src_9"))
            .and(body_json(json!({"exp_month": "03", "exp_year": "31"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "src_9",
                "object": "payment_source",
                "type": "card",
                "exp_month": "03",
                "exp_year": "31"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let update = PaymentSourceUpdate {
            exp_month: Some("03".to_owned()),
            exp_year: Some("31".to_owned()),
            ..PaymentSourceUpdate::default()
        };
        let source = client
            .update_payment_source("cus_1", "src_9", &update)
            .await
            .unwrap();
        assert_eq!(source.exp_month.as_deref(), Some("03"));
    }

    #[tokio::test]
    async fn test_delete_payment_source_hits_nested_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/customers/cus_1/payment_sources/src_9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "src_9",
                "object": "payment_source",
                "type": "card",
                "deleted": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let source = client.delete_payment_source("cus_1", "src_9").await.unwrap();
        assert_eq!(source.deleted, Some(true));
    }

    #[tokio::test]
    async fn test_error_envelope_maps_to_api_variant() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "object": "error",
                "type": "parameter_validation_error",
                "log_id": "log_1",
                "details": [
                    {"message": "El correo electrónico es inválido", "param": "email"},
                    {"message": "El nombre es requerido", "param": "name"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let request = CustomerRequest::new("", "not-an-email");
        let err = client.create_customer(&request).await.unwrap_err();

        let api_error = err.api_error().expect("expected structured API error");
        assert_eq!(
            api_error.messages(),
            vec!["El correo electrónico es inválido", "El nombre es requerido"]
        );
        match err {
            Error::Api { status, .. } => assert_eq!(status.as_u16(), 422),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unrecognized_failure_body_maps_to_http_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customers/cus_1"))
            .respond_with(
                ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let err = client.find_customer("cus_1").await.unwrap_err();

        assert!(err.api_error().is_none());
        match err {
            Error::HttpStatus { status, body, .. } => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_subscription_posts_plan() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/customers/cus_1/subscription"))
            .and(body_json(json!({"plan": "plan_gold"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "sub_1",
                "object": "subscription",
                "plan_id": "plan_gold",
                "status": "in_trial"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let subscription = client
            .create_subscription("cus_1", &SubscriptionRequest::new("plan_gold"))
            .await
            .unwrap();
        assert_eq!(subscription.plan_id, "plan_gold");
        assert_eq!(subscription.status.as_deref(), Some("in_trial"));
    }

    #[tokio::test]
    async fn test_create_payment_source_posts_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/customers/cus_1/payment_sources"))
            .and(body_json(json!({"type": "card", "token_id": "tok_visa4242"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "src_9",
                "object": "payment_source",
                "type": "card",
                "last4": "4242",
                "parent_id": "cus_1"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let source = client
            .create_payment_source("cus_1", &PaymentSourceRequest::card("tok_visa4242"))
            .await
            .unwrap();
        assert_eq!(source.parent_id.as_deref(), Some("cus_1"));
    }
}
