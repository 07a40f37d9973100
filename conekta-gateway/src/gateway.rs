//! Error-normalizing gateway over the Conekta API.
//!
//! [`PaymentsGateway`] wraps a [`conekta::Client`] and turns every failure
//! into a [`UserError`] payload fit to show an end user, logging the
//! technical detail instead of surfacing it. Operations that act on an
//! existing customer fetch the customer first, so a stale identifier fails
//! up front with the API's own message rather than half-applying a change.
//!
//! ## Operations
//!
//! - Customers: create, get, remove
//! - Payment sources: add, update, delete, list grouped by default
//! - Subscriptions: create, get

use conekta::Client;
use conekta::error::Error;
use conekta::resources::{
    Customer, CustomerRequest, CustomerUpdate, PaymentSource, PaymentSourceRequest,
    PaymentSourceUpdate, Subscription, SubscriptionRequest,
};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GatewayConfig};
use crate::message::UserError;

/// A customer's payment sources, grouped by whether each one is the default.
///
/// Groups preserve the order the API returned the sources in. A customer
/// without a default source has everything under
/// [`CustomerSources::sources`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CustomerSources {
    /// Sources the customer is charged on by default.
    pub default: Vec<PaymentSource>,
    /// The remaining sources.
    pub sources: Vec<PaymentSource>,
}

/// A gateway to Conekta that reports failures as user-facing payloads.
#[derive(Clone, Debug)]
pub struct PaymentsGateway {
    /// Underlying API client.
    client: Client,
}

impl PaymentsGateway {
    /// Builds a gateway from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key for the configured mode is
    /// malformed or unset.
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_client(Client::new(config.credentials())))
    }

    /// Builds a gateway over an existing client, e.g. one pointed at a
    /// non-default base URL.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns the underlying API client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns a [`UserError`] payload describing why the API rejected the
    /// request.
    pub async fn create_customer(&self, request: &CustomerRequest) -> Result<Customer, UserError> {
        self.client
            .create_customer(request)
            .await
            .map_err(|e| fail("create_customer", &e))
    }

    /// Retrieves a customer.
    ///
    /// # Errors
    ///
    /// Returns a [`UserError`] payload if the customer does not exist or the
    /// request fails.
    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer, UserError> {
        self.fetch_customer(customer_id, "get_customer").await
    }

    /// Deletes a customer.
    ///
    /// The customer is fetched first; an unknown identifier fails with the
    /// API's own message before any deletion is attempted.
    ///
    /// # Errors
    ///
    /// Returns a [`UserError`] payload if the customer does not exist or the
    /// deletion fails.
    pub async fn remove_customer(&self, customer_id: &str) -> Result<(), UserError> {
        self.fetch_customer(customer_id, "remove_customer").await?;
        self.client
            .delete_customer(customer_id)
            .await
            .map_err(|e| fail("remove_customer", &e))?;
        Ok(())
    }

    /// Attaches a tokenized card to a customer, optionally making it the
    /// customer's default payment source.
    ///
    /// # Errors
    ///
    /// Returns a [`UserError`] payload if the customer does not exist, the
    /// token is rejected, or the default could not be set.
    pub async fn add_customer_source(
        &self,
        customer_id: &str,
        token_id: &str,
        make_default: bool,
    ) -> Result<PaymentSource, UserError> {
        self.fetch_customer(customer_id, "add_customer_source")
            .await?;
        let source = self
            .client
            .create_payment_source(customer_id, &PaymentSourceRequest::card(token_id))
            .await
            .map_err(|e| fail("add_customer_source", &e))?;
        if make_default {
            let update = CustomerUpdate {
                default_payment_source_id: Some(source.id.clone()),
                ..CustomerUpdate::default()
            };
            self.client
                .update_customer(customer_id, &update)
                .await
                .map_err(|e| fail("add_customer_source", &e))?;
        }
        Ok(source)
    }

    /// Applies field updates to a payment source and/or makes it the
    /// customer's default. The two changes are independent; requesting
    /// neither is reported as an error rather than silently succeeding.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::no_change`] when `update` is empty and
    /// `make_default` is `false`, or a payload describing the API failure.
    pub async fn update_customer_source(
        &self,
        customer_id: &str,
        source_id: &str,
        update: &PaymentSourceUpdate,
        make_default: bool,
    ) -> Result<(), UserError> {
        self.fetch_customer(customer_id, "update_customer_source")
            .await?;

        let mut modified = false;
        if !update.is_empty() {
            self.client
                .update_payment_source(customer_id, source_id, update)
                .await
                .map_err(|e| fail("update_customer_source", &e))?;
            modified = true;
        }
        if make_default {
            let default_update = CustomerUpdate {
                default_payment_source_id: Some(source_id.to_owned()),
                ..CustomerUpdate::default()
            };
            self.client
                .update_customer(customer_id, &default_update)
                .await
                .map_err(|e| fail("update_customer_source", &e))?;
            modified = true;
        }

        if modified {
            Ok(())
        } else {
            Err(UserError::no_change())
        }
    }

    /// Detaches a payment source from a customer.
    ///
    /// # Errors
    ///
    /// Returns a [`UserError`] payload if the customer or source does not
    /// exist or the deletion fails.
    pub async fn delete_customer_source(
        &self,
        customer_id: &str,
        source_id: &str,
    ) -> Result<(), UserError> {
        self.fetch_customer(customer_id, "delete_customer_source")
            .await?;
        self.client
            .delete_payment_source(customer_id, source_id)
            .await
            .map_err(|e| fail("delete_customer_source", &e))?;
        Ok(())
    }

    /// Lists a customer's payment sources grouped by default status,
    /// preserving API order within each group.
    ///
    /// # Errors
    ///
    /// Returns a [`UserError`] payload if the customer does not exist or the
    /// request fails.
    pub async fn get_customer_sources(
        &self,
        customer_id: &str,
    ) -> Result<CustomerSources, UserError> {
        let Customer {
            default_payment_source_id,
            payment_sources,
            ..
        } = self
            .fetch_customer(customer_id, "get_customer_sources")
            .await?;

        let mut grouped = CustomerSources::default();
        for source in payment_sources.unwrap_or_default() {
            if default_payment_source_id.as_deref() == Some(source.id.as_str()) {
                grouped.default.push(source);
            } else {
                grouped.sources.push(source);
            }
        }
        Ok(grouped)
    }

    /// Subscribes a customer to a plan.
    ///
    /// # Errors
    ///
    /// Returns a [`UserError`] payload if the customer does not exist or the
    /// API rejects the subscription.
    pub async fn create_subscription(
        &self,
        customer_id: &str,
        plan_id: &str,
    ) -> Result<Subscription, UserError> {
        self.fetch_customer(customer_id, "create_subscription")
            .await?;
        self.client
            .create_subscription(customer_id, &SubscriptionRequest::new(plan_id))
            .await
            .map_err(|e| fail("create_subscription", &e))
    }

    /// Returns a customer's subscription, or `None` if the customer has
    /// none.
    ///
    /// # Errors
    ///
    /// Returns a [`UserError`] payload if the customer does not exist or the
    /// request fails.
    pub async fn get_subscription(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, UserError> {
        let customer = self
            .fetch_customer(customer_id, "get_subscription")
            .await?;
        Ok(customer.subscription)
    }

    /// Fetches a customer, normalizing failures under the given operation
    /// label.
    async fn fetch_customer(
        &self,
        customer_id: &str,
        operation: &'static str,
    ) -> Result<Customer, UserError> {
        self.client
            .find_customer(customer_id)
            .await
            .map_err(|e| fail(operation, &e))
    }
}

/// Normalizes a client error into a user-facing payload.
///
/// A structured API rejection keeps its messages; everything else (transport
/// failures, undecodable bodies, envelopes without details) collapses into
/// [`UserError::unknown`]. Either way the technical detail lands in the log,
/// never in the payload.
fn fail(operation: &'static str, err: &Error) -> UserError {
    if let Error::Api { status, error, .. } = err {
        if let Some(payload) = UserError::from_api(error) {
            let detail = error.debug_messages().join("; ");
            tracing::error!(
                operation,
                status = status.as_u16(),
                error_type = error.error_type.as_deref().unwrap_or("unknown"),
                log_id = error.log_id.as_deref().unwrap_or("-"),
                message = %error,
                detail = %detail,
                "Conekta rejected the request"
            );
            return payload;
        }
    }
    tracing::error!(operation, error = %err, "Request to Conekta failed");
    UserError::unknown()
}
