//! Typed payloads for the Conekta API.
//!
//! Response resources ([`Customer`], [`PaymentSource`], [`Subscription`],
//! [`ResourceList`]) mirror the JSON objects the API returns; request
//! payloads ([`CustomerRequest`], [`CustomerUpdate`], [`PaymentSourceRequest`],
//! [`PaymentSourceUpdate`], [`SubscriptionRequest`]) serialize only the
//! fields that are set.
//!
//! # Wire Format
//!
//! All types serialize to JSON using snake_case field names, matching the
//! Conekta v2.0.0 wire format. Response objects carry an `object`
//! discriminator (`customer`, `payment_source`, `list`, ...).

use serde::{Deserialize, Serialize};

/// A customer registered with Conekta.
///
/// Embedded collections (`payment_sources`) and the active `subscription`
/// are present when the API expands them, absent otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier, e.g. `cus_2tKcHxhTz7xU5SymF`.
    pub id: String,
    /// Object discriminator, `"customer"`.
    #[serde(default)]
    pub object: String,
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Contact email address.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Identifier of the payment source charged by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_payment_source_id: Option<String>,
    /// Whether the customer lives in the production environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,
    /// Creation time as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Payment sources registered to the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_sources: Option<ResourceList<PaymentSource>>,
    /// Active subscription, if the customer has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    /// Set to `true` on the payload returned by a deletion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

/// A payment source (typically a tokenized card) attached to a customer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentSource {
    /// Payment source identifier, e.g. `src_2tKcHz6LPqzK4WeHG`.
    pub id: String,
    /// Object discriminator, `"payment_source"`.
    #[serde(default)]
    pub object: String,
    /// Kind of payment source, e.g. `card`.
    #[serde(rename = "type", default)]
    pub source_type: String,
    /// Cardholder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Last four digits of the card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    /// Card brand, e.g. `visa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Expiration month, two digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,
    /// Expiration year, two digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<String>,
    /// Identifier of the owning customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Creation time as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Set to `true` on the payload returned by a deletion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

/// A customer's subscription to a plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription identifier, e.g. `sub_2tKcJGvrhm2y2Tqz9`.
    pub id: String,
    /// Object discriminator, `"subscription"`.
    #[serde(default)]
    pub object: String,
    /// Identifier of the subscribed plan.
    #[serde(default)]
    pub plan_id: String,
    /// Lifecycle status, e.g. `active`, `canceled`, `past_due`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Identifier of the card charged for the subscription.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    /// Creation time as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Start of the current billing cycle as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle_start: Option<i64>,
    /// End of the current billing cycle as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle_end: Option<i64>,
}

/// A paginated collection of resources (`"object": "list"`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceList<T> {
    /// Object discriminator, `"list"`.
    #[serde(default)]
    pub object: String,
    /// Whether more pages exist beyond `data`.
    #[serde(default)]
    pub has_more: bool,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
    /// Items on this page.
    // default by path: a bare `default` would put a `T: Default` bound on
    // the derived `Deserialize` impl.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> ResourceList<T> {
    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if this page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            object: String::new(),
            has_more: false,
            total: 0,
            data: Vec::new(),
        }
    }
}

impl<T> IntoIterator for ResourceList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResourceList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Payload for creating a customer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CustomerRequest {
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Payment sources to register along with the customer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_sources: Vec<PaymentSourceRequest>,
}

impl CustomerRequest {
    /// Creates a request for the given name and email.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            payment_sources: Vec::new(),
        }
    }

    /// Sets the contact phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Registers a payment source along with the customer.
    #[must_use]
    pub fn with_payment_source(mut self, source: PaymentSourceRequest) -> Self {
        self.payment_sources.push(source);
        self
    }
}

/// Payload for updating a customer. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    /// New full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New contact email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Payment source to charge by default from now on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_payment_source_id: Option<String>,
}

impl CustomerUpdate {
    /// Returns `true` if no field is set, i.e. applying the update would
    /// change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.default_payment_source_id.is_none()
    }
}

/// Payload for attaching a payment source to a customer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentSourceRequest {
    /// Kind of payment source, e.g. `card`.
    #[serde(rename = "type")]
    pub source_type: String,
    /// One-time token produced by the tokenizer, e.g. `tok_2tKcHxhTz7xU5SymF`.
    pub token_id: String,
}

impl PaymentSourceRequest {
    /// Creates a card payment source request from a card token.
    #[must_use]
    pub fn card(token_id: impl Into<String>) -> Self {
        Self {
            source_type: "card".to_owned(),
            token_id: token_id.into(),
        }
    }
}

/// Payload for updating a payment source. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PaymentSourceUpdate {
    /// New cardholder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New expiration month, two digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,
    /// New expiration year, two digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<String>,
}

impl PaymentSourceUpdate {
    /// Returns `true` if no field is set, i.e. applying the update would
    /// change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.exp_month.is_none() && self.exp_year.is_none()
    }
}

/// Payload for subscribing a customer to a plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    /// Identifier of the plan to subscribe to.
    pub plan: String,
}

impl SubscriptionRequest {
    /// Creates a request subscribing to the given plan.
    #[must_use]
    pub fn new(plan: impl Into<String>) -> Self {
        Self { plan: plan.into() }
    }
}
