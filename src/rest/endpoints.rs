//! CoinSpot REST API endpoint table.
//!
//! Every business operation is one [`Endpoint`] row: where it lives, how it is
//! called, which payload fields it takes, and which part of the response it
//! returns. [`CoinSpotClient::call`](crate::rest::CoinSpotClient::call) is
//! driven entirely by these rows.

use std::borrow::Cow;

use serde_json::Value;

use crate::auth::{NONCE_FIELD, Payload};
use crate::error::CoinSpotError;

/// Base URL for the signed CoinSpot API.
pub const COINSPOT_BASE_URL: &str = "https://www.coinspot.com.au";

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET: the signed body is never transmitted.
    Get,
    /// POST: the signed body is the request body.
    Post,
}

impl HttpMethod {
    /// Whether requests with this method carry the signed body.
    pub fn sends_body(self) -> bool {
        matches!(self, HttpMethod::Post)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Whether an endpoint requires a signed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Sent with `key` and `sign` headers.
    Signed,
    /// Sent without credentials.
    Public,
}

/// Fields a payload must carry, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadShape {
    /// `{}`
    Empty,
    /// `{cointype}`
    Coin,
    /// `{cointype, amount}`
    CoinAmount,
    /// `{cointype, amount, rate}`
    CoinAmountRate,
    /// `{id}`
    Id,
    /// No check; used for caller-defined endpoints.
    Any,
}

impl PayloadShape {
    /// The exact field set of this shape, or `None` for [`PayloadShape::Any`].
    pub fn fields(self) -> Option<&'static [&'static str]> {
        match self {
            PayloadShape::Empty => Some(&[]),
            PayloadShape::Coin => Some(&["cointype"]),
            PayloadShape::CoinAmount => Some(&["cointype", "amount"]),
            PayloadShape::CoinAmountRate => Some(&["cointype", "amount", "rate"]),
            PayloadShape::Id => Some(&["id"]),
            PayloadShape::Any => None,
        }
    }

    /// Check that `payload` carries exactly this shape's fields.
    pub fn validate(self, endpoint: &str, payload: &Payload) -> Result<(), CoinSpotError> {
        if payload.contains_key(NONCE_FIELD) {
            return Err(CoinSpotError::InvalidRequest(format!(
                "{endpoint}: payload must not define '{NONCE_FIELD}'"
            )));
        }
        let Some(fields) = self.fields() else {
            return Ok(());
        };

        let missing: Vec<&str> = fields
            .iter()
            .copied()
            .filter(|field| !payload.contains_key(*field))
            .collect();
        let unexpected: Vec<&str> = payload
            .keys()
            .map(String::as_str)
            .filter(|key| !fields.contains(key))
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(CoinSpotError::InvalidRequest(format!(
                "{endpoint}: missing fields {missing:?}, unexpected fields {unexpected:?}"
            )))
        }
    }
}

/// Part of a decoded response an endpoint returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    /// The whole response object.
    Whole,
    /// A single top-level field.
    Field(&'static str),
}

impl Projection {
    /// Extract the projected value from a decoded response.
    pub fn apply(self, endpoint: &str, response: Value) -> Result<Value, CoinSpotError> {
        match self {
            Projection::Whole => Ok(response),
            Projection::Field(field) => match response {
                Value::Object(mut object) => object.shift_remove(field).ok_or_else(|| {
                    CoinSpotError::InvalidResponse(format!(
                        "{endpoint} response missing '{field}' field"
                    ))
                }),
                other => Err(CoinSpotError::InvalidResponse(format!(
                    "{endpoint} response is not an object: {other}"
                ))),
            },
        }
    }
}

/// Descriptor of one CoinSpot operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name, used in logs and errors.
    pub name: &'static str,
    /// Path relative to the API base URL, or an absolute URL.
    pub path: Cow<'static, str>,
    /// HTTP method.
    pub method: HttpMethod,
    /// Whether the request is signed.
    pub access: Access,
    /// Required payload fields.
    pub shape: PayloadShape,
    /// Part of the response returned to the caller.
    pub projection: Projection,
}

impl Endpoint {
    const fn signed_post(
        name: &'static str,
        path: &'static str,
        shape: PayloadShape,
        projection: Projection,
    ) -> Self {
        Self {
            name,
            path: Cow::Borrowed(path),
            method: HttpMethod::Post,
            access: Access::Signed,
            shape,
            projection,
        }
    }

    /// A signed endpoint not covered by the built-in table.
    ///
    /// The payload is not checked and the whole response is returned.
    pub fn custom(path: impl Into<Cow<'static, str>>, method: HttpMethod) -> Self {
        Self {
            name: "custom",
            path: path.into(),
            method,
            access: Access::Signed,
            shape: PayloadShape::Any,
            projection: Projection::Whole,
        }
    }

    /// Whether `path` is a full URL rather than a path on the API host.
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("https://") || self.path.starts_with("http://")
    }
}

/// Public endpoints (no authentication).
pub mod public {
    use super::*;

    /// Latest prices for every coin.
    pub const LATEST: Endpoint = Endpoint {
        name: "latest",
        path: Cow::Borrowed("https://www.coinspot.com.au/pubapi/latest"),
        method: HttpMethod::Get,
        access: Access::Public,
        shape: PayloadShape::Empty,
        projection: Projection::Field("prices"),
    };
}

/// Signed endpoints.
pub mod private {
    use super::*;

    /// Account balances.
    pub const BALANCES: Endpoint = Endpoint::signed_post(
        "balances",
        "/api/my/balances",
        PayloadShape::Empty,
        Projection::Field("balance"),
    );
    /// Your open buy and sell orders.
    pub const MY_ORDERS: Endpoint = Endpoint::signed_post(
        "my_orders",
        "/api/my/orders",
        PayloadShape::Empty,
        Projection::Whole,
    );
    /// Open market orders for a coin.
    pub const ORDERS: Endpoint = Endpoint::signed_post(
        "orders",
        "/api/orders",
        PayloadShape::Coin,
        Projection::Whole,
    );
    /// Completed market orders for a coin.
    pub const ORDER_HISTORY: Endpoint = Endpoint::signed_post(
        "order_history",
        "/api/orders/history",
        PayloadShape::Coin,
        Projection::Field("orders"),
    );
    /// Deposit address for a coin.
    pub const DEPOSIT_ADDRESS: Endpoint = Endpoint::signed_post(
        "deposit_address",
        "/api/my/coin/deposit",
        PayloadShape::Coin,
        Projection::Field("address"),
    );
    /// Quick buy quote.
    pub const QUOTE_BUY: Endpoint = Endpoint::signed_post(
        "quote_buy",
        "/api/quote/buy",
        PayloadShape::CoinAmount,
        Projection::Whole,
    );
    /// Quick sell quote.
    pub const QUOTE_SELL: Endpoint = Endpoint::signed_post(
        "quote_sell",
        "/api/quote/sell",
        PayloadShape::CoinAmount,
        Projection::Whole,
    );
    /// Place a buy order.
    pub const BUY: Endpoint = Endpoint::signed_post(
        "buy",
        "/api/my/buy",
        PayloadShape::CoinAmountRate,
        Projection::Whole,
    );
    /// Place a sell order.
    pub const SELL: Endpoint = Endpoint::signed_post(
        "sell",
        "/api/my/sell",
        PayloadShape::CoinAmountRate,
        Projection::Whole,
    );
    /// Cancel a buy order.
    pub const CANCEL_BUY: Endpoint = Endpoint::signed_post(
        "cancel_buy",
        "/api/my/buy/cancel",
        PayloadShape::Id,
        Projection::Whole,
    );
    /// Cancel a sell order.
    pub const CANCEL_SELL: Endpoint = Endpoint::signed_post(
        "cancel_sell",
        "/api/my/sell/cancel",
        PayloadShape::Id,
        Projection::Whole,
    );
}

/// Every built-in endpoint.
pub const ENDPOINTS: &[Endpoint] = &[
    public::LATEST,
    private::BALANCES,
    private::MY_ORDERS,
    private::ORDERS,
    private::ORDER_HISTORY,
    private::DEPOSIT_ADDRESS,
    private::QUOTE_BUY,
    private::QUOTE_SELL,
    private::BUY,
    private::SELL,
    private::CANCEL_BUY,
    private::CANCEL_SELL,
];

/// Look up a built-in endpoint by name.
pub fn find_endpoint(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|endpoint| endpoint.name == name)
}
