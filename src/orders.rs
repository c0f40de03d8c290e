//! Order endpoints, grouped by product.
//!
//! Every method maps its arguments straight onto the request body and returns
//! the raw response of [`FiberPayClient::call`]. Nothing is validated locally;
//! the API is the judge of amounts, IBANs and codes. Path parameters are
//! interpolated as given.

use crate::client::FiberPayClient;
use crate::errors::Result;
use crate::types::{
    Callback, CollectItemRequest, CreateCollectRequest, CreateSplitRequest, HttpMethod,
    SplitItemRequest, TransferRequest, API_VERSION,
};
use rust_decimal::Decimal;
use serde::Serialize;

fn orders_path(resource: &str) -> String {
    format!("/{}/orders/{}", API_VERSION, resource)
}

impl FiberPayClient {
    async fn post<T: Serialize>(&self, uri_path: &str, body: &T) -> Result<String> {
        let body = serde_json::to_value(body)?;
        self.call(HttpMethod::Post, uri_path, Some(&body)).await
    }

    async fn get(&self, uri_path: &str) -> Result<String> {
        self.call(HttpMethod::Get, uri_path, None).await
    }

    // Split

    /// Creates a split order, `POST /1.0/orders/split`.
    pub async fn create_split(&self, currency: &str) -> Result<String> {
        let request = CreateSplitRequest {
            currency: currency.to_string(),
        };
        self.post(&orders_path("split"), &request).await
    }

    /// Adds a payout to a split order, `POST /1.0/orders/split/item`.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_split_item(
        &self,
        order_code: &str,
        to_name: &str,
        to_iban: &str,
        description: &str,
        amount: Decimal,
        currency: &str,
        callback: Option<Callback>,
    ) -> Result<String> {
        let request = SplitItemRequest {
            amount,
            currency: currency.to_string(),
            parent_code: order_code.to_string(),
            to_name: to_name.to_string(),
            to_iban: to_iban.to_string(),
            description: description.to_string(),
            callback: Callback::normalize(callback),
        };
        self.post(&orders_path("split/item"), &request).await
    }

    /// Closes the item list of a split order,
    /// `PUT /1.0/orders/split/{order_code}/define`. Sent without a body.
    pub async fn end_definition_of_split(&self, order_code: &str) -> Result<String> {
        let uri = orders_path(&format!("split/{}/define", order_code));
        self.call(HttpMethod::Put, &uri, None).await
    }

    /// Fetches a split order, `GET /1.0/orders/split/{order_code}`.
    pub async fn get_split(&self, order_code: &str) -> Result<String> {
        self.get(&orders_path(&format!("split/{}", order_code))).await
    }

    /// Fetches a split order item, `GET /1.0/orders/split/item/{order_item_code}`.
    pub async fn get_split_item(&self, order_item_code: &str) -> Result<String> {
        self.get(&orders_path(&format!("split/item/{}", order_item_code)))
            .await
    }

    // Collect

    /// Creates a collect order paying out to one account, `POST /1.0/orders/collect`.
    pub async fn create_collect(
        &self,
        to_name: &str,
        to_iban: &str,
        currency: &str,
    ) -> Result<String> {
        let request = CreateCollectRequest {
            currency: currency.to_string(),
            to_name: to_name.to_string(),
            to_iban: to_iban.to_string(),
        };
        self.post(&orders_path("collect"), &request).await
    }

    /// Adds a payment to collect, `POST /1.0/orders/collect/item`.
    pub async fn add_collect_item(
        &self,
        order_code: &str,
        description: &str,
        amount: Decimal,
        currency: &str,
        callback: Option<Callback>,
    ) -> Result<String> {
        let request = CollectItemRequest {
            amount,
            currency: currency.to_string(),
            description: description.to_string(),
            parent_order: order_code.to_string(),
            callback: Callback::normalize(callback),
        };
        self.post(&orders_path("collect/item"), &request).await
    }

    /// Fetches a collect order, `GET /1.0/orders/collect/{order_code}`.
    pub async fn get_collect_order_info(&self, order_code: &str) -> Result<String> {
        self.get(&orders_path(&format!("collect/{}", order_code)))
            .await
    }

    /// Fetches a collect order item, `GET /1.0/orders/collect/item/{order_item_code}`.
    pub async fn get_collect_order_item_info(&self, order_item_code: &str) -> Result<String> {
        self.get(&orders_path(&format!("collect/item/{}", order_item_code)))
            .await
    }

    // Direct

    /// Creates a direct transfer order, `POST /1.0/orders/direct`.
    pub async fn create_direct(
        &self,
        to_name: &str,
        to_iban: &str,
        description: &str,
        amount: Decimal,
        currency: &str,
        callback: Option<Callback>,
    ) -> Result<String> {
        let request = transfer(to_name, to_iban, description, amount, currency, callback);
        self.post(&orders_path("direct"), &request).await
    }

    /// Fetches a direct order, `GET /1.0/orders/direct/{order_code}`.
    pub async fn get_direct_order_info(&self, order_code: &str) -> Result<String> {
        self.get(&orders_path(&format!("direct/{}", order_code)))
            .await
    }

    // Forward

    /// Creates a forward order, `POST /1.0/orders/forward`.
    pub async fn create_forward(
        &self,
        to_name: &str,
        to_iban: &str,
        description: &str,
        amount: Decimal,
        currency: &str,
        callback: Option<Callback>,
    ) -> Result<String> {
        let request = transfer(to_name, to_iban, description, amount, currency, callback);
        self.post(&orders_path("forward"), &request).await
    }

    /// Fetches a forward order, `GET /1.0/orders/forward/{order_code}`.
    pub async fn get_forward_order_info(&self, order_code: &str) -> Result<String> {
        self.get(&orders_path(&format!("forward/{}", order_code)))
            .await
    }
}

fn transfer(
    to_name: &str,
    to_iban: &str,
    description: &str,
    amount: Decimal,
    currency: &str,
    callback: Option<Callback>,
) -> TransferRequest {
    TransferRequest {
        amount,
        currency: currency.to_string(),
        to_name: to_name.to_string(),
        to_iban: to_iban.to_string(),
        description: description.to_string(),
        callback: Callback::normalize(callback),
    }
}
