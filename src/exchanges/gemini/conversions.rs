use crate::core::errors::ExchangeError;
use crate::core::types::{OrderRequest, OrderType, Price, Quantity};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};

/// Decimal places kept when converting a dollar amount into units
pub const AMOUNT_SCALE: u32 = 8;

/// Format a decimal the way the exchange expects it in a payload (no trailing zeros)
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

fn ensure_positive(field: &str, value: Decimal) -> Result<(), ExchangeError> {
    if value <= Decimal::ZERO {
        return Err(ExchangeError::ValidationError(format!(
            "{} must be greater than zero, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Buy stops trigger below the limit
pub fn validate_stop_limit_buy(stop_price: Price, limit_price: Price) -> Result<(), ExchangeError> {
    if stop_price >= limit_price {
        return Err(ExchangeError::ValidationError(format!(
            "stop price ({}) must be less than limit price ({}) for a stop-limit buy",
            stop_price, limit_price
        )));
    }
    Ok(())
}

/// Sell stops trigger above the limit
pub fn validate_stop_limit_sell(stop_price: Price, limit_price: Price) -> Result<(), ExchangeError> {
    if stop_price <= limit_price {
        return Err(ExchangeError::ValidationError(format!(
            "stop price ({}) must be greater than limit price ({}) for a stop-limit sell",
            stop_price, limit_price
        )));
    }
    Ok(())
}

/// Units bought by spending `dollar_amount` at `price`, truncated to 8 decimal places
pub fn dollars_to_units(dollar_amount: Quantity, price: Price) -> Result<Quantity, ExchangeError> {
    ensure_positive("dollar amount", dollar_amount.value())?;
    ensure_positive("price", price.value())?;

    let units = dollar_amount
        .value()
        .checked_div(price.value())
        .ok_or_else(|| {
            ExchangeError::ValidationError(format!(
                "cannot convert {} dollars at price {}",
                dollar_amount, price
            ))
        })?
        .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::ToZero);

    ensure_positive("order amount", units)?;
    Ok(Quantity::new(units))
}

/// Check an order request before anything is signed or sent
pub fn validate_order_request(order: &OrderRequest) -> Result<(), ExchangeError> {
    if order.symbol.trim().is_empty() {
        return Err(ExchangeError::ValidationError(
            "symbol must not be empty".to_string(),
        ));
    }
    ensure_positive("amount", order.amount.value())?;
    ensure_positive("price", order.price.value())?;

    match (order.order_type, order.stop_price) {
        (OrderType::ExchangeStopLimit, None) => {
            return Err(ExchangeError::ValidationError(
                "stop-limit orders require a stop price".to_string(),
            ));
        }
        (OrderType::ExchangeLimit, Some(_)) => {
            return Err(ExchangeError::ValidationError(
                "stop price is only accepted on stop-limit orders".to_string(),
            ));
        }
        (_, Some(stop)) => ensure_positive("stop price", stop.value())?,
        (_, None) => {}
    }

    if order.options.len() > 1 {
        return Err(ExchangeError::ValidationError(format!(
            "at most one execution option is allowed, got {}",
            order.options.len()
        )));
    }

    Ok(())
}

/// Map a validated order request onto the `/v1/order/new` payload
pub fn order_request_to_payload(order: &OrderRequest) -> Result<Map<String, Value>, ExchangeError> {
    validate_order_request(order)?;

    let mut payload = Map::new();
    payload.insert("symbol".to_string(), Value::String(order.symbol.clone()));
    payload.insert(
        "amount".to_string(),
        Value::String(format_decimal(order.amount.value())),
    );
    payload.insert(
        "price".to_string(),
        Value::String(format_decimal(order.price.value())),
    );
    payload.insert(
        "side".to_string(),
        Value::String(order.side.as_str().to_string()),
    );
    payload.insert(
        "type".to_string(),
        Value::String(order.order_type.as_str().to_string()),
    );

    if let Some(stop) = order.stop_price {
        payload.insert(
            "stop_price".to_string(),
            Value::String(format_decimal(stop.value())),
        );
    }
    if let Some(client_order_id) = &order.client_order_id {
        payload.insert(
            "client_order_id".to_string(),
            Value::String(client_order_id.clone()),
        );
    }
    if !order.options.is_empty() {
        payload.insert(
            "options".to_string(),
            Value::Array(
                order
                    .options
                    .iter()
                    .map(|option| Value::String(option.as_str().to_string()))
                    .collect(),
            ),
        );
    }
    if let Some(account) = &order.account {
        payload.insert("account".to_string(), Value::String(account.clone()));
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OrderExecutionOption, OrderSide};
    use serde_json::json;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn qty(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    #[test]
    fn test_stop_limit_buy_boundaries() {
        assert!(validate_stop_limit_buy(price("100"), price("101")).is_ok());
        assert!(validate_stop_limit_buy(price("101"), price("101")).is_err());
        assert!(validate_stop_limit_buy(price("102"), price("101")).is_err());
    }

    #[test]
    fn test_stop_limit_sell_boundaries() {
        assert!(validate_stop_limit_sell(price("109"), price("108.5")).is_ok());
        assert!(validate_stop_limit_sell(price("108.5"), price("108.5")).is_err());
        assert!(matches!(
            validate_stop_limit_sell(price("100"), price("108.5")),
            Err(ExchangeError::ValidationError(_))
        ));
    }

    #[test]
    fn test_dollars_to_units_truncates() {
        let units = dollars_to_units(qty("100"), price("3")).unwrap();
        assert_eq!(units.to_string(), "33.33333333");

        let units = dollars_to_units(qty("50"), price("101.5")).unwrap();
        assert_eq!(units.to_string(), "0.49261083");
    }

    #[test]
    fn test_dollars_to_units_rejects_non_positive() {
        assert!(dollars_to_units(qty("0"), price("100")).is_err());
        assert!(dollars_to_units(qty("10"), price("0")).is_err());
        // rounds to zero units
        assert!(dollars_to_units(qty("0.000000001"), price("100000")).is_err());
    }

    #[test]
    fn test_limit_payload() {
        let order = OrderRequest::limit("btcusd", OrderSide::Buy, qty("1"), price("50000.00"))
            .with_client_order_id("my-order")
            .with_option(OrderExecutionOption::MakerOrCancel);

        let payload = order_request_to_payload(&order).unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({
                "symbol": "btcusd",
                "amount": "1",
                "price": "50000",
                "side": "buy",
                "type": "exchange limit",
                "client_order_id": "my-order",
                "options": ["maker-or-cancel"],
            })
        );
    }

    #[test]
    fn test_stop_limit_payload_carries_stop_price() {
        let order = OrderRequest::stop_limit(
            "ethusd",
            OrderSide::Sell,
            qty("0.5"),
            price("109"),
            price("108.5"),
        )
        .with_account("primary");

        let payload = order_request_to_payload(&order).unwrap();
        assert_eq!(payload["type"], "exchange stop limit");
        assert_eq!(payload["stop_price"], "109");
        assert_eq!(payload["price"], "108.5");
        assert_eq!(payload["account"], "primary");
        assert!(!payload.contains_key("options"));
    }

    #[test]
    fn test_invalid_requests_are_rejected() {
        let zero_amount = OrderRequest::limit("btcusd", OrderSide::Buy, qty("0"), price("1"));
        assert!(order_request_to_payload(&zero_amount).is_err());

        let mut missing_stop = OrderRequest::limit("btcusd", OrderSide::Buy, qty("1"), price("1"));
        missing_stop.order_type = OrderType::ExchangeStopLimit;
        assert!(order_request_to_payload(&missing_stop).is_err());

        let two_options = OrderRequest::limit("btcusd", OrderSide::Buy, qty("1"), price("1"))
            .with_option(OrderExecutionOption::MakerOrCancel)
            .with_option(OrderExecutionOption::FillOrKill);
        assert!(order_request_to_payload(&two_options).is_err());

        let blank_symbol = OrderRequest::limit("  ", OrderSide::Buy, qty("1"), price("1"));
        assert!(order_request_to_payload(&blank_symbol).is_err());
    }
}
