//! Stripe integration via REST API (no SDK dependency)
//!
//! Only the PaymentIntents endpoint is used: the storefront confirms the
//! intent client-side with the returned client secret.

/// A freshly created payment intent
#[derive(Debug, Clone)]
pub struct CreatedIntent {
    /// Processor transaction id (`pi_...`)
    pub id: String,
    /// Client secret handed to the storefront for confirmation
    pub client_secret: String,
}

/// Create a Stripe PaymentIntent for a card charge
///
/// `amount_minor` is in minor units (cents), as Stripe expects.
pub async fn create_payment_intent(
    secret_key: &str,
    amount_minor: i64,
    currency: &str,
) -> Result<CreatedIntent, Box<dyn std::error::Error + Send + Sync>> {
    let client = reqwest::Client::new();
    let amount = amount_minor.to_string();
    let resp: serde_json::Value = client
        .post("https://api.stripe.com/v1/payment_intents")
        .basic_auth(secret_key, None::<&str>)
        .form(&[
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ])
        .send()
        .await?
        .json()
        .await?;

    let id = resp["id"].as_str().map(String::from);
    let client_secret = resp["client_secret"].as_str().map(String::from);

    match (id, client_secret) {
        (Some(id), Some(client_secret)) => Ok(CreatedIntent { id, client_secret }),
        _ => Err(format!("Stripe create_payment_intent failed: {resp}").into()),
    }
}
