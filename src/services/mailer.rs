//! Transactional email via AWS SES
//!
//! All sends are best-effort: callers fire them from a spawned task and a
//! failure is logged, never surfaced to the request that triggered it.

use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

/// Build the SES client from the ambient AWS configuration
///
/// `SES_REGION` overrides the region when the SES identity lives somewhere
/// other than the default credential chain's region.
pub async fn build_ses_client() -> SesClient {
    let mut cfg = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    if let Ok(region) = std::env::var("SES_REGION") {
        cfg = cfg
            .to_builder()
            .region(aws_config::Region::new(region))
            .build();
    }
    SesClient::new(&cfg)
}

/// Order confirmation for the customer
pub async fn send_order_confirmation(
    ses: &SesClient,
    from: &str,
    to: &str,
    plant_name: &str,
    quantity: i64,
    total: f64,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subject = Content::builder()
        .data("Your Greenhouse order is confirmed")
        .build()?;

    let body_text = format!(
        "Thanks for your order!\n\n\
         {quantity} x {plant_name}\n\
         Total: {total:.2}\n\n\
         The seller has been notified and will get your plants on their way."
    );

    let body = Body::builder()
        .text(Content::builder().data(body_text).build()?)
        .build();

    let message = Message::builder().subject(subject).body(body).build();

    ses.send_email()
        .from_email_address(from)
        .destination(Destination::builder().to_addresses(to).build())
        .content(EmailContent::builder().simple(message).build())
        .send()
        .await?;

    tracing::info!(to = to, "Order confirmation sent");
    Ok(())
}

/// New-order notice for the seller
pub async fn send_order_notice(
    ses: &SesClient,
    from: &str,
    to: &str,
    plant_name: &str,
    quantity: i64,
    customer_email: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subject = Content::builder()
        .data("You have a new order on Greenhouse")
        .build()?;

    let body_text = format!(
        "Good news, a plant just sold.\n\n\
         {quantity} x {plant_name}\n\
         Buyer: {customer_email}\n\n\
         Please prepare the order for shipping."
    );

    let body = Body::builder()
        .text(Content::builder().data(body_text).build()?)
        .build();

    let message = Message::builder().subject(subject).body(body).build();

    ses.send_email()
        .from_email_address(from)
        .destination(Destination::builder().to_addresses(to).build())
        .content(EmailContent::builder().simple(message).build())
        .send()
        .await?;

    tracing::info!(to = to, "New order notice sent");
    Ok(())
}
