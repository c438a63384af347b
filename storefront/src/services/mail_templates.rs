//! Email templates
//!
//! Plain text plus a minimal HTML alternative for each notification. Kept as
//! format! templates on purpose; the shop's emails are short and the copy
//! changes rarely.

use shared::models::{ContactMessage, Order, OrderItem};
use shared::util::format_cents;

/// (subject, text body, html body)
pub type RenderedMail = (String, String, String);

fn item_lines(order: &Order) -> String {
    order
        .items
        .iter()
        .map(|item| format!("  - {} — {}", item.label(), format_cents(item.line_total())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn item_rows_html(order: &Order) -> String {
    order
        .items
        .iter()
        .map(|item| {
            format!(
                "<tr><td>{}</td><td align=\"right\">{}</td></tr>",
                escape(&item.label()),
                format_cents(item.line_total())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn custom_cake_details(order: &Order) -> String {
    let mut out = String::new();
    for item in &order.items {
        if let OrderItem::Custom { config, breakdown } = item {
            out.push_str(&format!(
                "\nCustom cake details:\n  sizes: {}x 6\" / {}x 8\", {} layer(s)\n",
                config.six_inch(),
                config.eight_inch(),
                config.layer_count(),
            ));
            if !config.flavors.is_empty() {
                out.push_str(&format!("  flavors: {}\n", config.flavors.join(", ")));
            }
            if let Some(message) = &config.message {
                out.push_str(&format!("  inscription: {message}\n"));
            }
            out.push_str(&format!(
                "  subtotal: {}\n",
                format_cents(breakdown.total_price)
            ));
        }
    }
    out
}

pub fn order_confirmation(order: &Order) -> RenderedMail {
    let subject = format!("Your order {} is in!", order.reference);
    let pickup = order
        .pickup_date
        .as_deref()
        .unwrap_or("to be arranged — we'll reach out");

    let text = format!(
        "Hi {name},\n\n\
         Thanks for your order! Here's what we have:\n\n\
         Order {reference}\n\
         {items}\n\n\
         Total: {total}\n\
         Pickup: {pickup}\n\
         {details}\n\
         We'll email you again once the order is confirmed.\n\n\
         — The Bakehouse",
        name = order.customer_name,
        reference = order.reference,
        items = item_lines(order),
        total = format_cents(order.total_price),
        pickup = pickup,
        details = custom_cake_details(order),
    );

    let html = format!(
        "<h2>Thanks for your order, {name}!</h2>\
         <p>Order <strong>{reference}</strong></p>\
         <table cellpadding=\"4\">{rows}\
         <tr><td><strong>Total</strong></td><td align=\"right\"><strong>{total}</strong></td></tr>\
         </table>\
         <p>Pickup: {pickup}</p>\
         <p>We'll email you again once the order is confirmed.</p>",
        name = escape(&order.customer_name),
        reference = escape(&order.reference),
        rows = item_rows_html(order),
        total = format_cents(order.total_price),
        pickup = escape(pickup),
    );

    (subject, text, html)
}

pub fn order_notification(order: &Order) -> RenderedMail {
    let subject = format!(
        "New order {} — {}",
        order.reference,
        format_cents(order.total_price)
    );

    let text = format!(
        "New order from {name} <{email}>{phone}\n\n\
         Order {reference}\n\
         {items}\n\n\
         Total: {total}\n\
         Pickup: {pickup}\n\
         {details}",
        name = order.customer_name,
        email = order.customer_email,
        phone = order
            .customer_phone
            .as_deref()
            .map(|p| format!(" ({p})"))
            .unwrap_or_default(),
        reference = order.reference,
        items = item_lines(order),
        total = format_cents(order.total_price),
        pickup = order.pickup_date.as_deref().unwrap_or("unspecified"),
        details = custom_cake_details(order),
    );

    let html = format!(
        "<h2>New order {reference}</h2>\
         <p>{name} &lt;{email}&gt;</p>\
         <table cellpadding=\"4\">{rows}\
         <tr><td><strong>Total</strong></td><td align=\"right\"><strong>{total}</strong></td></tr>\
         </table>",
        reference = escape(&order.reference),
        name = escape(&order.customer_name),
        email = escape(&order.customer_email),
        rows = item_rows_html(order),
        total = format_cents(order.total_price),
    );

    (subject, text, html)
}

pub fn contact_notification(message: &ContactMessage) -> RenderedMail {
    let subject = format!("Contact form: {}", message.name);
    let phone = message
        .phone
        .as_deref()
        .map(|p| format!("\nPhone: {p}"))
        .unwrap_or_default();

    let text = format!(
        "From: {name} <{email}>{phone}\n\n{body}",
        name = message.name,
        email = message.email,
        body = message.message,
    );

    let html = format!(
        "<p><strong>{name}</strong> &lt;{email}&gt;</p><p>{body}</p>",
        name = escape(&message.name),
        email = escape(&message.email),
        body = escape(&message.message).replace('\n', "<br>"),
    );

    (subject, text, html)
}

/// Minimal HTML escaping for the few interpolated fields.
fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
