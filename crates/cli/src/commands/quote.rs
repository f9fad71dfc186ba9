//! Price a subtotal with the configured rules.

use rust_decimal::Decimal;
use supplement_store_core::Price;
use supplement_store_storefront::pricing::PricingRules;
use tracing::info;

/// Log the shipping, tax and total for `subtotal`.
///
/// # Errors
///
/// Returns an error if `subtotal` is negative.
pub fn run(rules: &PricingRules, subtotal: Decimal) -> Result<(), Box<dyn std::error::Error>> {
    if subtotal.is_sign_negative() {
        return Err(format!("Subtotal must not be negative: {subtotal}").into());
    }

    let totals = rules.quote(Price::new(subtotal));
    info!("Subtotal: {}", totals.subtotal);
    info!("Shipping: {}", totals.shipping_label());
    info!("Tax:      {}", totals.tax);
    info!("Total:    {}", totals.total);

    if let Some(remaining) = rules.amount_until_free_shipping(totals.subtotal) {
        info!("Add {remaining} more for free shipping!");
    }
    Ok(())
}
