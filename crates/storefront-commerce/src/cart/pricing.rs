//! Order summary calculation.

use std::fmt;

use crate::cart::{clamp_quantity, CartLine};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Default flat shipping fee, in cents.
pub const DEFAULT_SHIPPING_FEE_CENTS: i64 = 1000;

/// Default tax rate, in basis points (7%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 700;

/// A tax rate held in basis points (hundredths of a percent).
///
/// Serialized as a percentage, so `7.0` in a config file means 7%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TaxRate(u32);

impl TaxRate {
    /// Create a rate from basis points.
    pub fn from_basis_points(bps: u32) -> Self {
        Self(bps)
    }

    /// Create a rate from a percentage in `[0, 100]`.
    pub fn from_percent(percent: f64) -> Result<Self, CommerceError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(CommerceError::ValidationError(format!(
                "tax rate {} is outside 0-100%",
                percent
            )));
        }
        Ok(Self((percent * 100.0).round() as u32))
    }

    pub fn basis_points(&self) -> u32 {
        self.0
    }

    pub fn as_percent(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self(DEFAULT_TAX_RATE_BPS)
    }
}

impl TryFrom<f64> for TaxRate {
    type Error = CommerceError;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        Self::from_percent(percent)
    }
}

impl From<TaxRate> for f64 {
    fn from(rate: TaxRate) -> Self {
        rate.as_percent()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

/// Fixed shipping and tax rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Currency every total is computed in.
    #[serde(default)]
    pub currency: Currency,
    /// Flat shipping fee charged when the cart has a resolvable line.
    #[serde(default = "default_shipping_fee_cents")]
    pub shipping_fee_cents: i64,
    /// Tax applied to the subtotal.
    #[serde(default, rename = "tax_rate_percent")]
    pub tax_rate: TaxRate,
}

fn default_shipping_fee_cents() -> i64 {
    DEFAULT_SHIPPING_FEE_CENTS
}

impl PricingRules {
    /// Rules with a custom fee and rate.
    pub fn new(currency: Currency, shipping_fee_cents: i64, tax_rate: TaxRate) -> Self {
        Self {
            currency,
            shipping_fee_cents,
            tax_rate,
        }
    }

    /// The shipping fee as money.
    pub fn shipping_fee(&self) -> Money {
        Money::new(self.shipping_fee_cents, self.currency)
    }
}

impl Default for PricingRules {
    fn default() -> Self {
        Self::new(
            Currency::default(),
            DEFAULT_SHIPPING_FEE_CENTS,
            TaxRate::default(),
        )
    }
}

/// Pricing for one resolved cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinePricing {
    /// Product priced.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity priced.
    pub quantity: u32,
    /// unit_price * quantity.
    pub line_total: Money,
}

/// Computed totals for a set of cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Sum of resolved line totals.
    pub subtotal: Money,
    /// Flat shipping, zero for an empty cart.
    pub shipping: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
    /// Per-line breakdown for resolved lines.
    pub lines: Vec<LinePricing>,
    /// Units across resolved lines.
    pub item_count: u64,
    /// Lines whose product is not in the catalog, excluded from every total.
    pub unresolved: Vec<ProductId>,
    /// Lines whose product has no stock left, excluded from every total.
    pub sold_out: Vec<ProductId>,
}

impl OrderSummary {
    /// An all-zero summary.
    pub fn empty(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            subtotal: zero,
            shipping: zero,
            tax: zero,
            total: zero,
            lines: Vec::new(),
            item_count: 0,
            unresolved: Vec::new(),
            sold_out: Vec::new(),
        }
    }

    /// Whether any line pointed at a missing product.
    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }

    /// Whether any line was left out of the totals.
    pub fn has_unpriced(&self) -> bool {
        self.has_unresolved() || !self.sold_out.is_empty()
    }
}

/// Compute the order summary for `lines` against `products`.
///
/// Lines that do not resolve are reported in [`OrderSummary::unresolved`]
/// and lines for products with no stock in [`OrderSummary::sold_out`]; both
/// are left out of the totals. Quantities outside `[1, stock]` are priced at
/// their clamped value. Errors only on overflow or a product priced in a
/// currency other than the rules'.
pub fn compute_order(
    lines: &[CartLine],
    products: &[Product],
    rules: &PricingRules,
) -> Result<OrderSummary, CommerceError> {
    let currency = rules.currency;
    let mut summary = OrderSummary::empty(currency);

    for line in lines {
        let Some(product) = products.iter().find(|p| p.id == line.product_id) else {
            tracing::warn!(product_id = %line.product_id, "cart line references unknown product");
            summary.unresolved.push(line.product_id.clone());
            continue;
        };

        if product.price.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        if !product.is_in_stock() {
            tracing::warn!(product_id = %line.product_id, "cart line references sold-out product");
            summary.sold_out.push(line.product_id.clone());
            continue;
        }

        let quantity = clamp_quantity(i64::from(line.quantity), product.stock);
        if quantity != line.quantity {
            tracing::warn!(
                product_id = %line.product_id,
                quantity = line.quantity,
                stock = product.stock,
                "pricing clamped quantity"
            );
        }

        let line_total = product
            .price
            .try_multiply(i64::from(quantity))
            .ok_or(CommerceError::Overflow)?;
        summary.subtotal = summary
            .subtotal
            .try_add(&line_total)
            .ok_or(CommerceError::Overflow)?;
        summary.item_count += u64::from(quantity);
        summary.lines.push(LinePricing {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            line_total,
        });
    }

    if !summary.lines.is_empty() {
        summary.shipping = rules.shipping_fee();
    }
    summary.tax = summary
        .subtotal
        .try_apply_basis_points(rules.tax_rate.basis_points())
        .ok_or(CommerceError::Overflow)?;
    summary.total = [summary.shipping, summary.tax]
        .iter()
        .try_fold(summary.subtotal, |acc, m| acc.try_add(m))
        .ok_or(CommerceError::Overflow)?;

    tracing::debug!(
        lines = lines.len(),
        unresolved = summary.unresolved.len(),
        sold_out = summary.sold_out.len(),
        total_cents = summary.total.amount_cents,
        "order computed"
    );

    Ok(summary)
}
