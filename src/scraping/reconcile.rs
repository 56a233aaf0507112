//! Catalog reconciliation
//!
//! Decides insert-vs-update for a freshly scraped candidate. The
//! catalog is passed in and returned by value so the function stays
//! pure and independently testable; persistence is the caller's
//! separate step.

use chrono::{DateTime, Utc};

use crate::types::{new_product_id, Product, ProductCandidate};

/// Result of reconciling one candidate against the catalog
#[derive(Debug)]
pub struct Reconciled {
    /// The catalog with the candidate merged in (order-preserving)
    pub products: Vec<Product>,
    /// The record as inserted or updated
    pub product: Product,
    /// True for a new insertion; callers notify only on insertions
    pub inserted: bool,
}

/// Two products are the same entity iff their case-insensitive trimmed
/// titles are equal or their URLs are equal. First match in catalog
/// order wins. Near-duplicate titles (punctuation, "Pro" suffixes)
/// stay distinct.
fn same_entity(existing: &Product, candidate: &ProductCandidate) -> bool {
    normalize_title(&existing.title) == normalize_title(&candidate.title)
        || existing.url == candidate.url
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Merge `candidate` into `products`.
///
/// On a match the updated record takes the candidate's fields but
/// keeps the existing `id` and original `timestamp`; optional fields
/// the candidate does not carry (`price`, `headings`, and the
/// externally managed `pricing_model`) retain their stored values.
/// Otherwise a new record is appended with a fresh id and both
/// timestamps set to `now`.
pub fn reconcile(
    candidate: ProductCandidate,
    mut products: Vec<Product>,
    now: DateTime<Utc>,
) -> Reconciled {
    match products.iter().position(|p| same_entity(p, &candidate)) {
        Some(index) => {
            let existing = &products[index];
            let updated = Product {
                id: existing.id.clone(),
                title: candidate.title,
                description: candidate.description,
                url: candidate.url,
                source: candidate.source,
                category: candidate.category,
                body_placement: candidate.body_placement,
                sensory_inputs: candidate.sensory_inputs,
                features: candidate.features,
                price: candidate.price.or_else(|| existing.price.clone()),
                pricing_model: existing.pricing_model.clone(),
                is_always_on: candidate.is_always_on,
                headings: candidate.headings.or_else(|| existing.headings.clone()),
                timestamp: existing.timestamp,
                last_updated: now,
            };
            products[index] = updated.clone();
            Reconciled {
                products,
                product: updated,
                inserted: false,
            }
        }
        None => {
            let product = Product {
                id: new_product_id(),
                title: candidate.title,
                description: candidate.description,
                url: candidate.url,
                source: candidate.source,
                category: candidate.category,
                body_placement: candidate.body_placement,
                sensory_inputs: candidate.sensory_inputs,
                features: candidate.features,
                price: candidate.price,
                pricing_model: None,
                is_always_on: candidate.is_always_on,
                headings: candidate.headings,
                timestamp: now,
                last_updated: now,
            };
            products.push(product.clone());
            Reconciled {
                products,
                product,
                inserted: true,
            }
        }
    }
}
