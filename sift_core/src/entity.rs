// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entity shapes supplied by the data provider.
//!
//! All entities are immutable once constructed. Data-quality problems (a postal code that is not
//! a number, a missing region, an unformatted phone) are ordinary field values; the helpers on
//! [`Customer`] expose them as plain predicates.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::NaiveDate;

/// A `(country, city)` pair.
///
/// Customers and suppliers are related only by location, so this is the composite key used to
/// join them. Equality and hashing are field-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    /// Country name.
    pub country: String,
    /// City name.
    pub city: String,
}

impl Location {
    /// Creates a location key.
    pub fn new(country: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            city: city.into(),
        }
    }
}

/// A single order placed by a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Order id.
    pub id: u32,
    /// Day the order was placed.
    pub order_date: NaiveDate,
    /// Order total (non-negative).
    pub total: f64,
}

/// A customer and the orders they own.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Customer id (e.g. `"ALFKI"`).
    pub id: String,
    /// Company name.
    pub company_name: String,
    /// Country name.
    pub country: String,
    /// City name.
    pub city: String,
    /// Region, when the source data has one.
    pub region: Option<String>,
    /// Postal code as recorded; not guaranteed to be numeric.
    pub postal_code: String,
    /// Phone as recorded; not guaranteed to follow `(area) number`.
    pub phone: String,
    /// Orders placed by this customer, in source order.
    pub orders: Vec<Order>,
}

impl Customer {
    /// Returns the `(country, city)` key of this customer.
    pub fn location(&self) -> Location {
        Location::new(self.country.clone(), self.city.clone())
    }

    /// Returns `true` when the postal code parses as an integer.
    pub fn has_numeric_postal_code(&self) -> bool {
        self.postal_code.trim().parse::<i64>().is_ok()
    }

    /// Returns `true` when a region is present.
    pub fn has_region(&self) -> bool {
        self.region.is_some()
    }

    /// Returns `true` when the phone starts with an opening parenthesis (an area code).
    pub fn has_formatted_phone(&self) -> bool {
        self.phone.starts_with('(')
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id.
    pub id: u32,
    /// Product name.
    pub name: String,
    /// Category name; a grouping key rather than an owned entity.
    pub category: String,
    /// Unit price (non-negative).
    pub unit_price: f64,
    /// Units currently in stock.
    pub units_in_stock: u32,
}

impl Product {
    /// Returns `true` when at least one unit is in stock.
    pub fn in_stock(&self) -> bool {
        self.units_in_stock > 0
    }
}

/// A supplier, located by country and city.
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    /// Supplier id.
    pub id: u32,
    /// Supplier name.
    pub name: String,
    /// Country name.
    pub country: String,
    /// City name.
    pub city: String,
}

impl Supplier {
    /// Returns the `(country, city)` key of this supplier.
    pub fn location(&self) -> Location {
        Location::new(self.country.clone(), self.city.clone())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn customer(postal_code: &str, region: Option<&str>, phone: &str) -> Customer {
        Customer {
            id: "ALFKI".to_string(),
            company_name: "Alfreds Futterkiste".to_string(),
            country: "Germany".to_string(),
            city: "Berlin".to_string(),
            region: region.map(ToString::to_string),
            postal_code: postal_code.to_string(),
            phone: phone.to_string(),
            orders: vec![],
        }
    }

    #[test]
    fn data_quality_predicates_read_raw_fields() {
        let clean = customer("12209", Some("BE"), "(030) 0074321");
        assert!(clean.has_numeric_postal_code());
        assert!(clean.has_region());
        assert!(clean.has_formatted_phone());

        let messy = customer("WA1 1DP", None, "030-0074321");
        assert!(!messy.has_numeric_postal_code());
        assert!(!messy.has_region());
        assert!(!messy.has_formatted_phone());
    }

    #[test]
    fn location_keys_compare_field_wise() {
        let c = customer("12209", None, "(030) 0074321");
        let s = Supplier {
            id: 1,
            name: "Heli Süßwaren".to_string(),
            country: "Germany".to_string(),
            city: "Berlin".to_string(),
        };
        assert_eq!(c.location(), s.location());
        assert_ne!(c.location(), Location::new("Germany", "Frankfurt"));
    }
}
