// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small trading-company dataset for the sample program.

use chrono::{NaiveDate, ParseError};
use sift_core::{Customer, Dataset, Order, Product, Supplier};

fn order(id: u32, date: &str, total: f64) -> Result<Order, ParseError> {
    Ok(Order {
        id,
        order_date: date.parse::<NaiveDate>()?,
        total,
    })
}

struct Contact<'s> {
    id: &'s str,
    name: &'s str,
    country: &'s str,
    city: &'s str,
    region: Option<&'s str>,
    postal_code: &'s str,
    phone: &'s str,
}

fn customer(contact: Contact<'_>, orders: Vec<Order>) -> Customer {
    Customer {
        id: contact.id.into(),
        company_name: contact.name.into(),
        country: contact.country.into(),
        city: contact.city.into(),
        region: contact.region.map(Into::into),
        postal_code: contact.postal_code.into(),
        phone: contact.phone.into(),
        orders,
    }
}

fn product(id: u32, name: &str, category: &str, unit_price: f64, units_in_stock: u32) -> Product {
    Product {
        id,
        name: name.into(),
        category: category.into(),
        unit_price,
        units_in_stock,
    }
}

fn supplier(id: u32, name: &str, country: &str, city: &str) -> Supplier {
    Supplier {
        id,
        name: name.into(),
        country: country.into(),
        city: city.into(),
    }
}

/// Builds the sample dataset.
///
/// It deliberately contains a customer without orders, customers without a region, a
/// non-numeric postal code, and phone numbers without an area code.
pub(crate) fn sample() -> Result<Dataset, ParseError> {
    let dataset = Dataset::builder()
        .customer(customer(
            Contact {
                id: "ALFKI",
                name: "Alfreds Futterkiste",
                country: "Germany",
                city: "Berlin",
                region: None,
                postal_code: "12209",
                phone: "030-0074321",
            },
            vec![
                order(10643, "1997-08-25", 814.50)?,
                order(10692, "1997-10-03", 878.00)?,
                order(10702, "1997-10-13", 330.00)?,
            ],
        ))
        .customer(customer(
            Contact {
                id: "ANATR",
                name: "Ana Trujillo Emparedados y helados",
                country: "Mexico",
                city: "México D.F.",
                region: Some("DF"),
                postal_code: "05021",
                phone: "(5) 555-4729",
            },
            vec![
                order(10308, "1996-09-18", 88.80)?,
                order(10625, "1997-08-08", 479.75)?,
            ],
        ))
        .customer(customer(
            Contact {
                id: "AROUT",
                name: "Around the Horn",
                country: "UK",
                city: "London",
                region: Some("Essex"),
                postal_code: "WA1 1DP",
                phone: "(171) 555-7788",
            },
            vec![
                order(10355, "1996-11-15", 480.00)?,
                order(10383, "1996-12-16", 899.00)?,
                order(10953, "1998-03-16", 4441.25)?,
            ],
        ))
        .customer(customer(
            Contact {
                id: "BOLID",
                name: "Bólido Comidas preparadas",
                country: "Spain",
                city: "Madrid",
                region: Some("MD"),
                postal_code: "28023",
                phone: "(91) 555 22 82",
            },
            vec![order(10326, "1996-10-10", 982.00)?],
        ))
        .customer(customer(
            Contact {
                id: "ERNSH",
                name: "Ernst Handel",
                country: "Austria",
                city: "Graz",
                region: None,
                postal_code: "8010",
                phone: "7675-3425",
            },
            vec![
                order(10258, "1996-07-17", 1614.88)?,
                order(10263, "1996-07-23", 1873.80)?,
                order(10351, "1996-11-11", 5398.73)?,
                order(10368, "1996-11-29", 1689.78)?,
                order(10382, "1996-12-13", 2900.00)?,
                order(10402, "1997-01-02", 2713.50)?,
                order(10430, "1997-01-30", 4899.20)?,
                order(10442, "1997-02-11", 1792.00)?,
                order(10514, "1997-04-22", 8623.45)?,
                order(10571, "1997-06-17", 550.59)?,
                order(10595, "1997-07-10", 4725.00)?,
                order(10633, "1997-08-15", 5510.59)?,
                order(10698, "1997-10-09", 3436.44)?,
                order(10764, "1997-12-03", 2286.00)?,
                order(10771, "1997-12-10", 344.00)?,
                order(10773, "1997-12-11", 2030.40)?,
                order(10776, "1997-12-15", 6635.27)?,
                order(10795, "1997-12-24", 2158.00)?,
                order(10836, "1998-01-16", 4705.50)?,
                order(10854, "1998-01-27", 2966.50)?,
                order(10895, "1998-02-18", 6379.40)?,
                order(10968, "1998-03-23", 1408.00)?,
                order(10979, "1998-03-26", 4813.50)?,
                order(10990, "1998-04-01", 4288.85)?,
                order(11008, "1998-04-08", 4680.90)?,
                order(11017, "1998-04-13", 6750.00)?,
                order(11072, "1998-05-05", 5218.00)?,
            ],
        ))
        .customer(customer(
            Contact {
                id: "FISSA",
                name: "FISSA Fabrica Inter. Salchichas S.A.",
                country: "Spain",
                city: "Madrid",
                region: Some("MD"),
                postal_code: "28034",
                phone: "(91) 555 94 44",
            },
            vec![],
        ))
        .customer(customer(
            Contact {
                id: "QUICK",
                name: "QUICK-Stop",
                country: "Germany",
                city: "Cunewalde",
                region: Some("SN"),
                postal_code: "01307",
                phone: "(0372) 035188",
            },
            vec![
                order(10273, "1996-08-05", 2037.28)?,
                order(10515, "1997-04-23", 9921.30)?,
                order(10540, "1997-05-19", 10191.70)?,
                order(10691, "1997-10-03", 10164.80)?,
                order(10865, "1998-02-02", 16387.50)?,
                order(11021, "1998-04-14", 6306.24)?,
            ],
        ))
        .customer(customer(
            Contact {
                id: "SAVEA",
                name: "Save-a-lot Markets",
                country: "USA",
                city: "Boise",
                region: Some("ID"),
                postal_code: "83720",
                phone: "(208) 555-8097",
            },
            vec![
                order(10393, "1996-12-25", 2556.95)?,
                order(10440, "1997-02-10", 4924.14)?,
                order(10722, "1997-10-29", 1570.00)?,
                order(10984, "1998-03-30", 1809.75)?,
            ],
        ))
        .product(product(1, "Chai", "Beverages", 18.00, 39))
        .product(product(2, "Chang", "Beverages", 19.00, 17))
        .product(product(3, "Aniseed Syrup", "Condiments", 10.00, 13))
        .product(product(5, "Chef Anton's Gumbo Mix", "Condiments", 21.35, 0))
        .product(product(9, "Mishi Kobe Niku", "Meat/Poultry", 97.00, 29))
        .product(product(13, "Konbu", "Seafood", 6.00, 24))
        .product(product(17, "Alice Mutton", "Meat/Poultry", 39.00, 0))
        .product(product(24, "Guaraná Fantástica", "Beverages", 4.50, 20))
        .product(product(38, "Côte de Blaye", "Beverages", 263.50, 17))
        .supplier(supplier(1, "Exotic Liquids", "UK", "London"))
        .supplier(supplier(2, "New Orleans Cajun Delights", "USA", "New Orleans"))
        .supplier(supplier(4, "Tokyo Traders", "Japan", "Tokyo"))
        .supplier(supplier(11, "Heli Süßwaren GmbH & Co. KG", "Germany", "Berlin"))
        .supplier(supplier(
            12,
            "Plutzer Lebensmittelgroßmärkte AG",
            "Germany",
            "Frankfurt",
        ))
        .build();
    tracing::debug!(
        customers = dataset.customers().len(),
        orders = dataset.orders().count(),
        products = dataset.products().len(),
        suppliers = dataset.suppliers().len(),
        "loaded sample dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use sift_query::queries::{QueryParams, customers_over_turnover};

    use super::*;

    #[test]
    fn sample_covers_data_quality_cases() {
        let ds = sample().unwrap();
        assert!(ds.customers().iter().any(|c| c.orders.is_empty()));
        assert!(ds.customers().iter().any(|c| !c.has_region()));
        assert!(ds.customers().iter().any(|c| !c.has_numeric_postal_code()));
        assert!(ds.customers().iter().any(|c| !c.has_formatted_phone()));
    }

    #[test]
    fn default_turnover_threshold_selects_a_customer() {
        let ds = sample().unwrap();
        let params = QueryParams::default();
        let over = customers_over_turnover(&ds, params.min_turnover.clone());
        let names: Vec<&str> = over.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["Ernst Handel"]);

        params.min_turnover.set(50_000.0);
        assert_eq!(over.count(), 2);
    }
}
