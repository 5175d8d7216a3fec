// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sample pipelines over a customer/order/product/supplier [`Dataset`].
//!
//! Each query is a plain function returning a typed [`Seq`], so tests can inspect typed
//! results; [`sample_program`] registers all of them as named [`Pipeline`]s.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{Datelike, NaiveDate};
use sift_core::{Customer, Dataset, Order, Param, Product, QueryError, Record, ToRecord, Value};

use crate::{Grouping, Pipeline, PriceThresholds, PriceTier, Program, Seq, SortOrder};

/// Captured parameters of the sample pipelines.
///
/// Pipelines hold clones of these cells, so setting a new value here changes what the next
/// enumeration of an already composed pipeline returns.
#[derive(Debug, Clone)]
pub struct QueryParams {
    /// Upper bound (exclusive) for `numbers-below-limit`.
    pub number_limit: Param<i32>,
    /// Minimum order sum for `customers-over-turnover`.
    pub min_turnover: Param<f64>,
    /// Minimum single order total for `customers-with-large-order`.
    pub min_order_total: Param<f64>,
    /// Tier boundaries for `products-by-price-tier`.
    pub price_tiers: Param<PriceThresholds>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            number_limit: Param::new(5),
            min_turnover: Param::new(100_000.0),
            min_order_total: Param::new(10_000.0),
            price_tiers: Param::new(PriceThresholds::default()),
        }
    }
}

/// Fixed input of `numbers-below-limit`.
pub static SAMPLE_NUMBERS: [i32; 10] = [5, 4, 1, 3, 9, 8, 6, 7, 2, 0];

fn customers(ds: &Dataset) -> Seq<'_, &Customer> {
    Seq::from_slice(ds.customers())
}

fn orders_of(customer: &Customer) -> Seq<'_, &Order> {
    Seq::from_slice(&customer.orders)
}

fn all_orders(ds: &Dataset) -> Seq<'_, &Order> {
    customers(ds).flat_map(|c| c.orders.iter())
}

/// Sum of a customer's order totals.
pub fn turnover(customer: &Customer) -> f64 {
    orders_of(customer).sum(|o| o.total)
}

/// Earliest order date of a customer, or `None` without orders.
pub fn first_order_date(customer: &Customer) -> Option<NaiveDate> {
    orders_of(customer).min(|o| o.order_date).ok()
}

/// Numbers from [`SAMPLE_NUMBERS`] below the current limit.
pub fn numbers_below<'a>(limit: Param<i32>) -> Seq<'a, i32> {
    Seq::from_slice(&SAMPLE_NUMBERS)
        .map(|n| *n)
        .filter(move |n| *n < limit.get())
}

/// Products with at least one unit in stock.
pub fn products_in_stock(ds: &Dataset) -> Seq<'_, &Product> {
    Seq::from_slice(ds.products()).filter(|p| p.in_stock())
}

/// Customers whose order sum exceeds the current `min_turnover`.
pub fn customers_over_turnover(ds: &Dataset, min_turnover: Param<f64>) -> Seq<'_, &Customer> {
    customers(ds).filter(move |c| turnover(c) > min_turnover.get())
}

/// A customer with the names of the suppliers in the same country and city.
#[derive(Debug, Clone)]
pub struct SuppliersNearCustomer<'a> {
    /// The customer.
    pub customer: &'a Customer,
    /// Names of co-located suppliers; empty when there are none.
    pub suppliers: Seq<'a, &'a str>,
}

impl ToRecord for SuppliersNearCustomer<'_> {
    fn to_record(&self) -> Record {
        Record::new()
            .with("customer", self.customer.company_name.as_str())
            .with("country", self.customer.country.as_str())
            .with("city", self.customer.city.as_str())
            .with(
                "suppliers",
                Value::List(self.suppliers.iter().map(Value::from).collect()),
            )
    }
}

/// Every customer paired with the suppliers sharing its location.
pub fn suppliers_by_customer_location(ds: &Dataset) -> Seq<'_, SuppliersNearCustomer<'_>> {
    customers(ds).group_join(
        Seq::from_slice(ds.suppliers()),
        |c| c.location(),
        |s| s.location(),
        |customer, suppliers| SuppliersNearCustomer {
            customer,
            suppliers: suppliers.map(|s| s.name.as_str()),
        },
    )
}

/// A customer with the orders that exceeded the threshold.
#[derive(Debug, Clone)]
pub struct CustomerLargeOrders<'a> {
    /// The customer.
    pub customer: &'a Customer,
    /// Orders above the threshold, re-filtered on every enumeration.
    pub orders: Seq<'a, &'a Order>,
}

impl ToRecord for CustomerLargeOrders<'_> {
    fn to_record(&self) -> Record {
        self.customer.to_record().with(
            "orders",
            self.orders.iter().map(ToRecord::to_record).collect::<Vec<_>>(),
        )
    }
}

/// Customers with at least one order above the current `min_order_total`.
pub fn customers_with_large_order(
    ds: &Dataset,
    min_order_total: Param<f64>,
) -> Seq<'_, CustomerLargeOrders<'_>> {
    let threshold = min_order_total.clone();
    customers(ds)
        .filter(move |c| orders_of(c).any(|o| o.total > threshold.get()))
        .map(move |customer| {
            let threshold = min_order_total.clone();
            CustomerLargeOrders {
                customer,
                orders: orders_of(customer).filter(move |o| o.total > threshold.get()),
            }
        })
}

/// A customer and the date of their first order.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstOrder<'a> {
    /// Company name.
    pub company_name: &'a str,
    /// Earliest order date; `None` without orders.
    pub first_order_date: Option<NaiveDate>,
}

impl ToRecord for FirstOrder<'_> {
    fn to_record(&self) -> Record {
        Record::new()
            .with("company_name", self.company_name)
            .with("first_order_date", self.first_order_date)
    }
}

/// First order date of every customer.
pub fn first_order_dates(ds: &Dataset) -> Seq<'_, FirstOrder<'_>> {
    customers(ds).map(|c| FirstOrder {
        company_name: &c.company_name,
        first_order_date: first_order_date(c),
    })
}

/// Ordering inputs for a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerActivity<'a> {
    /// Company name.
    pub company_name: &'a str,
    /// Earliest order date; `None` without orders.
    pub first_order_date: Option<NaiveDate>,
    /// Sum of order totals.
    pub turnover: f64,
}

impl ToRecord for CustomerActivity<'_> {
    fn to_record(&self) -> Record {
        Record::new()
            .with("company_name", self.company_name)
            .with("first_order_date", self.first_order_date)
            .with("turnover", self.turnover)
    }
}

/// Sorts activity rows by first order date, then turnover (descending), then name.
pub fn sort_by_activity<'a>(
    rows: Seq<'a, CustomerActivity<'a>>,
) -> Seq<'a, CustomerActivity<'a>> {
    rows.order_by(|r| r.first_order_date, SortOrder::Asc)
        .then_by(|r| r.turnover, SortOrder::Desc)
        .then_by(|r| r.company_name, SortOrder::Asc)
        .into_seq()
}

/// Customers ordered by first order date, then turnover (descending), then name.
pub fn customers_by_activity(ds: &Dataset) -> Seq<'_, CustomerActivity<'_>> {
    sort_by_activity(customers(ds).map(|c| CustomerActivity {
        company_name: &c.company_name,
        first_order_date: first_order_date(c),
        turnover: turnover(c),
    }))
}

/// Contact fields of a customer with questionable data.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactIssues<'a> {
    /// Company name.
    pub company_name: &'a str,
    /// Postal code as recorded.
    pub postal_code: &'a str,
    /// Region, if any.
    pub region: Option<&'a str>,
    /// Phone as recorded.
    pub phone: &'a str,
}

impl ToRecord for ContactIssues<'_> {
    fn to_record(&self) -> Record {
        Record::new()
            .with("company_name", self.company_name)
            .with("postal_code", self.postal_code)
            .with("region", self.region)
            .with("phone", self.phone)
    }
}

/// Customers with a non-numeric postal code, no region, or a phone without an area code.
pub fn customers_with_data_issues(ds: &Dataset) -> Seq<'_, ContactIssues<'_>> {
    customers(ds)
        .filter(|c| !c.has_numeric_postal_code() || !c.has_region() || !c.has_formatted_phone())
        .map(|c| ContactIssues {
            company_name: &c.company_name,
            postal_code: &c.postal_code,
            region: c.region.as_deref(),
            phone: &c.phone,
        })
}

/// Products of one category split by availability.
#[derive(Debug, Clone)]
pub struct CategoryStock<'a> {
    /// Category name.
    pub category: String,
    /// In-stock and out-of-stock groups, in first-occurrence order.
    pub groups: Seq<'a, StockGroup<'a>>,
}

/// Products sharing an availability flag, cheapest first.
#[derive(Debug, Clone)]
pub struct StockGroup<'a> {
    /// Whether these products have units in stock.
    pub in_stock: bool,
    /// Products ordered by unit price.
    pub products: Seq<'a, &'a Product>,
}

impl ToRecord for StockGroup<'_> {
    fn to_record(&self) -> Record {
        Record::new()
            .with("stock", if self.in_stock { "In stock" } else { "Out of stock" })
            .with(
                "products",
                self.products.iter().map(ToRecord::to_record).collect::<Vec<_>>(),
            )
    }
}

impl ToRecord for CategoryStock<'_> {
    fn to_record(&self) -> Record {
        Record::new().with("category", self.category.as_str()).with(
            "groups",
            self.groups.iter().map(|g| g.to_record()).collect::<Vec<_>>(),
        )
    }
}

/// Products grouped by category, then by availability, each group sorted by price.
pub fn products_by_category_and_stock(ds: &Dataset) -> Seq<'_, CategoryStock<'_>> {
    Seq::from_slice(ds.products()).group_by(
        |p| p.category.clone(),
        |category, products| CategoryStock {
            category,
            groups: products.group_by(
                |p| p.in_stock(),
                |in_stock, products| StockGroup {
                    in_stock,
                    products: products
                        .order_by(|p| p.unit_price, SortOrder::Asc)
                        .into_seq(),
                },
            ),
        },
    )
}

impl<'a, K: Clone + Into<Value>, T: ToRecord + 'a> ToRecord for Grouping<'a, K, T> {
    fn to_record(&self) -> Record {
        Record::new().with("key", self.key.clone()).with(
            "members",
            self.members.iter().map(|m| m.to_record()).collect::<Vec<_>>(),
        )
    }
}

/// Products grouped by the tier their price falls in, using the current thresholds.
pub fn products_by_price_tier(
    ds: &Dataset,
    thresholds: Param<PriceThresholds>,
) -> Seq<'_, Grouping<'_, PriceTier, &Product>> {
    Seq::from_slice(ds.products())
        .group(move |p| PriceTier::classify(p.unit_price, thresholds.get()))
}

/// Order statistics for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityStatistics {
    /// City name.
    pub city: String,
    /// Mean order total across all orders of the city's customers.
    pub average_total: f64,
    /// Mean number of orders per customer.
    pub average_order_count: f64,
}

impl ToRecord for CityStatistics {
    fn to_record(&self) -> Record {
        Record::new()
            .with("city", self.city.as_str())
            .with("average_total", self.average_total)
            .with("average_order_count", self.average_order_count)
    }
}

/// Per-city order statistics.
///
/// A city whose customers have no orders at all has no average order total; that group yields
/// [`QueryError::EmptyAggregate`].
pub fn city_statistics(ds: &Dataset) -> Seq<'_, Result<CityStatistics, QueryError>> {
    customers(ds).group_by(
        |c| c.city.clone(),
        |city, customers| -> Result<CityStatistics, QueryError> {
            let average_total = customers
                .clone()
                .flat_map(|c| c.orders.iter())
                .average(|o| o.total)?;
            let average_order_count = customers.average(|c| c.orders.len() as f64)?;
            Ok(CityStatistics {
                city,
                average_total,
                average_order_count,
            })
        },
    )
}

/// A calendar month key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    /// Year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: u32,
}

/// Number of orders sharing a date key.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCount<K> {
    /// The date key.
    pub key: K,
    /// Orders with that key.
    pub order_count: usize,
}

impl ToRecord for OrderCount<i32> {
    fn to_record(&self) -> Record {
        Record::new()
            .with("year", self.key)
            .with("order_count", self.order_count)
    }
}

impl ToRecord for OrderCount<u32> {
    fn to_record(&self) -> Record {
        Record::new()
            .with("month", self.key)
            .with("order_count", self.order_count)
    }
}

impl ToRecord for OrderCount<YearMonth> {
    fn to_record(&self) -> Record {
        Record::new()
            .with("year", self.key.year)
            .with("month", self.key.month)
            .with("order_count", self.order_count)
    }
}

fn count_orders_by<'a, K>(
    ds: &'a Dataset,
    key: impl Fn(&NaiveDate) -> K + 'a,
) -> Seq<'a, OrderCount<K>>
where
    K: Eq + core::hash::Hash + Clone + 'a,
{
    all_orders(ds).group_by(
        move |o| key(&o.order_date),
        |key, orders| OrderCount {
            key,
            order_count: orders.count(),
        },
    )
}

/// Order counts per year.
pub fn orders_by_year(ds: &Dataset) -> Seq<'_, OrderCount<i32>> {
    count_orders_by(ds, Datelike::year)
}

/// Order counts per month of the year, across years.
pub fn orders_by_month(ds: &Dataset) -> Seq<'_, OrderCount<u32>> {
    count_orders_by(ds, Datelike::month)
}

/// Order counts per calendar month.
pub fn orders_by_year_month(ds: &Dataset) -> Seq<'_, OrderCount<YearMonth>> {
    count_orders_by(ds, |d| YearMonth {
        year: d.year(),
        month: d.month(),
    })
}

/// Registers every sample pipeline over `ds`, reading thresholds from `params`.
pub fn sample_program<'a>(ds: &'a Dataset, params: &QueryParams) -> Program<'a> {
    let mut p = Program::new();
    p.push(Pipeline::new(
        "numbers-below-limit",
        "integers from a fixed array below the limit",
        numbers_below(params.number_limit.clone()).map(|n| Record::new().with("value", n)),
    ));
    p.push(Pipeline::new(
        "products-in-stock",
        "products with units in stock",
        products_in_stock(ds),
    ));
    p.push(Pipeline::new(
        "customers-over-turnover",
        "customers whose order sum exceeds the minimum turnover",
        customers_over_turnover(ds, params.min_turnover.clone()),
    ));
    p.push(Pipeline::new(
        "suppliers-by-customer-location",
        "suppliers located in each customer's country and city",
        suppliers_by_customer_location(ds),
    ));
    p.push(Pipeline::new(
        "customers-with-large-order",
        "customers with an order above the minimum order total",
        customers_with_large_order(ds, params.min_order_total.clone()),
    ));
    p.push(Pipeline::new(
        "first-order-date",
        "date of each customer's first order",
        first_order_dates(ds),
    ));
    p.push(Pipeline::new(
        "customers-by-activity",
        "customers by first order date, turnover (descending), and name",
        customers_by_activity(ds),
    ));
    p.push(Pipeline::new(
        "customers-with-data-issues",
        "customers with a non-numeric postal code, no region, or no phone area code",
        customers_with_data_issues(ds),
    ));
    p.push(Pipeline::new(
        "products-by-category-and-stock",
        "products by category, then availability, cheapest first",
        products_by_category_and_stock(ds),
    ));
    p.push(Pipeline::new(
        "products-by-price-tier",
        "products grouped into low, medium, and high price tiers",
        products_by_price_tier(ds, params.price_tiers.clone()),
    ));
    p.push(Pipeline::fallible(
        "city-statistics",
        "average order total and order count per customer, per city",
        city_statistics(ds),
    ));
    p.push(Pipeline::new(
        "orders-by-year",
        "order counts per year",
        orders_by_year(ds),
    ));
    p.push(Pipeline::new(
        "orders-by-month",
        "order counts per month",
        orders_by_month(ds),
    ));
    p.push(Pipeline::new(
        "orders-by-year-month",
        "order counts per year and month",
        orders_by_year_month(ds),
    ));
    p
}
