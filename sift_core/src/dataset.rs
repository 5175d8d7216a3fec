// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The in-memory collections handed over by a data provider.

extern crate alloc;

use alloc::vec::Vec;

use crate::entity::{Customer, Order, Product, Supplier};

/// Read-only collections of customers (with their orders), products, and suppliers.
///
/// A dataset is fully materialized before any pipeline is composed and is never mutated
/// afterwards, so every pipeline borrows it for as long as it lives.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    customers: Vec<Customer>,
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
}

impl Dataset {
    /// Creates a dataset from already-loaded collections.
    pub fn new(customers: Vec<Customer>, products: Vec<Product>, suppliers: Vec<Supplier>) -> Self {
        Self {
            customers,
            products,
            suppliers,
        }
    }

    /// Starts an empty builder.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// All customers, in load order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// All orders, flattened in customer order and then per-customer order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.customers.iter().flat_map(|c| c.orders.iter())
    }

    /// All products, in load order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All suppliers, in load order.
    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }
}

/// Incremental construction of a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    customers: Vec<Customer>,
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
}

impl DatasetBuilder {
    /// Appends a customer.
    #[must_use]
    pub fn customer(mut self, customer: Customer) -> Self {
        self.customers.push(customer);
        self
    }

    /// Appends a product.
    #[must_use]
    pub fn product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Appends a supplier.
    #[must_use]
    pub fn supplier(mut self, supplier: Supplier) -> Self {
        self.suppliers.push(supplier);
        self
    }

    /// Freezes the collections.
    pub fn build(self) -> Dataset {
        Dataset::new(self.customers, self.products, self.suppliers)
    }
}
