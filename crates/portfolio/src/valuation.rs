use std::collections::BTreeMap;

use bourse_core::{Company, ThemedAssets};

/// Read-only prices an account is valued against
#[derive(Debug, Clone, Copy)]
pub struct MarketView<'a> {
    pub companies: &'a BTreeMap<String, Company>,
    pub themed: &'a ThemedAssets,
}

impl<'a> MarketView<'a> {
    pub fn new(companies: &'a BTreeMap<String, Company>, themed: &'a ThemedAssets) -> Self {
        Self { companies, themed }
    }

    /// Live price of a company, if it exists
    pub fn price(&self, company: &str) -> Option<f64> {
        self.companies.get(company).map(|c| c.price())
    }
}
