//! The single trade path for humans and funds
//!
//! Every stock trade moves the live price by its impact and rescales that
//! company's lookahead by the same ratio. Accounts in debt to the Mystical
//! Lender are priced with its slippage penalty.

use std::collections::BTreeMap;

use bourse_core::{Company, ThemedAssets};
use bourse_ports::ImpactModel;
use bourse_portfolio::{Fill, MarketView, MysticalLender, Player, SellAmount};
use log::debug;

use crate::error::{EngineError, Result};
use crate::forecast::FuturePriceBuffer;

pub(crate) struct TradeDesk<'a> {
    pub companies: &'a mut BTreeMap<String, Company>,
    pub themed: &'a ThemedAssets,
    pub forecast: &'a mut FuturePriceBuffer,
    pub model: &'a dyn ImpactModel,
    pub lender: &'a MysticalLender,
}

impl TradeDesk<'_> {
    pub fn company(&self, name: &str) -> Result<&Company> {
        self.companies
            .get(name)
            .ok_or_else(|| EngineError::UnknownCompany(name.to_string()))
    }

    fn view(&self) -> MarketView<'_> {
        MarketView::new(&*self.companies, self.themed)
    }

    pub fn buy(&mut self, account: &mut Player, company: &str, dollars: f64, leverage: f64) -> Result<Fill> {
        let model = account.pricing_model(self.model, self.lender);
        let fill = account.buy_stock(self.company(company)?, dollars, leverage, model.as_ref(), self.view())?;
        self.settle(&fill);
        Ok(fill)
    }

    pub fn sell(&mut self, account: &mut Player, company: &str, amount: SellAmount) -> Result<Fill> {
        let model = account.pricing_model(self.model, self.lender);
        let fill = account.sell_stock(self.company(company)?, amount, model.as_ref())?;
        self.settle(&fill);
        Ok(fill)
    }

    pub fn short(&mut self, account: &mut Player, company: &str, shares: u64) -> Result<Fill> {
        let model = account.pricing_model(self.model, self.lender);
        let fill = account.short_sell(self.company(company)?, shares, model.as_ref(), self.view())?;
        self.settle(&fill);
        Ok(fill)
    }

    pub fn cover(&mut self, account: &mut Player, company: &str, shares: u64) -> Result<Fill> {
        let model = account.pricing_model(self.model, self.lender);
        let fill = account.cover_short(self.company(company)?, shares, model.as_ref())?;
        self.settle(&fill);
        Ok(fill)
    }

    pub fn borrow(&self, account: &mut Player, amount: f64) -> Result<()> {
        account.borrow(amount, self.view())?;
        Ok(())
    }

    fn settle(&mut self, fill: &Fill) {
        let Some(company) = self.companies.get_mut(&fill.company) else {
            return;
        };
        let ratio = company.rescale(fill.price_factor);
        self.forecast.rebase(&fill.company, ratio);
        debug!(
            "{} moved to {:.2} after {:?} of {:.4} shares",
            fill.company,
            company.price(),
            fill.kind,
            fill.shares
        );
    }
}
