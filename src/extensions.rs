//! Extension Points
//!
//! The host platform's lifecycle is modelled as a set of named extension points.
//! Handlers are registered against a point with a priority; lower priorities run
//! first and equal priorities run in registration order.

use std::fmt;

use crate::{
    admin::ProductFormSubmission,
    checkout::CheckoutContext,
    display::TotalsRow,
    metadata::MetadataStore,
    products::ProductKey,
    rates::RateSet,
    shipping::ShippingMethods,
};

/// Priority used when a handler has no particular ordering requirement.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Adjusts the candidate rates after every shipping method has computed its rates.
pub trait RateFilter: fmt::Debug {
    /// Return the (possibly reduced) rate set.
    fn filter(&self, rates: RateSet, ctx: &CheckoutContext<'_>) -> RateSet;
}

/// Emits an optional row into an order totals table.
pub trait TotalsRowHook: fmt::Debug {
    /// The row to render, if any.
    fn row(&self, ctx: &CheckoutContext<'_>) -> Option<TotalsRow>;
}

/// Renders extra fields into the shipping panel of the product edit screen.
pub trait ProductPanelHook: fmt::Debug {
    /// Render the panel fragment for a product.
    ///
    /// # Errors
    ///
    /// Returns an [`askama::Error`] if rendering fails.
    fn render(
        &self,
        store: &dyn MetadataStore,
        product: ProductKey,
    ) -> Result<String, askama::Error>;
}

/// Persists submitted product edit form fields.
pub trait ProductSaveHook: fmt::Debug {
    /// Save the submitted values for a product.
    fn save(
        &self,
        store: &mut dyn MetadataStore,
        product: ProductKey,
        submission: &ProductFormSubmission,
    );
}

/// Position in the order totals table where a row can be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalsPosition {
    /// Checkout order review, before the order total.
    ReviewOrderBeforeOrderTotal,

    /// Cart totals, before the order total.
    CartTotalsBeforeOrderTotal,
}

/// Handlers for one extension point, ordered by priority.
#[derive(Debug)]
pub struct Hooks<T> {
    entries: Vec<(i32, T)>,
}

impl<T> Hooks<T> {
    /// Create an empty hook list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a handler at the given priority, after existing handlers of equal priority.
    pub fn add(&mut self, priority: i32, handler: T) {
        let index = self.entries.partition_point(|(p, _)| *p <= priority);

        self.entries.insert(index, (priority, handler));
    }

    /// Iterate over handlers in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, handler)| handler)
    }

    /// Number of handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Hooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension registry of a host platform.
#[derive(Debug, Default)]
pub struct Extensions {
    shipping_methods: ShippingMethods,
    product_panels: Hooks<Box<dyn ProductPanelHook>>,
    product_savers: Hooks<Box<dyn ProductSaveHook>>,
    rate_filters: Hooks<Box<dyn RateFilter>>,
    review_order_rows: Hooks<Box<dyn TotalsRowHook>>,
    cart_totals_rows: Hooks<Box<dyn TotalsRowHook>>,
}

impl Extensions {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered shipping methods.
    pub fn shipping_methods(&self) -> &ShippingMethods {
        &self.shipping_methods
    }

    /// Registered shipping methods, mutably.
    pub fn shipping_methods_mut(&mut self) -> &mut ShippingMethods {
        &mut self.shipping_methods
    }

    /// Hook into the shipping panel of the product edit screen.
    pub fn add_product_panel(&mut self, priority: i32, hook: Box<dyn ProductPanelHook>) {
        self.product_panels.add(priority, hook);
    }

    /// Hook into product saving.
    pub fn add_product_saver(&mut self, priority: i32, hook: Box<dyn ProductSaveHook>) {
        self.product_savers.add(priority, hook);
    }

    /// Hook into rate filtering.
    pub fn add_rate_filter(&mut self, priority: i32, hook: Box<dyn RateFilter>) {
        self.rate_filters.add(priority, hook);
    }

    /// Hook into an order totals table.
    pub fn add_totals_row(
        &mut self,
        position: TotalsPosition,
        priority: i32,
        hook: Box<dyn TotalsRowHook>,
    ) {
        self.totals_hooks_mut(position).add(priority, hook);
    }

    /// Render every product panel fragment, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`askama::Error`] raised by a panel.
    pub fn render_product_panels(
        &self,
        store: &dyn MetadataStore,
        product: ProductKey,
    ) -> Result<Vec<String>, askama::Error> {
        self.product_panels
            .iter()
            .map(|panel| panel.render(store, product))
            .collect()
    }

    /// Run every product save hook for a submitted product edit form.
    pub fn save_product(
        &self,
        store: &mut dyn MetadataStore,
        product: ProductKey,
        submission: &ProductFormSubmission,
    ) {
        for saver in self.product_savers.iter() {
            saver.save(store, product, submission);
        }
    }

    /// Run every rate filter over the candidate rates.
    pub fn filter_rates(&self, rates: RateSet, ctx: &CheckoutContext<'_>) -> RateSet {
        self.rate_filters
            .iter()
            .fold(rates, |rates, filter| filter.filter(rates, ctx))
    }

    /// Collect the rows emitted at a totals position.
    pub fn totals_rows(&self, position: TotalsPosition, ctx: &CheckoutContext<'_>) -> Vec<TotalsRow> {
        self.totals_hooks(position)
            .iter()
            .filter_map(|hook| hook.row(ctx))
            .collect()
    }

    /// Handlers registered at a totals position.
    pub fn totals_hooks(&self, position: TotalsPosition) -> &Hooks<Box<dyn TotalsRowHook>> {
        match position {
            TotalsPosition::ReviewOrderBeforeOrderTotal => &self.review_order_rows,
            TotalsPosition::CartTotalsBeforeOrderTotal => &self.cart_totals_rows,
        }
    }

    /// Registered rate filters.
    pub fn rate_filters(&self) -> &Hooks<Box<dyn RateFilter>> {
        &self.rate_filters
    }

    fn totals_hooks_mut(&mut self, position: TotalsPosition) -> &mut Hooks<Box<dyn TotalsRowHook>> {
        match position {
            TotalsPosition::ReviewOrderBeforeOrderTotal => &mut self.review_order_rows,
            TotalsPosition::CartTotalsBeforeOrderTotal => &mut self.cart_totals_rows,
        }
    }
}
