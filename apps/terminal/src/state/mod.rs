//! # State Module
//!
//! All mutable client state lives in one [`App`] value owned by the shell.
//! Handlers take `&mut App`; views take `&App`. Everything runs on a single
//! task, so nothing here is locked.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              App                                        │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────────┐ ┌────────────────────────────┐  │
//! │  │  Settings    │ │  RecordCache<T>  │ │  Cart                      │  │
//! │  │  currency    │ │  products        │ │  lines (price snapshots)   │  │
//! │  │  vat_rate    │ │  customers       │ │  payment method            │  │
//! │  │  business    │ │  expenses        │ │  last receipt              │  │
//! │  └──────────────┘ └──────────────────┘ └────────────────────────────┘  │
//! │  ┌──────────────┐ ┌──────────────────┐ ┌────────────────────────────┐  │
//! │  │  Notices     │ │  ReportState     │ │  Theme + ThemeStore        │  │
//! │  │  3s banners  │ │  window, charts  │ │  preferences.json          │  │
//! │  └──────────────┘ └──────────────────┘ └────────────────────────────┘  │
//! │                                                                         │
//! │  Backend handle (shared cookie jar)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cache;
mod notice;
mod report;
mod theme;

pub use cache::{EditForm, FormMode, RecordCache};
pub use notice::{Notice, NoticeKind, Notices, BANNER_TTL};
pub use report::ReportState;
pub use theme::{Theme, ThemeStore, PREFERENCES_FILE, THEME_KEY};

use poslite_client::{Backend, Resource};
use poslite_core::{
    Cart, Customer, Expense, Money, PaymentMethod, Product, Sale, Settings,
    DEFAULT_EXPENSE_CATEGORY,
};

/// The application state object.
#[derive(Debug)]
pub struct App {
    pub backend: Backend,

    /// Last settings fetched or saved. Defaults until the first load.
    pub settings: Settings,

    pub products: RecordCache<Product>,
    pub customers: RecordCache<Customer>,
    pub expenses: RecordCache<Expense>,

    pub cart: Cart,
    pub payment_method: PaymentMethod,

    /// Register grid search text.
    pub grid_filter: String,

    /// Receipt for the most recent completed sale.
    pub receipt: Option<Sale>,

    pub notices: Notices,
    pub report: ReportState,

    pub theme: Theme,
    theme_store: ThemeStore,
}

impl App {
    /// Creates the state object and restores the saved theme.
    pub fn new(backend: Backend, theme_store: ThemeStore) -> Self {
        let theme = theme_store.load();
        App {
            backend,
            settings: Settings::default(),
            products: RecordCache::default(),
            customers: RecordCache::default(),
            expenses: RecordCache::default(),
            cart: Cart::new(),
            payment_method: PaymentMethod::default(),
            grid_filter: String::new(),
            receipt: None,
            notices: Notices::default(),
            report: ReportState::default(),
            theme,
            theme_store,
        }
    }

    pub fn theme_store(&self) -> &ThemeStore {
        &self.theme_store
    }

    /// Formats money in the configured currency.
    pub fn money(&self, amount: Money) -> String {
        self.settings.format_money(amount)
    }
}

// =============================================================================
// Cached Resources
// =============================================================================

/// Ties a backend resource to its cache inside [`App`].
pub trait Cached: Resource {
    fn cache(app: &App) -> &RecordCache<Self>;
    fn cache_mut(app: &mut App) -> &mut RecordCache<Self>;

    /// Contents of a fresh "new" form.
    fn blank() -> Self;
}

impl Cached for Product {
    fn cache(app: &App) -> &RecordCache<Self> {
        &app.products
    }

    fn cache_mut(app: &mut App) -> &mut RecordCache<Self> {
        &mut app.products
    }

    fn blank() -> Self {
        Product {
            id: None,
            name: String::new(),
            category: String::new(),
            barcode: None,
            cost_price: Money::zero(),
            sale_price: Money::zero(),
            quantity: 0,
            created_at: None,
        }
    }
}

impl Cached for Customer {
    fn cache(app: &App) -> &RecordCache<Self> {
        &app.customers
    }

    fn cache_mut(app: &mut App) -> &mut RecordCache<Self> {
        &mut app.customers
    }

    fn blank() -> Self {
        Customer {
            id: None,
            name: String::new(),
            phone: String::new(),
            balance: Money::zero(),
            created_at: None,
        }
    }
}

impl Cached for Expense {
    fn cache(app: &App) -> &RecordCache<Self> {
        &app.expenses
    }

    fn cache_mut(app: &mut App) -> &mut RecordCache<Self> {
        &mut app.expenses
    }

    fn blank() -> Self {
        Expense {
            id: None,
            title: String::new(),
            category: DEFAULT_EXPENSE_CATEGORY.to_string(),
            amount: Money::zero(),
            created_at: None,
        }
    }
}
