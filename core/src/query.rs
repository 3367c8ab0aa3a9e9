// core/src/query.rs

//! Filtered, paginated, most-recent-first order listings for the admin dashboard.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{CoreError, CoreResult};
use crate::model::{Order, OrderStatus};
use crate::store::OrderStore;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
  #[default]
  All,
  Only(OrderStatus),
}

impl StatusFilter {
  /// `None`, blank and `"all"` mean no filtering; anything else must be an
  /// exact status name.
  pub fn parse(raw: Option<&str>) -> CoreResult<Self> {
    match raw.map(str::trim) {
      None | Some("") | Some("all") => Ok(StatusFilter::All),
      Some(status) => status.parse().map(StatusFilter::Only),
    }
  }

  pub fn matches(&self, order: &Order) -> bool {
    match self {
      StatusFilter::All => true,
      StatusFilter::Only(status) => order.status == *status,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
  pub status: StatusFilter,
  /// 1-indexed.
  pub page: usize,
  pub page_size: usize,
}

impl Default for OrderQuery {
  fn default() -> Self {
    Self {
      status: StatusFilter::All,
      page: 1,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items: Vec<T>,
  pub total: usize,
  pub page: usize,
  pub total_pages: usize,
}

/// Filter, then sort newest first, then slice out the requested page.
/// Pages past the end come back empty.
pub fn paginate(orders: Vec<Order>, query: &OrderQuery) -> CoreResult<Page<Order>> {
  if query.page == 0 {
    return Err(CoreError::Validation("page must be 1 or greater".to_string()));
  }
  if query.page_size == 0 {
    return Err(CoreError::Validation("page size must be 1 or greater".to_string()));
  }

  let mut filtered: Vec<Order> = orders.into_iter().filter(|o| query.status.matches(o)).collect();
  filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

  let total = filtered.len();
  let total_pages = total.div_ceil(query.page_size);
  let start = (query.page - 1).saturating_mul(query.page_size);
  let items = filtered.into_iter().skip(start).take(query.page_size).collect();

  Ok(Page {
    items,
    total,
    page: query.page,
    total_pages,
  })
}

#[derive(Debug, Clone)]
pub struct OrderQueryService {
  store: OrderStore,
}

impl OrderQueryService {
  pub fn new(store: OrderStore) -> Self {
    Self { store }
  }

  #[instrument(name = "OrderQueryService::list", skip(self), err(Display))]
  pub fn list(&self, query: &OrderQuery) -> CoreResult<Page<Order>> {
    let all = self.store.list();
    debug!(total_in_store = all.len(), "Listing orders.");
    paginate(all, query)
  }
}
