#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use treasury_desk::domain::error::{DeskError, FeedError};
use treasury_desk::domain::feed::FeedPeriod;
use treasury_desk::domain::order::{NewOrder, Order};
use treasury_desk::ports::feed_port::FeedPort;
use treasury_desk::ports::order_port::OrderPort;

pub const JANUARY_FEED: &str = include_str!("../fixtures/daily_treasury_yield_curve_202401.xml");

/// Serves a canned body (or error) and counts calls.
pub struct MockFeedPort {
    response: Result<String, FeedError>,
    pub calls: AtomicUsize,
}

impl MockFeedPort {
    pub fn with_body(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_error(err: FeedError) -> Self {
        Self {
            response: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedPort for MockFeedPort {
    async fn fetch_month(&self, _period: FeedPeriod) -> Result<String, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// In-memory order store; `failing()` makes every call a database error.
pub struct MockOrderPort {
    pub orders: Mutex<Vec<Order>>,
    fail: bool,
}

impl MockOrderPort {
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

impl OrderPort for MockOrderPort {
    fn create_order(&self, order: &NewOrder) -> Result<Order, DeskError> {
        if self.fail {
            return Err(DeskError::Database {
                reason: "disk I/O error".into(),
            });
        }
        let mut orders = self.orders.lock().unwrap();
        let created = Order {
            id: orders.len() as i64 + 1,
            term: order.term.term().to_string(),
            amount: order.amount,
            rate: order.rate,
            created_at: chrono::Utc::now(),
        };
        orders.push(created.clone());
        Ok(created)
    }

    fn list_orders(&self) -> Result<Vec<Order>, DeskError> {
        if self.fail {
            return Err(DeskError::DatabaseQuery {
                reason: "no such table: orders".into(),
            });
        }
        let mut orders = self.orders.lock().unwrap().clone();
        orders.reverse();
        Ok(orders)
    }
}

/// Minimal feed with one entry per `(date, one-month rate)` pair.
pub fn feed_xml(entries: &[(&str, &str)]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="utf-8"?><feed xmlns="http://www.w3.org/2005/Atom">"#);
    for (i, (date, rate)) in entries.iter().enumerate() {
        xml.push_str(&format!(
            "<entry><content type=\"application/xml\"><m:properties>\
             <d:Id>{i}</d:Id>\
             <d:NEW_DATE>{date}T00:00:00</d:NEW_DATE>\
             <d:BC_1MONTH>{rate}</d:BC_1MONTH>\
             </m:properties></content></entry>"
        ));
    }
    xml.push_str("</feed>");
    xml
}
