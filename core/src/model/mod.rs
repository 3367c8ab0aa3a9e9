// core/src/model/mod.rs

//! Records owned by the stores: orders, contact inquiries and reviews.

pub mod contact;
pub mod order;
pub mod review;

pub use contact::{ContactDraft, ContactId, ContactInquiry};
pub use order::{
  DeliveryType, Order, OrderDetails, OrderDraft, OrderId, OrderStatus, ParcelType, StatusChange,
};
pub use review::{Review, ReviewDraft};
