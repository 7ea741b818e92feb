mod items;
mod orders;

pub(crate) use items::{PgOrderItemsRepository, SnapshotOrderItem};
pub(crate) use orders::{CheckoutLine, PendingOrder, PgOrdersRepository};
