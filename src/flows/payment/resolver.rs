//! Decides the post-payment destination from a fetched payment record.
//!
//! The backend expresses "which business object does this payment belong
//! to" in three shapes: a nested relation object, a flat foreign-key
//! field, or a metadata blob that is sometimes a JSON-encoded string and
//! uses inconsistent key names. All shape-sniffing is kept here; callers
//! only see [`resolve_destination`].

use serde_json::{Map, Value};

use super::schemas::Destination;
use crate::payment_client::PaymentRecord;

const TYPE_KEYS: [&str; 4] = ["paymentType", "payment_type", "type", "paymentTypeEnum"];
const ORDER_ID_KEYS: [&str; 2] = ["orderId", "order_id"];
const RESERVATION_ID_KEYS: [&str; 2] = ["reservationId", "reservation_id"];
const ROOM_BOOKING_ID_KEYS: [&str; 2] = ["roomBookingId", "room_booking_id"];

/// Flattens the metadata field to a plain map. A string value is parsed
/// as JSON; parse failure or a non-object result degrades to an empty
/// map. Never fails.
pub fn normalize_metadata(metadata: Option<&Value>) -> Map<String, Value> {
    match metadata {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        _ => Map::new(),
    }
}

fn payment_type_hint(metadata: &Map<String, Value>) -> Option<String> {
    TYPE_KEYS.iter().find_map(|key| {
        metadata
            .get(*key)
            .and_then(Value::as_str)
            .map(|hint| hint.trim().to_ascii_lowercase())
    })
}

fn metadata_has_id(metadata: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter()
        .any(|key| metadata.get(*key).is_some_and(|value| !value.is_null()))
}

/// Total resolution: every payment-like record maps to exactly one
/// destination. Precedence is fixed (order, then reservation, then room
/// booking, then the metadata type hint) and must not be reordered; when
/// a record carries several links, the earlier one wins.
pub fn resolve_destination(payment: &PaymentRecord) -> Destination {
    let metadata = normalize_metadata(payment.metadata.as_ref());

    let has_order = payment.order.is_some()
        || payment.order_id.is_some()
        || metadata_has_id(&metadata, &ORDER_ID_KEYS);
    let has_reservation = payment.reservation.is_some()
        || payment.reservation_id.is_some()
        || metadata_has_id(&metadata, &RESERVATION_ID_KEYS);
    let has_room_booking = payment.room_booking.is_some()
        || payment.room_booking_id.is_some()
        || metadata_has_id(&metadata, &ROOM_BOOKING_ID_KEYS);

    if has_order {
        Destination::OrderHistory
    } else if has_reservation {
        Destination::ReservationHistory
    } else if has_room_booking {
        Destination::RoomBookingHistory
    } else {
        match payment_type_hint(&metadata).as_deref() {
            Some("order") => Destination::OrderHistory,
            Some("reservation") => Destination::ReservationHistory,
            Some("room_booking") => Destination::RoomBookingHistory,
            _ => Destination::Dashboard,
        }
    }
}
