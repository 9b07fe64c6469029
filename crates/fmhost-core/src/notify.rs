//! Realtime-to-UI notifications.
//!
//! The MIDI dispatcher pushes into a fixed-capacity SPSC ring without
//! allocating; the presentation layer polls. When the ring is full the
//! newest notification is dropped.

use crate::midi::sysex::MAX_TEXT_LEN;
use ringbuf::{traits::*, HeapCons, HeapProd, HeapRb};
use std::borrow::Cow;

/// Default capacity of the notification ring.
pub const DEFAULT_CAPACITY: usize = 16;

/// Something the realtime side wants shown to the user.
#[derive(Clone, Copy)]
pub enum Notification {
    /// Display text sent by the song.
    TextInsert { len: u16, data: [u8; MAX_TEXT_LEN] },
}

impl Notification {
    /// Builds a text insert, truncating to [`MAX_TEXT_LEN`] bytes.
    pub fn text_insert(text: &[u8]) -> Self {
        let len = text.len().min(MAX_TEXT_LEN);
        let mut data = [0u8; MAX_TEXT_LEN];
        data[..len].copy_from_slice(&text[..len]);
        Notification::TextInsert {
            len: len as u16,
            data,
        }
    }

    /// Text payload, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Notification::TextInsert { len, data } => {
                String::from_utf8_lossy(&data[..*len as usize])
            }
        }
    }
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::TextInsert { .. } => f
                .debug_tuple("TextInsert")
                .field(&self.text())
                .finish(),
        }
    }
}

/// Producer half, owned by the realtime dispatcher.
pub struct NotificationSender {
    producer: HeapProd<Notification>,
}

impl NotificationSender {
    /// Returns false if the ring is full and the notification was dropped.
    #[inline]
    pub fn send(&mut self, notification: Notification) -> bool {
        self.producer.try_push(notification).is_ok()
    }
}

/// Consumer half, polled by the presentation layer.
pub struct NotificationReceiver {
    consumer: HeapCons<Notification>,
}

impl NotificationReceiver {
    #[inline]
    pub fn poll(&mut self) -> Option<Notification> {
        self.consumer.try_pop()
    }
}

/// Creates a notification ring holding up to `capacity` entries.
pub fn notification_channel(capacity: usize) -> (NotificationSender, NotificationReceiver) {
    let rb = HeapRb::new(capacity.max(1));
    let (producer, consumer) = rb.split();
    (
        NotificationSender { producer },
        NotificationReceiver { consumer },
    )
}
