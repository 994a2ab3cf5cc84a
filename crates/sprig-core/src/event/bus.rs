// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A multi-producer, single-consumer event channel.
///
/// Producers (host event threads) hold cheap [`flume::Sender`] clones obtained
/// through [`EventBus::sender`]; the owner of the bus is the only consumer and
/// drains it once per frame with [`EventBus::drain`]. Events are delivered in
/// publication order per producer.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::trace!("EventBus initialized.");
        Self { sender, receiver }
    }

    /// Publishes an event, logging an error if the consumer is gone.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sending end of the channel.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a reference to the receiving end of the channel.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Takes every event published so far without blocking.
    ///
    /// Events published while the iterator is being consumed are picked up as
    /// well; they are never lost, at worst they land in the next drain.
    pub fn drain(&self) -> flume::TryIter<'_, T> {
        self.receiver.try_iter()
    }

    /// Returns `true` if no event is waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::{SendError, TryRecvError};
    use std::{thread, time::Duration};

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Down(u32),
        Up(u32),
        Focus(bool),
    }

    #[test]
    fn event_bus_creation() {
        let bus = EventBus::<TestEvent>::new();
        let _sender = bus.sender();
        assert!(bus.is_empty());
    }

    #[test]
    fn try_receive_empty() {
        let bus = EventBus::<TestEvent>::new();
        assert_eq!(bus.receiver().try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn drain_preserves_publication_order() {
        let bus = EventBus::<TestEvent>::new();
        bus.publish(TestEvent::Down(1));
        bus.publish(TestEvent::Up(1));
        bus.publish(TestEvent::Focus(false));

        let drained: Vec<_> = bus.drain().collect();
        assert_eq!(
            drained,
            vec![TestEvent::Down(1), TestEvent::Up(1), TestEvent::Focus(false)]
        );
        assert!(bus.is_empty());
        assert_eq!(bus.drain().count(), 0);
    }

    #[test]
    fn send_from_thread() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            sender.send(TestEvent::Down(7)).expect("Send from thread failed");
        });

        match bus.receiver().recv_timeout(Duration::from_secs(1)) {
            Ok(received) => assert_eq!(received, TestEvent::Down(7)),
            Err(e) => panic!("Failed to receive event from thread: {e:?}"),
        }

        handle.join().expect("Thread join failed");
    }

    #[test]
    fn send_error_on_bus_drop() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();

        drop(bus);

        match sender.send(TestEvent::Up(3)) {
            Err(SendError(_)) => {}
            Ok(()) => panic!("Send unexpectedly succeeded after bus drop"),
        }
    }
}
